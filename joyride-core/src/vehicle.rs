//! Vehicle kinematic state published by the physics step.

use glam::Vec3;

/// Read-only snapshot of the player vehicle, refreshed by the external
/// physics step before the camera tick consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// Chassis position in world space.
    pub position: Vec3,
    /// Heading around the Y axis in radians.
    pub rotation_y: f32,
    /// Signed speed along the heading in m/s.
    pub forward_speed: f32,
    /// Planar speed magnitude in m/s.
    pub xz_speed: f32,
}

impl VehicleState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation_y: 0.0,
            forward_speed: 0.0,
            xz_speed: 0.0,
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Rendering quality tier. High quality enables the speed-reactive zoom
/// amplitude and the steeper default polar angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Low,
}
