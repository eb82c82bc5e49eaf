//! Per-mode camera rigs. Every rig is allocated once at construction and
//! selected by the active [`crate::ViewMode`]; switching modes re-seeds a
//! rig's smoothing state instead of recreating it.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec2, Vec3};
use joyride_core::maths::shortest_angle_delta;
use joyride_core::{InputFrame, Quality};

use crate::camera::{offset_from_spherical, CameraPose};

/// Spherical coordinates of the default (isometric) rig around the
/// smoothed focus point.
#[derive(Debug, Clone)]
pub struct SphericalRig {
    /// Polar angle from +Y in radians.
    pub phi: f32,
    /// Azimuth around +Y in radians.
    pub theta: f32,
    pub radius_edges: RadiusEdges,
    /// Interpolated radius for the current zoom.
    pub radius: f32,
    /// Extra max-radius allowance per unit of viewport ratio overflow.
    pub non_ideal_ratio_offset: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct RadiusEdges {
    pub min: f32,
    pub max: f32,
}

impl SphericalRig {
    pub fn new(quality: Quality) -> Self {
        let phi = PI * if quality == Quality::High { 0.31 } else { 0.27 };
        Self {
            phi,
            theta: PI * 0.25,
            radius_edges: RadiusEdges { min: 15.0, max: 30.0 },
            radius: 15.0,
            non_ideal_ratio_offset: 9.0,
        }
    }

    /// Worst-case radius for the given viewport ratio overflow.
    pub fn radius_max(&self, ratio_overflow: f32) -> f32 {
        self.radius_edges.max + ratio_overflow * self.non_ideal_ratio_offset
    }

    /// Update the current radius from the smoothed zoom ratio and return
    /// the camera offset from the focus point.
    pub fn offset(&mut self, smoothed_zoom_ratio: f32, ratio_overflow: f32) -> Vec3 {
        let max = self.radius_max(ratio_overflow);
        let t = 1.0 - smoothed_zoom_ratio;
        self.radius = self.radius_edges.min + (max - self.radius_edges.min) * t;
        offset_from_spherical(self.radius, self.phi, self.theta)
    }
}

/// Chase camera behind the vehicle with rotation and position lag.
#[derive(Debug, Clone)]
pub struct ThirdPersonRig {
    pub distance: f32,
    pub height: f32,
    pub look_at_height: f32,
    pub rotation_lag: f32,
    pub position_lag: f32,
    pub fov: f32,
    pub smoothed_rotation: f32,
    pub smoothed_position: Vec3,
}

impl ThirdPersonRig {
    pub fn new() -> Self {
        Self {
            distance: 12.0,
            height: 4.0,
            look_at_height: 1.5,
            rotation_lag: 5.0,
            position_lag: 8.0,
            fov: 60.0,
            smoothed_rotation: 0.0,
            smoothed_position: Vec3::ZERO,
        }
    }

    /// Snap the smoothing state so a mode switch does not pop.
    pub fn seed(&mut self, camera_position: Vec3, vehicle_yaw: f32) {
        self.smoothed_position = camera_position;
        self.smoothed_rotation = vehicle_yaw;
    }

    /// Resolve the pose behind the vehicle. The speed term pulls the
    /// camera back and up as the vehicle accelerates.
    pub fn update(&mut self, focus: Vec3, vehicle_yaw: f32, xz_speed: f32, delta: f32) -> CameraPose {
        let wrap = shortest_angle_delta(self.smoothed_rotation, vehicle_yaw);
        self.smoothed_rotation += wrap * (delta * self.rotation_lag).min(1.0);

        let behind = self.smoothed_rotation + PI;
        let speed_effect = (xz_speed * 0.02).clamp(0.0, 1.0);
        let distance = self.distance + speed_effect * 5.0;
        let height = self.height + speed_effect * 1.5;

        let target = Vec3::new(
            focus.x + behind.cos() * distance,
            focus.y + height,
            focus.z + behind.sin() * distance,
        );
        self.smoothed_position = self
            .smoothed_position
            .lerp(target, (delta * self.position_lag).min(1.0));

        let mut pose = CameraPose::new(self.smoothed_position, self.fov);
        pose.look_at(focus + Vec3::Y * self.look_at_height);
        pose
    }
}

impl Default for ThirdPersonRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-height top-down follow.
#[derive(Debug, Clone)]
pub struct TopDownRig {
    pub height: f32,
    pub lag: f32,
    pub fov: f32,
    pub smoothed_position: Vec3,
}

impl TopDownRig {
    pub fn new() -> Self {
        Self {
            height: 25.0,
            lag: 8.0,
            fov: 50.0,
            smoothed_position: Vec3::ZERO,
        }
    }

    pub fn seed(&mut self, focus: Vec3) {
        self.smoothed_position = focus + Vec3::Y * self.height;
    }

    pub fn update(&mut self, focus: Vec3, delta: f32) -> CameraPose {
        let target = focus + Vec3::Y * self.height;
        self.smoothed_position = self.smoothed_position.lerp(target, (delta * self.lag).min(1.0));

        let mut pose = CameraPose::new(self.smoothed_position, self.fov);
        pose.rotation = Quat::from_rotation_x(-FRAC_PI_2);
        pose
    }
}

impl Default for TopDownRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hood camera slightly ahead of and above the vehicle.
#[derive(Debug, Clone)]
pub struct FirstPersonRig {
    pub hood_offset: f32,
    pub height_offset: f32,
    pub rotation_rate: f32,
    pub position_rate: f32,
    pub look_ahead: f32,
    pub fov: f32,
    pub smoothed_rotation: f32,
    pub smoothed_position: Vec3,
}

impl FirstPersonRig {
    pub fn new() -> Self {
        Self {
            hood_offset: 1.5,
            height_offset: 1.8,
            rotation_rate: 12.0,
            position_rate: 15.0,
            look_ahead: 20.0,
            fov: 75.0,
            smoothed_rotation: 0.0,
            smoothed_position: Vec3::ZERO,
        }
    }

    pub fn seed(&mut self, focus: Vec3, vehicle_yaw: f32) {
        self.smoothed_rotation = vehicle_yaw;
        self.smoothed_position = Vec3::new(
            focus.x + vehicle_yaw.cos() * self.hood_offset,
            focus.y + self.height_offset,
            focus.z + vehicle_yaw.sin() * self.hood_offset,
        );
    }

    pub fn update(&mut self, focus: Vec3, vehicle_yaw: f32, delta: f32) -> CameraPose {
        let wrap = shortest_angle_delta(self.smoothed_rotation, vehicle_yaw);
        self.smoothed_rotation += wrap * (delta * self.rotation_rate).min(1.0);

        let heading = self.smoothed_rotation;
        let target = Vec3::new(
            focus.x + heading.cos() * self.hood_offset,
            focus.y + self.height_offset,
            focus.z + heading.sin() * self.hood_offset,
        );
        self.smoothed_position = self
            .smoothed_position
            .lerp(target, (delta * self.position_rate).min(1.0));

        let look_target = Vec3::new(
            focus.x + heading.cos() * self.look_ahead,
            focus.y + self.height_offset * 0.8,
            focus.z + heading.sin() * self.look_ahead,
        );

        let mut pose = CameraPose::new(self.smoothed_position, self.fov);
        pose.look_at(look_target);
        pose
    }
}

impl Default for FirstPersonRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Slow orbit around the focus point with a speed-reactive radius bump.
#[derive(Debug, Clone)]
pub struct ChaseRig {
    pub distance: f32,
    pub height: f32,
    pub orbit_speed: f32,
    pub lag: f32,
    pub fov: f32,
    pub angle: f32,
    pub smoothed_position: Vec3,
}

impl ChaseRig {
    pub fn new() -> Self {
        Self {
            distance: 20.0,
            height: 6.0,
            orbit_speed: 0.1,
            lag: 3.0,
            fov: 45.0,
            angle: 0.0,
            smoothed_position: Vec3::ZERO,
        }
    }

    pub fn update(&mut self, focus: Vec3, xz_speed: f32, delta: f32) -> CameraPose {
        self.angle += delta * self.orbit_speed;

        let speed_offset = (xz_speed * 0.1).clamp(0.0, 1.0) * 5.0;
        let target = Vec3::new(
            focus.x + self.angle.cos() * (self.distance + speed_offset),
            focus.y + self.height + speed_offset * 0.3,
            focus.z + self.angle.sin() * (self.distance + speed_offset),
        );
        self.smoothed_position = self.smoothed_position.lerp(target, (delta * self.lag).min(1.0));

        let mut pose = CameraPose::new(self.smoothed_position, self.fov);
        pose.look_at(focus + Vec3::Y);
        pose
    }
}

impl Default for ChaseRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Unconstrained orbit rig for the free camera: orbit, pan and dolly
/// around a target with time smoothing.
#[derive(Debug, Clone)]
pub struct OrbitRig {
    pub fov: f32,
    pub rotation_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub dolly_speed: f32,
    /// Exponential smoothing time constant in seconds.
    pub smooth_time: f32,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    smoothed_position: Vec3,
    smoothed_target: Vec3,
}

impl OrbitRig {
    pub fn new() -> Self {
        let mut rig = Self {
            fov: 25.0,
            rotation_sensitivity: 0.005,
            pan_sensitivity: 0.0025,
            dolly_speed: 0.2,
            smooth_time: 0.075,
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.6,
            distance: 20.0,
            smoothed_position: Vec3::ZERO,
            smoothed_target: Vec3::ZERO,
        };
        rig.snap();
        rig
    }

    /// Seed the orbit from an existing camera placement on mode entry.
    pub fn seed(&mut self, position: Vec3, target: Vec3) {
        self.target = target;
        let offset = position - target;
        self.distance = offset.length().max(0.1);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        self.snap();
    }

    fn snap(&mut self) {
        self.smoothed_target = self.target;
        self.smoothed_position = self.position_for(self.yaw, self.pitch, self.distance);
    }

    fn position_for(&self, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
        let planar = pitch.cos() * distance;
        self.target + Vec3::new(yaw.sin() * planar, pitch.sin() * distance, yaw.cos() * planar)
    }

    pub fn update(&mut self, input: &InputFrame, delta: f32) -> CameraPose {
        if input.orbit_delta != Vec2::ZERO {
            self.yaw -= input.orbit_delta.x * self.rotation_sensitivity;
            self.pitch = (self.pitch + input.orbit_delta.y * self.rotation_sensitivity)
                .clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
        }

        if input.orbit_pan != Vec2::ZERO {
            let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
            let pan = right * (-input.orbit_pan.x * self.pan_sensitivity * self.distance)
                + Vec3::Y * (input.orbit_pan.y * self.pan_sensitivity * self.distance);
            self.target += pan;
        }

        if input.orbit_dolly != 0.0 {
            self.distance = (self.distance * (1.0 - input.orbit_dolly * self.dolly_speed))
                .clamp(0.5, 150.0);
        }

        let alpha = (delta / self.smooth_time).min(1.0);
        let position = self.position_for(self.yaw, self.pitch, self.distance);
        self.smoothed_position = self.smoothed_position.lerp(position, alpha);
        self.smoothed_target = self.smoothed_target.lerp(self.target, alpha);

        let mut pose = CameraPose::new(self.smoothed_position, self.fov);
        pose.look_at(self.smoothed_target);
        pose
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_person_yaw_wraps_across_pi() {
        let mut rig = ThirdPersonRig::new();
        rig.seed(Vec3::ZERO, 3.0);

        rig.update(Vec3::ZERO, -3.0, 0.0, 1.0 / 60.0);
        let moved = (rig.smoothed_rotation - 3.0).abs();
        // The smoothing step crosses the seam, not the long way round.
        assert!(moved < PI);
        assert!(rig.smoothed_rotation > 3.0);
    }

    #[test]
    fn test_third_person_sits_behind_vehicle() {
        let mut rig = ThirdPersonRig::new();
        // Vehicle heading +X (yaw 0); camera should settle on -X.
        rig.seed(Vec3::ZERO, 0.0);
        let mut pose = CameraPose::new(Vec3::ZERO, rig.fov);
        for _ in 0..600 {
            pose = rig.update(Vec3::ZERO, 0.0, 0.0, 1.0 / 60.0);
        }
        assert!(pose.position.x < -10.0);
        assert!((pose.position.y - rig.height).abs() < 0.1);
        assert!(pose.position.z.abs() < 0.1);
    }

    #[test]
    fn test_third_person_speed_pulls_back() {
        let mut slow = ThirdPersonRig::new();
        let mut fast = ThirdPersonRig::new();
        slow.seed(Vec3::ZERO, 0.0);
        fast.seed(Vec3::ZERO, 0.0);
        for _ in 0..600 {
            slow.update(Vec3::ZERO, 0.0, 0.0, 1.0 / 60.0);
            fast.update(Vec3::ZERO, 0.0, 100.0, 1.0 / 60.0);
        }
        assert!(
            fast.smoothed_position.distance(Vec3::ZERO)
                > slow.smoothed_position.distance(Vec3::ZERO) + 3.0
        );
    }

    #[test]
    fn test_top_down_looks_straight_down() {
        let mut rig = TopDownRig::new();
        rig.seed(Vec3::ZERO);
        let pose = rig.update(Vec3::ZERO, 1.0 / 60.0);
        assert!(pose.forward().distance(Vec3::NEG_Y) < 1e-5);
        assert_eq!(pose.fov, 50.0);
    }

    #[test]
    fn test_first_person_looks_along_heading() {
        let mut rig = FirstPersonRig::new();
        rig.seed(Vec3::ZERO, 0.0);
        let mut pose = rig.update(Vec3::ZERO, 0.0, 1.0 / 60.0);
        for _ in 0..600 {
            pose = rig.update(Vec3::ZERO, 0.0, 1.0 / 60.0);
        }
        // Heading +X for yaw 0.
        let forward = pose.forward();
        assert!(forward.x > 0.9);
        assert_eq!(pose.fov, 75.0);
    }

    #[test]
    fn test_chase_orbits_over_time() {
        let mut rig = ChaseRig::new();
        let first = rig.update(Vec3::ZERO, 0.0, 1.0 / 60.0);
        for _ in 0..3600 {
            rig.update(Vec3::ZERO, 0.0, 1.0 / 60.0);
        }
        let later = rig.update(Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert!(first.position.distance(later.position) > 1.0);
    }

    #[test]
    fn test_orbit_rig_seed_round_trips() {
        let mut rig = OrbitRig::new();
        let position = Vec3::new(10.0, 8.0, -4.0);
        let target = Vec3::new(1.0, 0.0, 1.0);
        rig.seed(position, target);
        let pose = rig.update(&InputFrame::default(), 1.0 / 60.0);
        assert!(pose.position.distance(position) < 0.1);
        let expected = (target - position).normalize();
        assert!(pose.forward().distance(expected) < 0.05);
    }

    #[test]
    fn test_spherical_radius_tracks_zoom() {
        let mut rig = SphericalRig::new(Quality::Low);
        rig.offset(1.0, 0.0);
        assert!((rig.radius - rig.radius_edges.min).abs() < 1e-4);
        rig.offset(0.0, 0.0);
        assert!((rig.radius - rig.radius_edges.max).abs() < 1e-4);
        // Ratio overflow extends the zoomed-out edge.
        rig.offset(0.0, 1.0);
        assert!((rig.radius - (rig.radius_edges.max + rig.non_ideal_ratio_offset)).abs() < 1e-4);
    }
}
