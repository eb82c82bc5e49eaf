//! Speed lines: a screen-space burst of thin triangles whose tips get
//! pulled toward a projected world target as the strength rises. The
//! geometry attributes are generated once and handed to the renderer;
//! this module only drives the per-frame uniforms.

use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};
use joyride_core::maths::{lerp, rotate_vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LINE_COUNT: usize = 30;
const GEOMETRY_SEED: u64 = 0x5eed_11e5;

/// Per-vertex attribute buffers for the line mesh, three vertices per
/// line, positions interleaved xyz.
#[derive(Debug, Clone)]
pub struct SpeedLineGeometry {
    pub positions: Vec<f32>,
    pub time_randomness: Vec<f32>,
    pub distance: Vec<f32>,
    pub tipness: Vec<f32>,
    pub line_count: usize,
}

impl SpeedLineGeometry {
    /// Deterministically generated radial lines: random angle, a small
    /// random thickness, and a random pull distance per line.
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(GEOMETRY_SEED);

        let mut positions = Vec::with_capacity(LINE_COUNT * 3 * 3);
        let mut time_randomness = Vec::with_capacity(LINE_COUNT * 3);
        let mut distance = Vec::with_capacity(LINE_COUNT * 3);
        let mut tipness = Vec::with_capacity(LINE_COUNT * 3);

        // Reach the screen corners from the center.
        let max_distance = 2.0_f32.sqrt();

        for line in 0..LINE_COUNT {
            let angle = TAU * rng.random::<f32>();
            let middle = rotate_vec2(Vec2::new(0.0, 1.0), angle);

            let thickness = rng.random::<f32>() * 0.01 + 0.002;
            let left = rotate_vec2(middle, thickness) * max_distance;
            let right = rotate_vec2(middle, -thickness) * max_distance;
            let middle = middle * max_distance;

            for vertex in [left, middle, right] {
                positions.extend_from_slice(&[vertex.x, vertex.y, 0.0]);
            }

            let pull_distance = rng.random::<f32>() * 0.4 + 0.4;
            for tip in [0.0, 1.0, 0.0] {
                time_randomness.push(line as f32);
                distance.push(pull_distance);
                tipness.push(tip);
            }
        }

        Self {
            positions,
            time_randomness,
            distance,
            tipness,
            line_count: LINE_COUNT,
        }
    }
}

/// Per-frame drive values for the speed-lines effect.
#[derive(Debug, Clone)]
pub struct SpeedLines {
    /// Target strength set externally (boost, high speed).
    pub strength: f32,
    /// Time-smoothed strength the shader reads.
    pub smoothed_strength: f32,
    /// Tip oscillation speed uniform.
    pub speed: f32,
    /// World point the line tips are pulled toward.
    pub world_target: Vec3,
    /// `world_target` projected through the active camera.
    clip_space_target: Vec3,
    geometry: SpeedLineGeometry,
}

impl SpeedLines {
    pub fn new() -> Self {
        Self {
            strength: 0.0,
            smoothed_strength: 0.0,
            speed: 12.0,
            world_target: Vec3::ZERO,
            clip_space_target: Vec3::ZERO,
            geometry: SpeedLineGeometry::generate(),
        }
    }

    /// Project the world target through the active camera and smooth the
    /// strength toward its externally-set value.
    pub fn update(&mut self, delta: f32, view_proj: &Mat4) {
        let clip = *view_proj * Vec4::from((self.world_target, 1.0));
        if clip.w.abs() > 1e-6 {
            self.clip_space_target = clip.xyz() / clip.w;
        }

        self.smoothed_strength = lerp(
            self.smoothed_strength,
            self.strength,
            (delta * 2.0).min(1.0),
        );
    }

    pub fn clip_space_target(&self) -> Vec3 {
        self.clip_space_target
    }

    pub fn geometry(&self) -> &SpeedLineGeometry {
        &self.geometry
    }
}

impl Default for SpeedLines {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraPose, Projection};

    #[test]
    fn test_geometry_shapes() {
        let geometry = SpeedLineGeometry::generate();
        assert_eq!(geometry.line_count, LINE_COUNT);
        assert_eq!(geometry.positions.len(), LINE_COUNT * 9);
        assert_eq!(geometry.tipness.len(), LINE_COUNT * 3);
        // Middle vertex of each line is the tip.
        assert_eq!(geometry.tipness[0], 0.0);
        assert_eq!(geometry.tipness[1], 1.0);
        assert_eq!(geometry.tipness[2], 0.0);
    }

    #[test]
    fn test_geometry_is_deterministic() {
        let a = SpeedLineGeometry::generate();
        let b = SpeedLineGeometry::generate();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.distance, b.distance);
    }

    #[test]
    fn test_strength_smoothing_converges() {
        let mut lines = SpeedLines::new();
        lines.strength = 1.0;
        let view_proj = Mat4::IDENTITY;
        for _ in 0..600 {
            lines.update(1.0 / 60.0, &view_proj);
        }
        assert!((lines.smoothed_strength - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut lines = SpeedLines::new();
        lines.world_target = Vec3::ZERO;

        let mut camera = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), 25.0);
        camera.look_at(Vec3::ZERO);
        let projection = Projection::new(25.0, 16.0 / 9.0);
        let view_proj = projection.matrix() * camera.view_matrix();

        lines.update(1.0 / 60.0, &view_proj);
        let ndc = lines.clip_space_target();
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
    }

    #[test]
    fn test_behind_camera_keeps_previous_target() {
        let mut lines = SpeedLines::new();
        let mut camera = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), 25.0);
        camera.look_at(Vec3::ZERO);
        let projection = Projection::new(25.0, 16.0 / 9.0);
        let view_proj = projection.matrix() * camera.view_matrix();

        lines.world_target = Vec3::new(0.5, 0.0, 0.0);
        lines.update(1.0 / 60.0, &view_proj);
        let on_screen = lines.clip_space_target();

        // A target exactly at the camera projects with w ~ 0; the last
        // good value is retained.
        lines.world_target = camera.position;
        lines.update(1.0 / 60.0, &view_proj);
        assert_eq!(lines.clip_space_target(), on_screen);
    }
}
