//! Cinematic transition: tween-driven blend of the default rig toward a
//! fixed shot aimed from `position` to `target`.

use glam::Vec3;
use joyride_core::{Ease, Tween};

use crate::camera::CameraPose;

/// Extra pull-back per unit of viewport ratio overflow so narrow screens
/// still frame the shot.
const NON_IDEAL_RATIO_OFFSET: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Cinematic {
    pub active: bool,
    progress: Tween,
    pub position: Vec3,
    pub target: Vec3,
    /// Depth-of-field strength driven alongside the blend; the rendering
    /// layer reads this, the view never does.
    dof_strength: Tween,
}

impl Cinematic {
    pub fn new() -> Self {
        Self {
            active: false,
            progress: Tween::settled(0.0),
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            dof_strength: Tween::settled(1.5),
        }
    }

    /// Begin blending toward the shot. Narrow viewports push the camera
    /// position away from the target so the framing holds.
    pub fn start(&mut self, position: Vec3, target: Vec3, ratio_overflow: f32) {
        self.active = true;
        self.position = position;
        self.target = target;

        if ratio_overflow > 0.0 {
            let away = (position - target).normalize_or_zero();
            self.position += away * (ratio_overflow * NON_IDEAL_RATIO_OFFSET);
        }

        self.progress.start(1.0, 1.5, Ease::InOutQuad);
        self.dof_strength.start(0.0, 1.5, Ease::InOutQuad);
    }

    /// Blend back to the live camera.
    pub fn end(&mut self) {
        self.active = false;
        self.progress.start(0.0, 1.0, Ease::InOutQuad);
        self.dof_strength.start(1.5, 1.5, Ease::InOutQuad);
    }

    /// Advance the tweens; called exactly once per frame before the pose
    /// blend reads `progress`.
    pub fn advance(&mut self, delta: f32) {
        self.progress.advance(delta);
        self.dof_strength.advance(delta);
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn dof_strength(&self) -> f32 {
        self.dof_strength.value()
    }

    /// Blend `pose` toward the shot by the current progress. Progress 0
    /// leaves the pose untouched, progress 1 reproduces the shot exactly.
    pub fn blend(&self, pose: &mut CameraPose) {
        let progress = self.progress.value();
        if progress <= 0.0 {
            return;
        }

        let mut shot = CameraPose::new(self.position, pose.fov);
        shot.look_at(self.target);

        pose.position = pose.position.lerp(shot.position, progress);
        pose.rotation = pose.rotation.slerp(shot.rotation, progress);
    }
}

impl Default for Cinematic {
    fn default() -> Self {
        Self::new()
    }
}
