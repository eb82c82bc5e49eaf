//! The focus point: the anchor every camera rig orbits or follows.

use glam::{Vec2, Vec3};
use joyride_core::maths::remap;

/// Spring-like pull of the manual focus position back toward the tracked
/// entity, active even while tracking is off.
#[derive(Debug, Clone, Copy)]
pub struct Magnet {
    pub active: bool,
    /// Pull gain per metre of separation. Position-proportional with no
    /// velocity damping; large values can oscillate.
    pub multiplier: f32,
}

impl Default for Magnet {
    fn default() -> Self {
        Self {
            active: true,
            multiplier: 0.25,
        }
    }
}

/// Camera anchor state. `position` follows `tracked_position` on the
/// ground plane while tracking, or the manual pan target otherwise;
/// `smoothed_position` is what cameras actually look at.
#[derive(Debug, Clone)]
pub struct FocusPoint {
    /// Where the tracked entity (vehicle) is, written every tick.
    pub tracked_position: Vec3,
    /// Authoritative anchor.
    pub position: Vec3,
    /// Exponentially smoothed anchor.
    pub smoothed_position: Vec3,
    pub is_tracking: bool,
    /// 0 snaps to the anchor in a single tick, 1 gives the full
    /// exponential lag (`remap(easing, 0, 1, 1, delta * 10)`).
    pub easing: f32,
    pub magnet: Magnet,
}

impl FocusPoint {
    pub fn new(position: Vec3) -> Self {
        let anchor = Vec3::new(position.x, 0.0, position.z);
        Self {
            tracked_position: anchor,
            position: anchor,
            smoothed_position: anchor,
            is_tracking: true,
            easing: 1.0,
            magnet: Magnet::default(),
        }
    }

    /// Manual pan displacement; disables tracking.
    pub fn pan(&mut self, offset: Vec2) {
        self.is_tracking = false;
        self.position.x += offset.x;
        self.position.z += offset.y;
    }

    /// Snap every position to `target`, bypassing all smoothing. Used for
    /// explicit teleports only.
    pub fn warp(&mut self, target: Vec3) {
        self.tracked_position = target;
        self.position = target;
        self.smoothed_position = target;
    }

    /// Per-tick ground-plane follow, magnet pull and smoothing. Returns
    /// the planar speed of the smoothed position, which feeds the
    /// speed-reactive zoom.
    pub fn update(&mut self, delta: f32) -> f32 {
        if self.is_tracking {
            self.position.x = self.tracked_position.x;
            self.position.z = self.tracked_position.z;
        }

        if self.magnet.active {
            let pull = Vec2::new(
                self.tracked_position.x - self.position.x,
                self.tracked_position.z - self.position.z,
            );
            let strength = pull.length() * self.magnet.multiplier;
            self.position.x += strength * pull.x * delta;
            self.position.z += strength * pull.y * delta;
        }

        let easing = remap(self.easing, 0.0, 1.0, 1.0, delta * 10.0);
        let smoothed = self.smoothed_position.lerp(self.position, easing.min(1.0));
        let moved = Vec2::new(
            smoothed.x - self.smoothed_position.x,
            smoothed.z - self.smoothed_position.z,
        );
        self.smoothed_position = smoothed;

        moved.length() / delta.max(f32::EPSILON)
    }
}
