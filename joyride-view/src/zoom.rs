//! Zoom ratio state: wheel, pinch and gamepad toggle inputs plus the
//! speed-reactive amplitude layered on top while tracking.

use joyride_core::maths::{clamp01, lerp, smoothstep};
use joyride_core::Quality;

/// Speed band over which the speed-reactive zoom ramps in, in m/s.
#[derive(Debug, Clone, Copy)]
pub struct SpeedEdge {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone)]
pub struct Zoom {
    /// User-controlled ratio in [0, 1]; 1 is fully zoomed in.
    pub base_ratio: f32,
    /// Base ratio plus the speed amplitude while tracking.
    pub ratio: f32,
    /// Time-smoothed ratio consumed by the spherical rig.
    pub smoothed_ratio: f32,
    /// Negative values zoom out with speed.
    pub speed_amplitude: f32,
    pub speed_edge: SpeedEdge,
    /// Wheel sensitivity.
    pub sensitivity: f32,
    toggle: i32,
    toggle_last: i32,
}

impl Zoom {
    pub fn new() -> Self {
        let base_ratio = 0.6;
        Self {
            base_ratio,
            ratio: base_ratio,
            smoothed_ratio: base_ratio,
            speed_amplitude: -0.4,
            speed_edge: SpeedEdge { min: 5.0, max: 40.0 },
            sensitivity: 0.05,
            toggle: 0,
            toggle_last: -1,
        }
    }

    /// Wheel roll; positive values zoom out.
    pub fn wheel(&mut self, value: f32) {
        self.base_ratio = clamp01(self.base_ratio - value * self.sensitivity);
    }

    /// Pinch distance change in pixels; spreading zooms in.
    pub fn pinch(&mut self, distance_delta: f32) {
        self.base_ratio = clamp01(self.base_ratio + distance_delta * 0.005);
    }

    /// Digital toggle press: alternates the held zoom direction, starting
    /// inward. Each press flips relative to the previous one.
    pub fn toggle_press(&mut self) {
        self.toggle -= self.toggle_last;
        self.toggle_last = self.toggle;
    }

    /// Digital toggle release: stops the held zoom.
    pub fn toggle_release(&mut self) {
        self.toggle = 0;
    }

    /// Per-tick update for the default rig: apply the held toggle, layer
    /// the speed amplitude and smooth.
    pub fn update(&mut self, focus_speed: f32, tracking: bool, quality: Quality, delta: f32) {
        if self.toggle != 0 {
            self.base_ratio = clamp01(self.base_ratio + self.toggle as f32 * 0.01);
        }

        self.ratio = self.base_ratio;
        if tracking && quality == Quality::High {
            let speed_ratio = smoothstep(focus_speed, self.speed_edge.min, self.speed_edge.max);
            self.ratio += self.speed_amplitude * speed_ratio;
        }

        self.smoothed_ratio = lerp(self.smoothed_ratio, self.ratio, (delta * 10.0).min(1.0));
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new()
    }
}
