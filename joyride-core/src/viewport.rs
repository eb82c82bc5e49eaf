//! Viewport state published by the windowing layer.

/// Current drawable size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Width over height.
    pub fn ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Shortest viewport side, floored so it is safe as a divisor.
    pub fn smallest_side(&self) -> f32 {
        self.width.min(self.height).max(1.0)
    }

    /// How far the viewport falls short of an ideal landscape ratio.
    /// Zero for viewports at least as wide as the ideal, positive for
    /// narrower (portrait-leaning) ones.
    pub fn ratio_overflow(&self, ideal_ratio: f32) -> f32 {
        (ideal_ratio / self.ratio()).max(1.0) - 1.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}
