//! Frame-advanced scalar tweens.
//!
//! Cinematic progress, depth-of-field strength and similar scalars are
//! animated here rather than by an external animation library: the owner
//! advances the tween exactly once per frame before any consumer reads
//! it, so tween updates are always visible to the camera tick that
//! consumes them within the same frame.

/// Easing curve applied to the normalized tween time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease in and out.
    #[default]
    InOutQuad,
    /// Quartic ease out, fast start with a long settle.
    OutQuart,
}

impl Ease {
    /// Map normalized time `t` in [0, 1] through the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// A scalar interpolator with overwrite semantics: `start` replaces any
/// in-flight animation from the current value.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    value: f32,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
    running: bool,
}

impl Tween {
    /// A settled tween holding `value`.
    pub fn settled(value: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            duration: 0.0,
            elapsed: 0.0,
            ease: Ease::default(),
            running: false,
        }
    }

    /// Begin animating from the current value to `to`. A zero or negative
    /// duration snaps immediately.
    pub fn start(&mut self, to: f32, duration: f32, ease: Ease) {
        if duration <= 0.0 {
            self.value = to;
            self.to = to;
            self.running = false;
            return;
        }
        self.from = self.value;
        self.to = to;
        self.duration = duration;
        self.elapsed = 0.0;
        self.ease = ease;
        self.running = true;
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.running {
            self.elapsed += dt.max(0.0);
            let t = (self.elapsed / self.duration).min(1.0);
            self.value = self.from + (self.to - self.from) * self.ease.apply(t);
            if t >= 1.0 {
                self.running = false;
            }
        }
        self.value
    }

    /// Current value without advancing.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Snap to `value`, cancelling any in-flight animation.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.to = value;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::settled(0.0);
        tween.start(1.0, 1.0, Ease::Linear);
        for _ in 0..100 {
            tween.advance(0.01);
        }
        assert!((tween.value() - 1.0).abs() < 1e-5);
        assert!(!tween.is_running());
    }

    #[test]
    fn test_tween_overwrite_restarts_from_current() {
        let mut tween = Tween::settled(0.0);
        tween.start(1.0, 1.0, Ease::Linear);
        tween.advance(0.5);
        let mid = tween.value();
        assert!((mid - 0.5).abs() < 1e-5);

        // Overwrite mid-flight, back toward zero.
        tween.start(0.0, 1.0, Ease::Linear);
        tween.advance(0.5);
        assert!((tween.value() - mid * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut tween = Tween::settled(0.2);
        tween.start(0.8, 0.0, Ease::InOutQuad);
        assert_eq!(tween.value(), 0.8);
        assert!(!tween.is_running());
    }

    #[test]
    fn test_in_out_quad_midpoint() {
        assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Ease::InOutQuad.apply(0.25) < 0.25);
        assert!(Ease::InOutQuad.apply(0.75) > 0.75);
    }
}
