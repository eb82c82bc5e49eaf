//! Damped roll spring applied to the default rig after its look-at.

/// Camera roll as a spring with an impulse input: `kick` perturbs the
/// spring speed with a random sign, the pull and damping settle it back
/// to zero. Used for landing/jolt feedback.
#[derive(Debug, Clone, Copy)]
pub struct RollSpring {
    /// Current roll angle in radians.
    pub value: f32,
    velocity: f32,
    speed: f32,
    pub damping: f32,
    pub pull_strength: f32,
    pub kick_strength: f32,
}

impl RollSpring {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            speed: 0.0,
            damping: 4.0,
            pull_strength: 100.0,
            kick_strength: 1.0,
        }
    }

    /// Impulse with a randomized direction.
    pub fn kick(&mut self, strength: f32) {
        let sign = if rand::random::<bool>() { 1.0 } else { -1.0 };
        self.kick_signed(strength, sign);
    }

    /// Impulse with an explicit direction.
    pub fn kick_signed(&mut self, strength: f32, sign: f32) {
        self.speed = strength * self.kick_strength * sign.signum();
    }

    /// Advance the spring by a scaled delta.
    pub fn advance(&mut self, delta_scaled: f32) {
        self.velocity = -self.value * self.pull_strength * delta_scaled;
        self.speed += self.velocity;
        self.value += self.speed * delta_scaled;
        self.speed *= 1.0 - (self.damping * delta_scaled).min(1.0);
    }
}

impl Default for RollSpring {
    fn default() -> Self {
        Self::new()
    }
}
