//! Frame timing types shared by every per-tick consumer.

/// Smallest delta handed to consumers. Keeps divisions by delta defined
/// even when the scheduler reports a zero-length frame.
pub const MIN_DELTA: f32 = 1.0 / 100_000.0;

/// Per-frame payload produced by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Time since the previous frame in seconds.
    pub delta: f32,
    /// Delta scaled by the global time scale (slow motion, pause ramps).
    pub delta_scaled: f32,
}

impl Tick {
    /// Create a tick with both deltas floored at [`MIN_DELTA`].
    pub fn new(delta: f32, delta_scaled: f32) -> Self {
        Self {
            delta: delta.max(MIN_DELTA),
            delta_scaled: delta_scaled.max(MIN_DELTA),
        }
    }

    /// Unscaled tick, convenient for tests and fixed-step drivers.
    pub fn fixed(delta: f32) -> Self {
        Self::new(delta, delta)
    }
}

/// Accumulating tick source. The external scheduler owns the real clock;
/// this helper tracks elapsed time and applies the time scale.
#[derive(Debug)]
pub struct Ticker {
    time_scale: f32,
    elapsed: f32,
    elapsed_scaled: f32,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            elapsed: 0.0,
            elapsed_scaled: 0.0,
        }
    }

    /// Set the global time scale applied to `delta_scaled`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Advance by a raw delta and produce the tick for this frame.
    pub fn advance(&mut self, delta: f32) -> Tick {
        let tick = Tick::new(delta, delta * self.time_scale);
        self.elapsed += tick.delta;
        self.elapsed_scaled += tick.delta_scaled;
        tick
    }

    /// Total unscaled time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total scaled time in seconds.
    pub fn elapsed_scaled(&self) -> f32 {
        self.elapsed_scaled
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}
