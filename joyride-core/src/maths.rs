//! Scalar and small-vector math helpers used across the control core.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp into [0, 1].
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Remap `value` from [in_min, in_max] to [out_min, out_max], unclamped.
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Hermite smoothstep of `value` between `edge_min` and `edge_max`,
/// clamped to [0, 1].
pub fn smoothstep(value: f32, edge_min: f32, edge_max: f32) -> f32 {
    let span = edge_max - edge_min;
    if span == 0.0 {
        return if value < edge_min { 0.0 } else { 1.0 };
    }
    let t = clamp01((value - edge_min) / span);
    t * t * (3.0 - 2.0 * t)
}

/// Wrap an angle into [-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = (angle + PI) % TAU;
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    wrapped - PI
}

/// Signed shortest rotation from `from` to `to`, always within (-PI, PI].
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Rotate `v` counter-clockwise by `angle` radians.
pub fn rotate_vec2(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
