//! Named input actions and per-tick analog input state.
//!
//! The input router (keyboard, gamepad, pointer, gesture) debounces raw
//! events into named actions; the control core consumes actions and the
//! per-tick [`InputFrame`] snapshot, never raw device events.

use glam::Vec2;

/// Closed set of named actions the control core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Forward,
    Backward,
    Left,
    Right,
    Boost,
    Brake,
    Respawn,
    Interact,
    /// Wheel roll; `value` carries the scroll amount.
    Zoom,
    /// Digital zoom in/out toggle (gamepad stick click).
    ZoomToggle,
    /// Cycle the camera mode.
    ViewToggle,
    /// Pointer drag / pinch over the map.
    MapPointer,
}

impl ActionKind {
    /// Whether starting this action re-acquires focus-point tracking.
    /// Explicit membership table; driving and interaction actions pull the
    /// camera back to the vehicle, view manipulation does not.
    pub fn reacquires_focus(&self) -> bool {
        matches!(
            self,
            Self::Forward
                | Self::Backward
                | Self::Left
                | Self::Right
                | Self::Boost
                | Self::Brake
                | Self::Respawn
                | Self::Interact
        )
    }
}

/// A debounced action event from the input router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    /// Pressed / active edge state.
    pub active: bool,
    /// Analog payload (wheel delta, trigger amount). Zero for digital keys.
    pub value: f32,
}

impl Action {
    pub fn start(kind: ActionKind) -> Self {
        Self {
            kind,
            active: true,
            value: 0.0,
        }
    }

    pub fn end(kind: ActionKind) -> Self {
        Self {
            kind,
            active: false,
            value: 0.0,
        }
    }

    pub fn with_value(kind: ActionKind, value: f32) -> Self {
        Self {
            kind,
            active: true,
            value,
        }
    }
}

/// Pointer drag state while a map-pointer action is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDrag {
    /// Pointer movement this tick in viewport pixels.
    pub delta: Vec2,
    /// At least two touches are down (pinch/two-finger pan).
    pub multi_touch: bool,
    /// The pointer is a mouse rather than a touch contact.
    pub mouse: bool,
}

impl PointerDrag {
    /// Whether this drag pans the map. Single-touch drags steer the
    /// vehicle elsewhere and must not move the focus point.
    pub fn pans_map(&self) -> bool {
        self.mouse || self.multi_touch
    }
}

/// Analog input snapshot consumed once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Active map drag, if any.
    pub pointer_drag: Option<PointerDrag>,
    /// Pinch distance change this tick, in pixels.
    pub pinch_delta: f32,
    /// Secondary (right) analog stick, if deflected.
    pub right_stick: Option<Vec2>,
    /// Free-mode orbit drag in pixels.
    pub orbit_delta: Vec2,
    /// Free-mode pan drag in pixels.
    pub orbit_pan: Vec2,
    /// Free-mode dolly amount (wheel notches).
    pub orbit_dolly: f32,
}
