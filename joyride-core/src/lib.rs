//! Joyride Core Crate
//!
//! Shared leaf types for the joyride control core: frame timing, viewport
//! state, vehicle kinematics, named input actions, scalar math helpers and
//! the frame-advanced tween subsystem. This crate is renderer-agnostic and
//! has no knowledge of the camera or gesture systems built on top of it.

pub mod action;
pub mod maths;
pub mod ticker;
pub mod tween;
pub mod vehicle;
pub mod viewport;

pub use action::{Action, ActionKind, InputFrame, PointerDrag};
pub use ticker::{Tick, Ticker};
pub use tween::{Ease, Tween};
pub use vehicle::{Quality, VehicleState};
pub use viewport::Viewport;
