//! Joyride View Crate
//!
//! Camera and focus-point control for the driving experience: a focus
//! point with tracking/magnet/smoothing, six camera rigs resolved into a
//! single pose per tick, a tween-driven cinematic overlay, the optimal
//! ground-plane footprint, and the speed-lines decoration drive.
//!
//! ## Modules
//!
//! - [`camera`]: camera pose, projection and spherical helpers
//! - [`focus`]: the focus point every rig orbits or follows
//! - [`mode`]: the closed camera mode set and its cycle order
//! - [`zoom`]: isometric zoom ratio with wheel/pinch/toggle inputs
//! - [`roll`]: collision-kicked roll spring
//! - [`rigs`]: per-mode rigs, allocated once and selected by [`ViewMode`]
//! - [`cinematic`]: tween-driven blend toward a fixed shot
//! - [`area`]: conservative ground footprint for spawning/detail systems
//! - [`speedlines`]: screen-space speed-lines drive values
//! - [`view`]: the orchestrator resolving one pose per tick

pub mod area;
pub mod camera;
pub mod cinematic;
pub mod focus;
pub mod mode;
pub mod rigs;
pub mod roll;
pub mod speedlines;
pub mod view;
pub mod zoom;

pub use area::OptimalArea;
pub use camera::{CameraPose, Projection};
pub use focus::FocusPoint;
pub use mode::ViewMode;
pub use speedlines::{SpeedLineGeometry, SpeedLines};
pub use view::{View, ViewConfig};
