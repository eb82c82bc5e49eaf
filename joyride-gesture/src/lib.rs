//! Joyride Gesture Crate
//!
//! Hand-gesture driving input: video frames from a capture source run
//! through a hand landmark detector, and the landmarks are mapped into
//! steering, acceleration, braking and boost axes.
//!
//! ## Example
//!
//! ```ignore
//! use joyride_gesture::{GestureMapper, WebcamCapture};
//!
//! let mut mapper = GestureMapper::new(capture_factory, detector_factory);
//! mapper.enable()?;
//! loop {
//!     mapper.poll();
//!     let controls = mapper.controls();
//!     // Feed controls.steering / controls.accelerating into the vehicle...
//! }
//! ```

pub mod landmarks;
pub mod mapper;
pub mod source;

#[cfg(feature = "webcam")]
mod webcam;

pub use landmarks::{HandLandmarks, Handedness, Landmark, TrackedHand};
pub use mapper::{
    CaptureFactory, DetectorFactory, GestureControls, GestureError, GestureEvent, GestureMapper,
    GestureSettings, GestureStatus,
};
pub use source::{CaptureError, CaptureSource, DetectorError, FrameData, HandDetector};

#[cfg(feature = "webcam")]
pub use webcam::WebcamCapture;
