//! Capture source and detection backend seams.

use image::RgbImage;
use thiserror::Error;

use crate::landmarks::TrackedHand;

/// Errors raised while acquiring or reading a capture device.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("failed to open device: {0}")]
    OpenFailed(String),

    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),

    #[error("stream ended")]
    StreamEnded,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the hand landmark detection backend.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detection backend failed to load: {0}")]
    LoadFailed(String),

    #[error("detection pass failed: {0}")]
    DetectFailed(String),
}

/// Raw video frame from a capture source.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// RGB image data.
    pub image: RgbImage,
    /// Media timestamp in seconds, relative to stream start. Used to
    /// deduplicate frames; a repeated timestamp is never processed twice.
    pub timestamp: f64,
    /// Monotonic frame number.
    pub frame_number: u64,
}

impl FrameData {
    pub fn new(image: RgbImage, timestamp: f64, frame_number: u64) -> Self {
        Self {
            image,
            timestamp,
            frame_number,
        }
    }

    /// Image dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// A source of video frames (webcam, file, test fixture).
pub trait CaptureSource {
    /// Next frame, or `None` when no new frame is available yet.
    fn next_frame(&mut self) -> Result<Option<FrameData>, CaptureError>;

    /// Frame rate, if known.
    fn frame_rate(&self) -> Option<f32>;

    /// Resolution (width, height).
    fn resolution(&self) -> (u32, u32);

    fn is_active(&self) -> bool;

    /// Release the device.
    fn stop(&mut self);
}

/// Hand landmark detection over capture frames. One call per deduplicated
/// frame; a failed pass is treated by the caller as "no hands" rather
/// than tearing the loop down.
pub trait HandDetector {
    fn detect(&mut self, frame: &FrameData) -> Result<Vec<TrackedHand>, DetectorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_data_dimensions() {
        let frame = FrameData::new(RgbImage::new(64, 48), 0.25, 1);
        assert_eq!(frame.dimensions(), (64, 48));
    }

    #[test]
    fn test_capture_error_messages() {
        let err = CaptureError::PermissionDenied("user dismissed prompt".into());
        assert!(err.to_string().contains("permission denied"));
        let err = DetectorError::LoadFailed("model missing".into());
        assert!(err.to_string().contains("failed to load"));
    }
}
