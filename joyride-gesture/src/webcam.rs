//! Webcam capture using nokhwa, shaped for hand detection: frames come
//! out mirrored like a selfie view (moving a hand left steers left) and
//! shrunk toward the detection resolution, since landmark inference
//! gains nothing from full native frames.

use crate::source::{CaptureError, CaptureSource, FrameData};
use image::imageops::{self, FilterType};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
};
use nokhwa::Camera;
use std::time::Instant;
use tracing::{debug, info};

/// Resolution requested for landmark detection.
const DETECT_WIDTH: u32 = 640;
const DETECT_HEIGHT: u32 = 480;

pub struct WebcamCapture {
    camera: Camera,
    /// Size of the frames handed to the detector, after conforming.
    output_size: (u32, u32),
    opened_at: Instant,
    frames: u64,
    active: bool,
}

impl WebcamCapture {
    /// Open the webcam at `index` for hand detection (640x480 request).
    pub fn new(index: u32) -> Result<Self, CaptureError> {
        Self::with_detect_size(index, DETECT_WIDTH, DETECT_HEIGHT)
    }

    /// Open the webcam at `index` targeting a specific detection size.
    /// The device negotiates the closest format it supports; anything
    /// larger is shrunk before frames are handed out.
    pub fn with_detect_size(index: u32, width: u32, height: u32) -> Result<Self, CaptureError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new_from(width, height, FrameFormat::MJPEG, 30),
        ));

        let camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| CaptureError::OpenFailed(e.to_string()))?;

        let native = camera.resolution();
        let output_size = fitted_size((native.width(), native.height()), (width, height));
        info!(
            "webcam {} open: native {}x{} @ {:?} fps, emitting {}x{}",
            index,
            native.width(),
            native.height(),
            camera.frame_rate(),
            output_size.0,
            output_size.1,
        );

        Ok(Self {
            camera,
            output_size,
            opened_at: Instant::now(),
            frames: 0,
            active: true,
        })
    }

    /// Available webcam devices, one `index: name` line per device.
    pub fn list_devices() -> Result<Vec<String>, CaptureError> {
        let devices = nokhwa::query(ApiBackend::Auto)
            .map_err(|e| CaptureError::DeviceNotFound(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|info| format!("{}: {}", info.index(), info.human_name()))
            .collect())
    }
}

impl CaptureSource for WebcamCapture {
    fn next_frame(&mut self) -> Result<Option<FrameData>, CaptureError> {
        if !self.active {
            return Ok(None);
        }

        let raw = self
            .camera
            .frame()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let decoded = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        let image = RgbImage::from_raw(decoded.width(), decoded.height(), decoded.into_raw())
            .ok_or_else(|| CaptureError::CaptureFailed("rgb buffer size mismatch".to_string()))?;
        let image = conform(image, self.output_size);

        self.frames += 1;
        let timestamp = self.opened_at.elapsed().as_secs_f64();
        debug!(
            "frame {} ({}x{}) at {:.3}s",
            self.frames,
            image.width(),
            image.height(),
            timestamp
        );

        Ok(Some(FrameData::new(image, timestamp, self.frames)))
    }

    fn frame_rate(&self) -> Option<f32> {
        Some(self.camera.frame_rate() as f32)
    }

    fn resolution(&self) -> (u32, u32) {
        self.output_size
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        self.active = false;
        info!("webcam capture stopped after {} frames", self.frames);
    }
}

/// Mirror into a selfie view and shrink to `output`. In the mirrored
/// frame a hand on the user's left lands on the left of the image, which
/// is what the steering mapping expects of `wrist.x`.
fn conform(image: RgbImage, output: (u32, u32)) -> RgbImage {
    let mirrored = imageops::flip_horizontal(&image);
    if (mirrored.width(), mirrored.height()) == output {
        mirrored
    } else {
        imageops::resize(&mirrored, output.0, output.1, FilterType::Triangle)
    }
}

/// Largest size fitting inside `target` at the source aspect ratio, or
/// the source size itself when it already fits. Never upscales.
fn fitted_size(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (source.0 as f32, source.1 as f32);
    let scale = (target.0 as f32 / sw).min(target.1 as f32 / sh);
    if scale >= 1.0 {
        source
    } else {
        (
            ((sw * scale).round() as u32).max(1),
            ((sh * scale).round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_fitted_size_shrinks_preserving_aspect() {
        assert_eq!(fitted_size((1920, 1080), (640, 480)), (640, 360));
        assert_eq!(fitted_size((1080, 1920), (640, 480)), (270, 480));
    }

    #[test]
    fn test_fitted_size_never_upscales() {
        assert_eq!(fitted_size((320, 240), (640, 480)), (320, 240));
        assert_eq!(fitted_size((640, 480), (640, 480)), (640, 480));
    }

    #[test]
    fn test_conform_mirrors_horizontally() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 0, 255]));

        let conformed = conform(image, (2, 1));
        assert_eq!(conformed.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(conformed.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_conform_resizes_to_output() {
        let image = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
        let conformed = conform(image, (4, 4));
        assert_eq!(conformed.dimensions(), (4, 4));
        assert_eq!(conformed.get_pixel(1, 1), &Rgb([10, 20, 30]));
    }
}
