//! Webcam-driven gesture mapping demo.
//!
//! Opens the first webcam, runs the gesture mapper and logs the control
//! axes. The detector here reports no hands; plug a real landmark
//! backend into the detector factory to drive the axes.

use joyride_gesture::{
    CaptureSource, DetectorError, FrameData, GestureMapper, HandDetector, TrackedHand,
    WebcamCapture,
};
use tracing::info;

struct NullDetector;

impl HandDetector for NullDetector {
    fn detect(&mut self, _frame: &FrameData) -> Result<Vec<TrackedHand>, DetectorError> {
        Ok(Vec::new())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    for device in WebcamCapture::list_devices()? {
        info!("found device {device}");
    }

    let mut mapper = GestureMapper::new(
        Box::new(|| WebcamCapture::new(0).map(|c| Box::new(c) as Box<dyn CaptureSource>)),
        Box::new(|| Ok(Box::new(NullDetector) as Box<dyn HandDetector>)),
    );
    mapper.enable()?;

    for _ in 0..300 {
        mapper.poll();
        let controls = mapper.controls();
        info!(
            "steering {:+.2} accelerating {:+.2} braking {} boosting {}",
            controls.steering, controls.accelerating, controls.braking, controls.boosting
        );
    }

    mapper.disable();
    Ok(())
}
