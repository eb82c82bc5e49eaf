//! Gesture control mapper: turns per-frame hand landmark detections into
//! the four continuous vehicle control axes.

use joyride_core::{Action, ActionKind};
use tracing::{debug, error, info};

use crate::landmarks::TrackedHand;
use crate::source::{CaptureError, CaptureSource, DetectorError, HandDetector};
use thiserror::Error;

/// Lifecycle of the mapper. `Ready` and `Tracking` alternate per
/// processed frame depending on whether a hand is in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureStatus {
    #[default]
    Idle,
    Initializing,
    Ready,
    Tracking,
    Error,
}

/// The mapper's output axes. Written whole once per processed frame by
/// the detection loop and read-only everywhere else, so a reader never
/// observes a partially updated set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureControls {
    /// -1 (left) to 1 (right).
    pub steering: f32,
    /// -1 (full reverse) to 1 (full forward).
    pub accelerating: f32,
    /// 0 or 1, no smoothing.
    pub braking: f32,
    /// 0 or 1; two detected hands boost.
    pub boosting: f32,
}

impl GestureControls {
    /// Threshold below which an axis is considered released.
    const ACTIVATION: f32 = 0.05;

    /// Translate the axes into the named actions the control core
    /// consumes, with analog payloads for the continuous axes.
    pub fn to_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.steering < -Self::ACTIVATION {
            actions.push(Action::with_value(ActionKind::Left, -self.steering));
        } else if self.steering > Self::ACTIVATION {
            actions.push(Action::with_value(ActionKind::Right, self.steering));
        }

        if self.accelerating > Self::ACTIVATION {
            actions.push(Action::with_value(ActionKind::Forward, self.accelerating));
        } else if self.accelerating < -Self::ACTIVATION {
            actions.push(Action::with_value(ActionKind::Backward, -self.accelerating));
        }

        if self.braking > 0.5 {
            actions.push(Action::start(ActionKind::Brake));
        }
        if self.boosting > 0.5 {
            actions.push(Action::start(ActionKind::Boost));
        }

        actions
    }
}

/// Lifecycle notifications, drained by the caller each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Enabled,
    Disabled,
    HandDetected,
    HandLost,
    HandUpdate,
}

/// Tuning for the landmark-to-axis mapping.
#[derive(Debug, Clone, Copy)]
pub struct GestureSettings {
    /// First-order smoothing factor for steering and acceleration.
    pub smoothing: f32,
    /// Symmetric steering dead zone half-width.
    pub dead_zone: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            smoothing: 0.3,
            dead_zone: 0.15,
        }
    }
}

/// Acquisition failure: terminal for this enable attempt, never retried
/// automatically.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("capture acquisition failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("detector acquisition failed: {0}")]
    Detector(#[from] DetectorError),
}

pub type CaptureFactory = Box<dyn FnMut() -> Result<Box<dyn CaptureSource>, CaptureError>>;
pub type DetectorFactory = Box<dyn FnMut() -> Result<Box<dyn HandDetector>, DetectorError>>;

/// Gesture-derived input mapper. The detection step runs in its own
/// per-animation-frame loop via [`poll`](Self::poll); the only state it
/// shares with the tick loop is the [`GestureControls`] snapshot and the
/// hand count.
pub struct GestureMapper {
    settings: GestureSettings,
    status: GestureStatus,
    enabled: bool,
    capture_factory: CaptureFactory,
    detector_factory: DetectorFactory,
    capture: Option<Box<dyn CaptureSource>>,
    /// The detection backend is expensive to load and kept across
    /// disable/enable cycles.
    detector: Option<Box<dyn HandDetector>>,
    controls: GestureControls,
    hands_count: usize,
    last_timestamp: f64,
    events: Vec<GestureEvent>,
}

impl GestureMapper {
    pub fn new(capture_factory: CaptureFactory, detector_factory: DetectorFactory) -> Self {
        Self {
            settings: GestureSettings::default(),
            status: GestureStatus::Idle,
            enabled: false,
            capture_factory,
            detector_factory,
            capture: None,
            detector: None,
            controls: GestureControls::default(),
            hands_count: 0,
            last_timestamp: -1.0,
            events: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: GestureSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn status(&self) -> GestureStatus {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current output axes snapshot.
    pub fn controls(&self) -> GestureControls {
        self.controls
    }

    pub fn hands_count(&self) -> usize {
        self.hands_count
    }

    /// Drain queued lifecycle events.
    pub fn take_events(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Flip between enabled and disabled.
    pub fn toggle(&mut self) -> Result<(), GestureError> {
        if self.enabled {
            self.disable();
            Ok(())
        } else {
            self.enable()
        }
    }

    /// Acquire the detection backend and the capture device. Any failure
    /// is terminal for this attempt: the mapper tears down completely and
    /// lands in `Error` until the caller re-invokes `enable`.
    pub fn enable(&mut self) -> Result<(), GestureError> {
        if self.enabled {
            return Ok(());
        }

        self.status = GestureStatus::Initializing;

        if self.detector.is_none() {
            match (self.detector_factory)() {
                Ok(detector) => self.detector = Some(detector),
                Err(err) => {
                    error!("hand tracking initialization failed: {err}");
                    self.teardown(GestureStatus::Error);
                    return Err(err.into());
                }
            }
        }

        match (self.capture_factory)() {
            Ok(capture) => self.capture = Some(capture),
            Err(err) => {
                error!("hand tracking camera acquisition failed: {err}");
                self.teardown(GestureStatus::Error);
                return Err(err.into());
            }
        }

        self.enabled = true;
        self.last_timestamp = -1.0;
        self.status = GestureStatus::Ready;
        self.events.push(GestureEvent::Enabled);
        info!("hand tracking enabled");
        Ok(())
    }

    /// Stop the detection loop, release the capture device and zero the
    /// output axes.
    pub fn disable(&mut self) {
        if !self.enabled && self.status != GestureStatus::Error {
            return;
        }

        self.teardown(GestureStatus::Idle);
        self.events.push(GestureEvent::Disabled);
        info!("hand tracking disabled");
    }

    fn teardown(&mut self, status: GestureStatus) {
        if let Some(capture) = self.capture.as_mut() {
            capture.stop();
        }
        self.capture = None;
        self.enabled = false;
        self.controls = GestureControls::default();
        self.hands_count = 0;
        self.status = status;
    }

    /// One detection-loop step. Frames with a repeated media timestamp
    /// are skipped, never processed twice; a failed detection pass counts
    /// as "no hands" for that frame so the loop stays alive.
    pub fn poll(&mut self) {
        if !self.enabled {
            return;
        }

        let frame = match self.capture.as_mut() {
            Some(capture) => match capture.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => return,
                Err(err) => {
                    debug!("capture read failed, skipping frame: {err}");
                    return;
                }
            },
            None => return,
        };

        if frame.timestamp == self.last_timestamp {
            return;
        }
        self.last_timestamp = frame.timestamp;

        let hands = match self.detector.as_mut() {
            Some(detector) => match detector.detect(&frame) {
                Ok(hands) => hands,
                Err(err) => {
                    debug!("detection pass failed, treating as no hands: {err}");
                    Vec::new()
                }
            },
            None => return,
        };

        self.process_hands(&hands);
    }

    fn process_hands(&mut self, hands: &[TrackedHand]) {
        let was_active = self.hands_count > 0;
        self.hands_count = hands.len();

        let mut next = self.controls;

        if let Some(primary) = hands.first() {
            self.status = GestureStatus::Tracking;

            let landmarks = &primary.landmarks;

            // Steering from the wrist's horizontal position, dead-zoned
            // and rescaled so the output is continuous at the edge.
            let mut raw = (landmarks.wrist.x - 0.5) * 2.0;
            if raw.abs() < self.settings.dead_zone {
                raw = 0.0;
            } else {
                raw = (raw - raw.signum() * self.settings.dead_zone)
                    / (1.0 - self.settings.dead_zone);
            }
            raw = raw.clamp(-1.0, 1.0);
            next.steering += (raw - next.steering) * self.settings.smoothing;

            // Open palm accelerates, tilt flips it into reverse.
            let openness = landmarks.openness();
            let mut target = 0.0;
            if openness > 0.5 {
                let strength = ((openness - 0.5) * 2.0).powf(1.5);
                target = if landmarks.is_reversing() {
                    -strength
                } else {
                    strength
                };
            }
            next.accelerating += (target - next.accelerating) * self.settings.smoothing;

            // Closed fist brakes, two hands boost; both are hard edges.
            next.braking = if openness < 0.3 { 1.0 } else { 0.0 };
            next.boosting = if self.hands_count >= 2 { 1.0 } else { 0.0 };

            if !was_active {
                self.events.push(GestureEvent::HandDetected);
            }
        } else {
            self.status = GestureStatus::Ready;

            next.steering *= 0.9;
            next.accelerating *= 0.9;
            next.braking = 0.0;
            next.boosting = 0.0;

            if was_active {
                self.events.push(GestureEvent::HandLost);
            }
        }

        // Single whole-struct write; readers never see a torn update.
        self.controls = next;
        self.events.push(GestureEvent::HandUpdate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{HandLandmarks, Handedness, Landmark, TrackedHand};
    use crate::source::FrameData;
    use image::RgbImage;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted capture source: yields one frame per call with an
    /// advancing timestamp.
    struct ScriptedCapture {
        timestamp: Rc<RefCell<f64>>,
        advance: bool,
        frame_number: u64,
        active: bool,
    }

    impl CaptureSource for ScriptedCapture {
        fn next_frame(&mut self) -> Result<Option<FrameData>, CaptureError> {
            if self.advance {
                *self.timestamp.borrow_mut() += 1.0 / 30.0;
            }
            self.frame_number += 1;
            Ok(Some(FrameData::new(
                RgbImage::new(4, 4),
                *self.timestamp.borrow(),
                self.frame_number,
            )))
        }

        fn frame_rate(&self) -> Option<f32> {
            Some(30.0)
        }

        fn resolution(&self) -> (u32, u32) {
            (4, 4)
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn stop(&mut self) {
            self.active = false;
        }
    }

    /// Scripted detector: pops the next hand list from a shared queue.
    struct ScriptedDetector {
        script: Rc<RefCell<Vec<Vec<TrackedHand>>>>,
    }

    impl HandDetector for ScriptedDetector {
        fn detect(&mut self, _frame: &FrameData) -> Result<Vec<TrackedHand>, DetectorError> {
            let mut script = self.script.borrow_mut();
            if script.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(script.remove(0))
            }
        }
    }

    fn hand(wrist_x: f32, spread: f32) -> TrackedHand {
        let wrist = Landmark::new(wrist_x, 0.7);
        let tip = |dx: f32, dy: f32| Landmark::new(wrist.x + dx * spread, wrist.y + dy * spread);
        TrackedHand {
            landmarks: HandLandmarks {
                wrist,
                thumb_tip: tip(-0.7, -0.7),
                index_tip: tip(-0.2, -1.0),
                middle_tip: tip(0.0, -1.0),
                pinky_tip: tip(0.7, -0.7),
                middle_mcp: tip(0.0, -0.4),
            },
            handedness: Handedness::Right,
        }
    }

    fn mapper_with_script(
        script: Vec<Vec<TrackedHand>>,
    ) -> (GestureMapper, Rc<RefCell<Vec<Vec<TrackedHand>>>>) {
        let script = Rc::new(RefCell::new(script));
        let script_handle = Rc::clone(&script);
        let timestamp = Rc::new(RefCell::new(0.0));

        let capture_factory: CaptureFactory = Box::new(move || {
            Ok(Box::new(ScriptedCapture {
                timestamp: Rc::clone(&timestamp),
                advance: true,
                frame_number: 0,
                active: true,
            }) as Box<dyn CaptureSource>)
        });
        let detector_factory: DetectorFactory = Box::new(move || {
            Ok(Box::new(ScriptedDetector {
                script: Rc::clone(&script_handle),
            }) as Box<dyn HandDetector>)
        });

        (GestureMapper::new(capture_factory, detector_factory), script)
    }

    #[test]
    fn test_controls_translate_to_actions() {
        let controls = GestureControls {
            steering: -0.6,
            accelerating: 0.8,
            braking: 0.0,
            boosting: 1.0,
        };
        let actions = controls.to_actions();
        assert!(actions.contains(&Action::with_value(ActionKind::Left, 0.6)));
        assert!(actions.contains(&Action::with_value(ActionKind::Forward, 0.8)));
        assert!(actions.contains(&Action::start(ActionKind::Boost)));
        assert!(!actions.iter().any(|a| a.kind == ActionKind::Brake));

        // Near-zero axes emit nothing.
        assert!(GestureControls::default().to_actions().is_empty());
    }

    #[test]
    fn test_enable_then_disable_resets_everything() {
        let (mut mapper, _script) = mapper_with_script(vec![vec![hand(0.9, 1.0)]]);
        assert_eq!(mapper.status(), GestureStatus::Idle);

        mapper.enable().unwrap();
        assert_eq!(mapper.status(), GestureStatus::Ready);
        mapper.poll();
        assert_eq!(mapper.status(), GestureStatus::Tracking);
        assert!(mapper.controls().steering > 0.0);

        mapper.disable();
        assert_eq!(mapper.status(), GestureStatus::Idle);
        assert_eq!(mapper.controls(), GestureControls::default());
        assert_eq!(mapper.hands_count(), 0);

        let events = mapper.take_events();
        assert!(events.contains(&GestureEvent::Enabled));
        assert!(events.contains(&GestureEvent::Disabled));
    }

    #[test]
    fn test_acquisition_failure_is_terminal() {
        let capture_factory: CaptureFactory =
            Box::new(|| Err(CaptureError::PermissionDenied("denied".into())));
        let detector_factory: DetectorFactory = Box::new(|| {
            Ok(Box::new(ScriptedDetector {
                script: Rc::new(RefCell::new(Vec::new())),
            }) as Box<dyn HandDetector>)
        });
        let mut mapper = GestureMapper::new(capture_factory, detector_factory);

        assert!(mapper.enable().is_err());
        assert_eq!(mapper.status(), GestureStatus::Error);
        assert!(!mapper.is_enabled());

        // No automatic retry; poll is inert until re-enabled.
        mapper.poll();
        assert_eq!(mapper.status(), GestureStatus::Error);
    }

    #[test]
    fn test_dead_zone_snaps_and_stays_continuous() {
        // Wrist at 0.55 -> raw 0.1, inside the 0.15 dead zone.
        let (mut mapper, _script) = mapper_with_script(vec![
            vec![hand(0.55, 1.0)],
            vec![hand(0.5 + (0.151) / 2.0, 1.0)],
        ]);
        mapper.enable().unwrap();

        mapper.poll();
        assert_eq!(mapper.controls().steering, 0.0);

        // Just past the edge: output continuous, approximately zero.
        mapper.poll();
        let steering = mapper.controls().steering;
        assert!(steering > 0.0);
        assert!(steering < 0.005);
    }

    #[test]
    fn test_hand_loss_decays_steering_and_resets_digitals() {
        let mut frames = vec![vec![hand(1.0, 0.05)]; 60];
        frames.push(Vec::new());
        let (mut mapper, _script) = mapper_with_script(frames);
        mapper.enable().unwrap();

        for _ in 0..60 {
            mapper.poll();
        }
        let before = mapper.controls();
        assert!(before.steering > 0.95);
        assert_eq!(before.braking, 1.0);

        mapper.poll();
        let after = mapper.controls();
        assert!((after.steering - before.steering * 0.9).abs() < 1e-6);
        assert!((after.accelerating - before.accelerating * 0.9).abs() < 1e-6);
        assert_eq!(after.braking, 0.0);
        assert_eq!(after.boosting, 0.0);
        assert_eq!(mapper.status(), GestureStatus::Ready);
    }

    #[test]
    fn test_hand_edge_events_fire_once() {
        let (mut mapper, _script) = mapper_with_script(vec![
            Vec::new(),
            vec![hand(0.5, 1.0)],
            vec![hand(0.5, 1.0)],
            Vec::new(),
            Vec::new(),
        ]);
        mapper.enable().unwrap();
        for _ in 0..5 {
            mapper.poll();
        }

        let events = mapper.take_events();
        let detected = events
            .iter()
            .filter(|e| **e == GestureEvent::HandDetected)
            .count();
        let lost = events
            .iter()
            .filter(|e| **e == GestureEvent::HandLost)
            .count();
        let updates = events
            .iter()
            .filter(|e| **e == GestureEvent::HandUpdate)
            .count();
        assert_eq!(detected, 1);
        assert_eq!(lost, 1);
        assert_eq!(updates, 5);
    }

    #[test]
    fn test_two_hands_boost_one_hand_does_not() {
        let (mut mapper, _script) = mapper_with_script(vec![
            vec![hand(0.5, 1.0), hand(0.4, 1.0)],
            vec![hand(0.5, 1.0)],
        ]);
        mapper.enable().unwrap();

        mapper.poll();
        assert_eq!(mapper.controls().boosting, 1.0);

        mapper.poll();
        assert_eq!(mapper.controls().boosting, 0.0);
    }

    #[test]
    fn test_open_palm_accelerates_fist_brakes() {
        let mut frames = vec![vec![hand(0.5, 1.0)]; 60];
        frames.extend(vec![vec![hand(0.5, 0.05)]; 2]);
        let (mut mapper, _script) = mapper_with_script(frames);
        mapper.enable().unwrap();

        for _ in 0..60 {
            mapper.poll();
        }
        let open = mapper.controls();
        assert!(open.accelerating > 0.9);
        assert_eq!(open.braking, 0.0);

        mapper.poll();
        assert_eq!(mapper.controls().braking, 1.0);
    }

    #[test]
    fn test_reverse_gesture_negates_acceleration() {
        let mut reversed = hand(0.5, 1.0);
        reversed.landmarks.middle_tip.y = reversed.landmarks.wrist.y + 0.1;
        // Keep the palm open despite the flipped middle tip.
        reversed.landmarks.index_tip.y = reversed.landmarks.wrist.y - 1.0;

        let (mut mapper, _script) = mapper_with_script(vec![vec![reversed]; 60]);
        mapper.enable().unwrap();
        for _ in 0..60 {
            mapper.poll();
        }
        assert!(mapper.controls().accelerating < 0.0);
    }

    #[test]
    fn test_duplicate_timestamps_are_skipped() {
        let script = Rc::new(RefCell::new(vec![vec![hand(1.0, 1.0)]; 10]));
        let script_handle = Rc::clone(&script);
        let timestamp = Rc::new(RefCell::new(1.0));

        let capture_factory: CaptureFactory = Box::new(move || {
            Ok(Box::new(ScriptedCapture {
                timestamp: Rc::clone(&timestamp),
                advance: false,
                frame_number: 0,
                active: true,
            }) as Box<dyn CaptureSource>)
        });
        let detector_factory: DetectorFactory = Box::new(move || {
            Ok(Box::new(ScriptedDetector {
                script: Rc::clone(&script_handle),
            }) as Box<dyn HandDetector>)
        });
        let mut mapper = GestureMapper::new(capture_factory, detector_factory);
        mapper.enable().unwrap();

        // Same media timestamp on every frame: only the first is
        // processed.
        for _ in 0..10 {
            mapper.poll();
        }
        assert_eq!(script.borrow().len(), 9);
    }

    #[test]
    fn test_transient_detector_error_counts_as_no_hands() {
        struct FailingDetector;
        impl HandDetector for FailingDetector {
            fn detect(&mut self, _frame: &FrameData) -> Result<Vec<TrackedHand>, DetectorError> {
                Err(DetectorError::DetectFailed("oom".into()))
            }
        }

        let timestamp = Rc::new(RefCell::new(0.0));
        let capture_factory: CaptureFactory = Box::new(move || {
            Ok(Box::new(ScriptedCapture {
                timestamp: Rc::clone(&timestamp),
                advance: true,
                frame_number: 0,
                active: true,
            }) as Box<dyn CaptureSource>)
        });
        let detector_factory: DetectorFactory =
            Box::new(|| Ok(Box::new(FailingDetector) as Box<dyn HandDetector>));
        let mut mapper = GestureMapper::new(capture_factory, detector_factory);
        mapper.enable().unwrap();

        mapper.poll();
        // Loop stays alive, mapper simply reports no hands.
        assert!(mapper.is_enabled());
        assert_eq!(mapper.status(), GestureStatus::Ready);
        assert_eq!(mapper.hands_count(), 0);
    }
}
