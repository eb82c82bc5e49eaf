//! The view: owns the focus point and every camera rig, and resolves a
//! single authoritative camera pose each tick.

use glam::Vec3;
use joyride_core::maths::rotate_vec2;
use joyride_core::{Action, ActionKind, InputFrame, Quality, Tick, VehicleState, Viewport};
use tracing::info;

use crate::area::OptimalArea;
use crate::camera::{offset_from_spherical, CameraPose, Projection};
use crate::cinematic::Cinematic;
use crate::focus::FocusPoint;
use crate::mode::ViewMode;
use crate::rigs::{ChaseRig, FirstPersonRig, OrbitRig, SphericalRig, ThirdPersonRig, TopDownRig};
use crate::roll::RollSpring;
use crate::speedlines::SpeedLines;
use crate::zoom::Zoom;

/// Field of view of the default (isometric) rig in degrees.
const DEFAULT_FOV: f32 = 25.0;

#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    /// Landscape ratio the framing was tuned for; narrower viewports get
    /// a ratio-overflow compensation on radius and cinematic shots.
    pub ideal_ratio: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            ideal_ratio: 1920.0 / 1080.0,
        }
    }
}

/// Camera and focus-point control system. All rigs are allocated here at
/// construction; `update` resolves exactly one of them into the frame's
/// camera pose.
pub struct View {
    mode: ViewMode,
    quality: Quality,
    viewport: Viewport,
    ideal_ratio: f32,
    ratio_overflow: f32,
    projection: Projection,
    pub focus: FocusPoint,
    pub zoom: Zoom,
    pub spherical: SphericalRig,
    pub roll: RollSpring,
    third_person: ThirdPersonRig,
    top_down: TopDownRig,
    first_person: FirstPersonRig,
    chase: ChaseRig,
    free: OrbitRig,
    cinematic: Cinematic,
    optimal_area: OptimalArea,
    speed_lines: SpeedLines,
    default_pose: CameraPose,
    pose: CameraPose,
    last_vehicle_yaw: f32,
}

impl View {
    pub fn new(
        config: ViewConfig,
        viewport: Viewport,
        quality: Quality,
        spawn_position: Vec3,
    ) -> Self {
        let focus = FocusPoint::new(spawn_position);
        let spherical = SphericalRig::new(quality);
        let ratio_overflow = viewport.ratio_overflow(config.ideal_ratio);
        let projection = Projection::new(DEFAULT_FOV, viewport.ratio());

        let start = focus.smoothed_position
            + offset_from_spherical(spherical.radius, spherical.phi, spherical.theta);
        let mut default_pose = CameraPose::new(start, DEFAULT_FOV);
        default_pose.look_at(focus.smoothed_position);

        Self {
            mode: ViewMode::default(),
            quality,
            viewport,
            ideal_ratio: config.ideal_ratio,
            ratio_overflow,
            projection,
            focus,
            zoom: Zoom::new(),
            spherical,
            roll: RollSpring::new(),
            third_person: ThirdPersonRig::new(),
            top_down: TopDownRig::new(),
            first_person: FirstPersonRig::new(),
            chase: ChaseRig::new(),
            free: OrbitRig::new(),
            cinematic: Cinematic::new(),
            optimal_area: OptimalArea::new(),
            speed_lines: SpeedLines::new(),
            default_pose,
            pose: default_pose,
            last_vehicle_yaw: 0.0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Last resolved camera pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn optimal_area(&self) -> &OptimalArea {
        &self.optimal_area
    }

    pub fn speed_lines(&self) -> &SpeedLines {
        &self.speed_lines
    }

    pub fn speed_lines_mut(&mut self) -> &mut SpeedLines {
        &mut self.speed_lines
    }

    pub fn cinematic_progress(&self) -> f32 {
        self.cinematic.progress()
    }

    /// Depth-of-field strength tweened alongside the cinematic blend.
    pub fn dof_strength(&self) -> f32 {
        self.cinematic.dof_strength()
    }

    /// Jolt/landing feedback on the default rig.
    pub fn roll_kick(&mut self, strength: f32) {
        self.roll.kick(strength);
    }

    /// Switch mode and re-seed mode-local smoothing so the cut does not
    /// pop. Any mode transition is allowed, including mid-cinematic.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;

        self.focus.smoothed_position = self.focus.position;
        self.free.seed(self.pose.position, self.focus.position);

        match mode {
            ViewMode::ThirdPerson => {
                self.third_person.seed(self.pose.position, self.last_vehicle_yaw);
            }
            ViewMode::TopDown => self.top_down.seed(self.focus.position),
            ViewMode::FirstPerson => {
                self.first_person.seed(self.focus.position, self.last_vehicle_yaw);
            }
            _ => {}
        }
    }

    /// Advance to the next mode in the cycle.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.next());
        info!("camera: {}", self.mode.label());
    }

    /// React to a debounced input action from the router.
    pub fn handle_action(&mut self, action: &Action) {
        if action.kind.reacquires_focus() && action.active {
            self.focus.is_tracking = true;
            return;
        }

        match action.kind {
            ActionKind::Zoom => self.zoom.wheel(action.value),
            ActionKind::ZoomToggle => {
                if action.active {
                    self.zoom.toggle_press();
                } else {
                    self.zoom.toggle_release();
                }
            }
            ActionKind::ViewToggle => {
                if action.active {
                    self.toggle_mode();
                }
            }
            _ => {}
        }
    }

    /// Viewport change: aspect and ratio overflow update immediately.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.ratio_overflow = viewport.ratio_overflow(self.ideal_ratio);
        self.projection.set_aspect(viewport.ratio());
    }

    /// Throttled viewport change: the optimal area is worth recomputing.
    pub fn throttle_resize(&mut self) {
        self.optimal_area.invalidate();
    }

    /// Begin a cinematic shot from `position` toward `target`.
    pub fn cinematic_start(&mut self, position: Vec3, target: Vec3) {
        self.cinematic.start(position, target, self.ratio_overflow);
    }

    /// Release the cinematic shot back to the live camera.
    pub fn cinematic_end(&mut self) {
        self.cinematic.end();
    }

    /// Resolve this frame's camera pose from vehicle and input state.
    pub fn update(&mut self, tick: Tick, vehicle: &VehicleState, input: &InputFrame) -> CameraPose {
        // Tweens advance before anything reads them this frame.
        self.cinematic.advance(tick.delta);

        self.focus.tracked_position = vehicle.position;
        self.last_vehicle_yaw = vehicle.rotation_y;

        self.apply_manual_pan(tick, input);

        let focus_speed = self.focus.update(tick.delta);

        if self.mode == ViewMode::Isometric {
            self.zoom
                .update(focus_speed, self.focus.is_tracking, self.quality, tick.delta);
        }

        // Default rig: spherical orbit around the smoothed focus point,
        // roll applied after the look-at, cinematic blend on top.
        let offset = self
            .spherical
            .offset(self.zoom.smoothed_ratio, self.ratio_overflow);
        self.default_pose.position = self.focus.smoothed_position + offset;
        self.default_pose.fov = DEFAULT_FOV;
        self.default_pose.look_at(self.focus.smoothed_position);

        self.roll.advance(tick.delta_scaled);
        self.default_pose.roll_by(self.roll.value);

        self.cinematic.blend(&mut self.default_pose);

        self.pose = match self.mode {
            ViewMode::Isometric => self.default_pose,
            ViewMode::Free => self.free.update(input, tick.delta),
            ViewMode::ThirdPerson => self.third_person.update(
                self.focus.position,
                vehicle.rotation_y,
                vehicle.xz_speed,
                tick.delta,
            ),
            ViewMode::TopDown => self.top_down.update(self.focus.position, tick.delta),
            ViewMode::FirstPerson => {
                self.first_person
                    .update(self.focus.position, vehicle.rotation_y, tick.delta)
            }
            ViewMode::Cinematic => {
                self.chase
                    .update(self.focus.position, vehicle.xz_speed, tick.delta)
            }
        };

        // The footprint is always measured against the worst-case
        // zoomed-out default frustum, independent of the active mode.
        if self.optimal_area.needs_update() {
            let mut radius_max = self.spherical.radius_max(self.ratio_overflow);
            if self.quality == Quality::High {
                radius_max *= 1.0 - self.zoom.speed_amplitude;
            }
            self.optimal_area.recompute(
                &self.projection,
                radius_max,
                self.spherical.phi,
                self.spherical.theta,
            );
        }
        self.optimal_area
            .publish(self.focus.position, self.focus.smoothed_position);

        // Speed lines project through the active camera.
        let active_projection = self.projection.with_fov(self.pose.fov);
        let view_proj = active_projection.matrix() * self.pose.view_matrix();
        self.speed_lines.update(tick.delta, &view_proj);

        self.pose
    }

    fn apply_manual_pan(&mut self, tick: Tick, input: &InputFrame) {
        if self.mode != ViewMode::Isometric {
            return;
        }

        // Secondary stick pans the map, but never during a cinematic.
        if !self.cinematic.active {
            if let Some(stick) = input.right_stick {
                let movement =
                    rotate_vec2(stick, -self.spherical.theta) * (20.0 * tick.delta);
                self.focus.pan(movement);
            }
        }

        if let Some(drag) = input.pointer_drag {
            if drag.pans_map() {
                let movement = rotate_vec2(drag.delta, -self.spherical.theta)
                    * (10.0 / self.viewport.smallest_side());
                self.focus.pan(-movement * 2.0);
            }
            self.zoom.pinch(input.pinch_delta);
        }
    }
}
