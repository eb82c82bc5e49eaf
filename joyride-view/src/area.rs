//! Optimal area: the ground-plane footprint the default rig frames at its
//! worst-case zoomed-out radius. Dependent systems (spawning, detail
//! selection) read it as a conservative visibility bound.

use glam::{Mat4, Vec2, Vec3};
use tracing::debug;

use crate::camera::{offset_from_spherical, CameraPose, Projection};

/// Lazily recomputed ground footprint. The expensive unprojection only
/// runs when `needs_update` was raised (resize, throttled), never every
/// frame; per-tick publishing just offsets the cached base values by the
/// live focus position.
#[derive(Debug, Clone)]
pub struct OptimalArea {
    needs_update: bool,
    base_center: Vec3,
    center: Vec3,
    corner_bases: [Vec2; 4],
    corners: [Vec2; 4],
    radius: f32,
    near_distance: f32,
    far_distance: f32,
}

impl OptimalArea {
    pub fn new() -> Self {
        Self {
            needs_update: true,
            base_center: Vec3::ZERO,
            center: Vec3::ZERO,
            corner_bases: [Vec2::ZERO; 4],
            corners: [Vec2::ZERO; 4],
            radius: 0.0,
            near_distance: 0.0,
            far_distance: 0.0,
        }
    }

    /// Raise the dirty flag; the next tick recomputes.
    pub fn invalidate(&mut self) {
        self.needs_update = true;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Recompute the footprint by intersecting the four frustum corner
    /// rays of a camera at `radius_max` with the ground plane. Degenerate
    /// rays (parallel to the plane) keep the previous cached values.
    pub fn recompute(&mut self, projection: &Projection, radius_max: f32, phi: f32, theta: f32) {
        let mut camera = CameraPose::new(
            offset_from_spherical(radius_max, phi, theta),
            projection.fov,
        );
        camera.look_at(Vec3::ZERO);

        let inverse_view_proj = (projection.matrix() * camera.view_matrix()).inverse();

        // Near-bottom, far-right, far-top, near-left in NDC, plus the two
        // mid rays for the near/far distances.
        let ndc_corners = [
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(-1.0, -1.0),
        ];

        let mut hits = [Vec3::ZERO; 4];
        for (hit, ndc) in hits.iter_mut().zip(ndc_corners) {
            match intersect_ground(&inverse_view_proj, ndc) {
                Some(point) => *hit = point,
                None => {
                    debug!("optimal area ray missed the ground plane, keeping cache");
                    self.needs_update = false;
                    return;
                }
            }
        }

        let (mid_near, mid_far) = match (
            intersect_ground(&inverse_view_proj, Vec2::new(0.0, -1.0)),
            intersect_ground(&inverse_view_proj, Vec2::new(0.0, 1.0)),
        ) {
            (Some(near), Some(far)) => (near, far),
            _ => {
                debug!("optimal area mid ray missed the ground plane, keeping cache");
                self.needs_update = false;
                return;
            }
        };

        // Center of the quad from the midpoints of its two diagonals.
        let center_a = hits[0].lerp(hits[2], 0.5);
        let center_b = hits[3].lerp(hits[1], 0.5);
        self.base_center = center_a.lerp(center_b, 0.5);
        for (base, hit) in self.corner_bases.iter_mut().zip(hits) {
            *base = Vec2::new(hit.x, hit.z);
        }

        self.radius = self.base_center.distance(hits[1]);
        self.near_distance = camera.position.distance(mid_near);
        self.far_distance = camera.position.distance(mid_far);
        self.needs_update = false;
    }

    /// Per-tick publish: offset the cached bases by the live focus point.
    pub fn publish(&mut self, focus_position: Vec3, smoothed_position: Vec3) {
        self.center = self.base_center
            + Vec3::new(smoothed_position.x, 0.0, smoothed_position.z);
        for (corner, base) in self.corners.iter_mut().zip(self.corner_bases) {
            *corner = base + Vec2::new(focus_position.x, focus_position.z);
        }
    }

    /// World-space footprint center on the ground plane.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Footprint corners on the ground plane (x, z).
    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    /// Distance from the footprint center to its farthest corner.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Camera distance to the nearest framed ground point.
    pub fn near_distance(&self) -> f32 {
        self.near_distance
    }

    /// Camera distance to the farthest framed ground point.
    pub fn far_distance(&self) -> f32 {
        self.far_distance
    }
}

impl Default for OptimalArea {
    fn default() -> Self {
        Self::new()
    }
}

/// Cast the camera ray through an NDC point and intersect the y = 0
/// plane. Returns `None` when the ray is parallel or points away.
fn intersect_ground(inverse_view_proj: &Mat4, ndc: Vec2) -> Option<Vec3> {
    let near = inverse_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inverse_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    let direction = (far - near).normalize_or_zero();

    if direction.y.abs() < 1e-6 {
        return None;
    }
    let t = -near.y / direction.y;
    if t < 0.0 {
        return None;
    }
    Some(near + direction * t)
}
