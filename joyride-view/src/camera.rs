use glam::{Mat3, Mat4, Quat, Vec3};

/// Camera pose resolved by the view each tick and consumed by the
/// renderer: world position, orientation and vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, fov: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov,
        }
    }

    /// Orient toward `target` with Y up. Falls back to a Z up vector when
    /// looking straight up or down so the basis stays well formed.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        self.rotation = look_rotation(forward);
    }

    /// Roll around the local view axis, applied after `look_at`.
    pub fn roll_by(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_z(angle);
    }

    /// View direction (camera looks down local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

/// Rotation looking along `forward` with Y up, right-handed.
pub fn look_rotation(forward: Vec3) -> Quat {
    let back = -forward;
    let mut right = Vec3::Y.cross(back);
    if right.length_squared() < 1e-8 {
        // Looking straight along Y; pick Z as the secondary up.
        right = Vec3::Z.cross(back);
    }
    let right = right.normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Perspective projection parameters shared by every rig.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self {
            fov,
            aspect,
            near: 0.1,
            far: 200.0,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-4);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Projection with a different field of view, same frustum otherwise.
    pub fn with_fov(&self, fov: f32) -> Self {
        Self { fov, ..*self }
    }
}

/// World-space offset from spherical coordinates, Y up: `phi` is the
/// polar angle from +Y, `theta` the azimuth around Y from +Z.
pub fn offset_from_spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}
