use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local transform of a scene node.
///
/// Rotation is stored as XYZ Euler angles in radians, applied X first
/// in the node's own frame, matching how scene scripts set `rotation.x`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, euler_xyz: Vec3) -> Self {
        self.rotation = euler_xyz;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        if self.rotation == Vec3::ZERO && self.scale == Vec3::ONE {
            return Mat4::from_translation(self.position);
        }
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}
