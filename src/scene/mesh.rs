use std::sync::Arc;

use glam::Vec3;

use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::math::{Color, AABB};

use super::material::Material;
use super::transform::Transform;

/// Geometry paired with a material. Cloning shares both.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry: Arc::new(geometry),
            material: Arc::new(material),
        }
    }

    pub fn shared(geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self { geometry, material }
    }

    /// Opaque box, the shape almost every piece of furniture is made of
    pub fn cuboid(width: f32, height: f32, depth: f32, color: Color) -> Result<Self, SceneError> {
        Ok(Self::new(Geometry::cuboid(width, height, depth)?, Material::lambert(color)))
    }

    pub fn local_bounds(&self) -> AABB {
        self.geometry.local_bounds()
    }

    pub fn shares_resources_with(&self, other: &Mesh) -> bool {
        Arc::ptr_eq(&self.geometry, &other.geometry) && Arc::ptr_eq(&self.material, &other.material)
    }
}

/// A mesh with the local transform it will be attached under
#[derive(Debug, Clone)]
pub struct PlacedMesh {
    pub mesh: Mesh,
    pub transform: Transform,
}

/// Stamps copies of one mesh at a fixed height.
///
/// Every placement shares the stamp's geometry and material, so four desk
/// legs cost one vertex buffer.
#[derive(Debug, Clone)]
pub struct MeshStamp {
    mesh: Mesh,
    height: f32,
}

impl MeshStamp {
    pub fn new(mesh: Mesh, height: f32) -> Self {
        Self { mesh, height }
    }

    pub fn at(&self, x: f32, z: f32) -> PlacedMesh {
        PlacedMesh {
            mesh: self.mesh.clone(),
            transform: Transform::from_translation(Vec3::new(x, self.height, z)),
        }
    }

    /// Placement at an explicit height, used for stacked rows like shelf books
    pub fn at_height(&self, x: f32, y: f32, z: f32) -> PlacedMesh {
        PlacedMesh {
            mesh: self.mesh.clone(),
            transform: Transform::from_xyz(x, y, z),
        }
    }
}
