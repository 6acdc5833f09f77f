//! Primitive shapes and their tessellation.
//!
//! Shapes follow the usual scene-graph conventions: every primitive is
//! centred on its local origin, round shapes stand along +Y, and the plane
//! lies in XY facing +Z.

mod tessellate;

use glam::Vec3;

use crate::error::SceneError;
use crate::math::AABB;

pub use tessellate::MeshData;

pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

fn positive(shape: &'static str, dimension: &'static str, value: f32) -> Result<f32, SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SceneError::InvalidDimension {
            shape,
            dimension,
            value,
        })
    }
}

fn non_negative(shape: &'static str, dimension: &'static str, value: f32) -> Result<f32, SceneError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SceneError::InvalidDimension {
            shape,
            dimension,
            value,
        })
    }
}

fn segments(shape: &'static str, radial_segments: u32) -> Result<u32, SceneError> {
    if radial_segments >= 3 {
        Ok(radial_segments)
    } else {
        Err(SceneError::InvalidSegments {
            shape,
            segments: radial_segments,
        })
    }
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Result<Self, SceneError> {
        Ok(Geometry::Box {
            width: positive("box", "width", width)?,
            height: positive("box", "height", height)?,
            depth: positive("box", "depth", depth)?,
        })
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32) -> Result<Self, SceneError> {
        Self::cylinder_with_segments(radius_top, radius_bottom, height, DEFAULT_RADIAL_SEGMENTS)
    }

    /// One of the two radii may be zero, not both
    pub fn cylinder_with_segments(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    ) -> Result<Self, SceneError> {
        let radius_top = non_negative("cylinder", "top radius", radius_top)?;
        let radius_bottom = non_negative("cylinder", "bottom radius", radius_bottom)?;
        positive("cylinder", "radius", radius_top.max(radius_bottom))?;

        Ok(Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height: positive("cylinder", "height", height)?,
            radial_segments: segments("cylinder", radial_segments)?,
        })
    }

    pub fn cone(radius: f32, height: f32) -> Result<Self, SceneError> {
        Self::cone_with_segments(radius, height, DEFAULT_RADIAL_SEGMENTS)
    }

    pub fn cone_with_segments(radius: f32, height: f32, radial_segments: u32) -> Result<Self, SceneError> {
        Ok(Geometry::Cone {
            radius: positive("cone", "radius", radius)?,
            height: positive("cone", "height", height)?,
            radial_segments: segments("cone", radial_segments)?,
        })
    }

    pub fn plane(width: f32, height: f32) -> Result<Self, SceneError> {
        Ok(Geometry::Plane {
            width: positive("plane", "width", width)?,
            height: positive("plane", "height", height)?,
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Box { .. } => "box",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Cone { .. } => "cone",
            Geometry::Plane { .. } => "plane",
        }
    }

    /// Bounds in the shape's own coordinate frame
    pub fn local_bounds(&self) -> AABB {
        let half = match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth) * 0.5,
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let radius = radius_top.max(radius_bottom);
                Vec3::new(radius, height * 0.5, radius)
            }
            Geometry::Cone { radius, height, .. } => Vec3::new(radius, height * 0.5, radius),
            Geometry::Plane { width, height } => Vec3::new(width * 0.5, height * 0.5, 0.0),
        };
        AABB::from_center_half_extents(Vec3::ZERO, half)
    }

    pub fn tessellate(&self) -> MeshData {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => MeshData::cuboid(Vec3::new(width, height, depth) * 0.5),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => MeshData::cylinder(radius_top, radius_bottom, height, radial_segments),
            Geometry::Cone {
                radius,
                height,
                radial_segments,
            } => MeshData::cylinder(0.0, radius, height, radial_segments),
            Geometry::Plane { width, height } => MeshData::plane(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_rejects_non_positive_dimensions() {
        assert!(Geometry::cuboid(6.0, 1.0, 3.0).is_ok());
        assert_eq!(
            Geometry::cuboid(6.0, 0.0, 3.0),
            Err(SceneError::InvalidDimension {
                shape: "box",
                dimension: "height",
                value: 0.0
            })
        );
        assert!(Geometry::cuboid(-1.0, 1.0, 1.0).is_err());
        assert!(Geometry::cuboid(1.0, 1.0, f32::NAN).is_err());
        assert!(Geometry::cuboid(1.0, f32::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_cylinder_allows_one_zero_radius() {
        assert!(Geometry::cylinder(0.0, 1.0, 2.0).is_ok());
        assert!(Geometry::cylinder(0.0, 0.0, 2.0).is_err());
        assert!(Geometry::cylinder(-0.5, 1.0, 2.0).is_err());
    }

    #[test]
    fn test_round_shapes_need_three_segments() {
        assert_eq!(
            Geometry::cone_with_segments(0.6, 1.0, 2),
            Err(SceneError::InvalidSegments {
                shape: "cone",
                segments: 2
            })
        );
        assert!(Geometry::cone_with_segments(0.6, 1.0, 3).is_ok());
    }

    #[test]
    fn test_plane_rejects_zero_width() {
        assert!(Geometry::plane(0.0, 1.0).is_err());
    }

    #[test]
    fn test_local_bounds() {
        let bed = Geometry::cuboid(6.0, 1.0, 3.0).unwrap().local_bounds();
        assert_eq!(bed.half_extents(), Vec3::new(3.0, 0.5, 1.5));
        assert_eq!(bed.center(), Vec3::ZERO);

        let rug = Geometry::cylinder(3.0, 3.0, 0.1).unwrap().local_bounds();
        assert_eq!(rug.half_extents(), Vec3::new(3.0, 0.05, 3.0));

        let shade = Geometry::cone(0.6, 1.0).unwrap().local_bounds();
        assert_eq!(shade.half_extents(), Vec3::new(0.6, 0.5, 0.6));

        let plane = Geometry::plane(2.0, 4.0).unwrap().local_bounds();
        assert_eq!(plane.half_extents(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_tessellation_stays_within_local_bounds() {
        let shapes = [
            Geometry::cuboid(1.5, 0.4, 1.0).unwrap(),
            Geometry::cylinder(0.2, 0.2, 0.5).unwrap(),
            Geometry::cone_with_segments(0.6, 1.0, 16).unwrap(),
            Geometry::plane(2.0, 3.0).unwrap(),
        ];

        for shape in &shapes {
            let bounds = shape.local_bounds();
            let slack = Vec3::splat(1e-5);
            for vertex in shape.tessellate().vertices {
                let p = Vec3::from_array(vertex.position);
                assert!(
                    p.cmpge(bounds.min - slack).all() && p.cmple(bounds.max + slack).all(),
                    "{} vertex {:?} outside {:?}",
                    shape.kind_name(),
                    p,
                    bounds
                );
            }
        }
    }
}
