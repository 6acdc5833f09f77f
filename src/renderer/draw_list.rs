use std::cmp::Ordering;

use glam::{Mat3, Mat4};

use crate::camera::Camera;
use crate::scene::{GeometryId, MeshInstance, NodeId, Scene};
use crate::types::{CameraUniform, InstanceData, LightUniform};

/// One mesh to draw with the vertex and index buffers of `geometry`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub node: NodeId,
    pub geometry: GeometryId,
    pub instance: InstanceData,
    pub transparent: bool,
    /// View-space depth of the mesh bounds centre, more negative is farther away
    pub view_depth: f32,
}

/// Everything a render target needs for one frame.
///
/// Building it only reads the scene and camera, so the same inputs always
/// produce an equal list. Opaque draws keep scene order; transparent draws
/// come after them, farthest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub camera: CameraUniform,
    pub lights: LightUniform,
    /// Linear RGBA
    pub clear_color: [f32; 4],
    pub draws: Vec<Draw>,
}

impl DrawList {
    pub fn build(scene: &Scene, camera: &Camera) -> Self {
        let view = camera.view_matrix();

        let (mut transparent, opaque): (Vec<Draw>, Vec<Draw>) = scene
            .mesh_instances()
            .map(|instance| Self::draw_for(&instance, &view))
            .partition(|draw| draw.transparent);

        transparent.sort_by(|a, b| {
            a.view_depth
                .partial_cmp(&b.view_depth)
                .unwrap_or(Ordering::Equal)
        });

        let mut draws = opaque;
        draws.extend(transparent);

        let [r, g, b] = scene.background().to_linear();
        Self {
            camera: camera.to_uniform(),
            lights: scene.lights().to_uniform(),
            clear_color: [r, g, b, 1.0],
            draws,
        }
    }

    pub fn opaque(&self) -> impl Iterator<Item = &Draw> {
        self.draws.iter().filter(|d| !d.transparent)
    }

    pub fn transparent(&self) -> impl Iterator<Item = &Draw> {
        self.draws.iter().filter(|d| d.transparent)
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    fn draw_for(instance: &MeshInstance<'_>, view: &Mat4) -> Draw {
        let world = instance.world;
        let normal = Mat3::from_mat4(world).inverse().transpose();
        let centre = instance.mesh.local_bounds().transformed(&world).center();

        Draw {
            node: instance.node,
            geometry: instance.geometry,
            instance: InstanceData {
                model: world.to_cols_array_2d(),
                normal: [
                    normal.x_axis.extend(0.0).to_array(),
                    normal.y_axis.extend(0.0).to_array(),
                    normal.z_axis.extend(0.0).to_array(),
                ],
                color: instance.mesh.material.linear_rgba(),
            },
            transparent: instance.mesh.material.transparent,
            view_depth: view.transform_point3(centre).z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use crate::scene::{Material, Mesh, SceneBuilder, Transform};
    use crate::geometry::Geometry;
    use glam::Vec3;

    fn glass(opacity: f32) -> Mesh {
        Mesh::new(
            Geometry::cuboid(1.0, 1.0, 0.1).unwrap(),
            Material::translucent(Color(0x87ceeb), opacity).unwrap(),
        )
    }

    fn scene() -> Scene {
        let mut builder = SceneBuilder::new().with_background(Color::WHITE);
        let root = builder.root();
        builder.add_mesh(root, "near_glass", glass(0.5), Transform::from_xyz(0.0, 0.0, -2.0));
        builder.add_mesh(root, "wall", Mesh::cuboid(1.0, 1.0, 1.0, Color::WHITE).unwrap(), Transform::IDENTITY);
        builder.add_mesh(root, "far_glass", glass(0.6), Transform::from_xyz(0.0, 0.0, -8.0));
        builder.add_mesh(root, "floor", Mesh::cuboid(4.0, 0.1, 4.0, Color::BLACK).unwrap(), Transform::IDENTITY);
        builder.build()
    }

    fn camera() -> Camera {
        Camera::new(75.0, 1.0, 0.1, 100.0).with_position(Vec3::new(0.0, 0.0, 5.0))
    }

    #[test]
    fn test_opaque_first_in_scene_order() {
        let scene = scene();
        let list = DrawList::build(&scene, &camera());
        let names: Vec<&str> = list
            .draws
            .iter()
            .map(|d| scene.node(d.node).name.as_str())
            .collect();
        assert_eq!(names, ["wall", "floor", "far_glass", "near_glass"]);
    }

    #[test]
    fn test_transparent_sorted_back_to_front() {
        let list = DrawList::build(&scene(), &camera());
        let depths: Vec<f32> = list.transparent().map(|d| d.view_depth).collect();
        assert_eq!(depths.len(), 2);
        assert!(depths[0] < depths[1]);
        assert_eq!(list.opaque().count(), 2);
    }

    #[test]
    fn test_building_twice_is_identical() {
        let scene = scene();
        let camera = camera();
        assert_eq!(DrawList::build(&scene, &camera), DrawList::build(&scene, &camera));
    }

    #[test]
    fn test_instance_carries_world_matrix_and_alpha() {
        let scene = scene();
        let list = DrawList::build(&scene, &camera());
        let far = list
            .draws
            .iter()
            .find(|d| d.node == scene.find("far_glass").unwrap())
            .unwrap();

        assert_eq!(
            far.instance.model,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0)).to_cols_array_2d()
        );
        assert_eq!(far.instance.color[3], 0.6);
        assert!(list.clear_color.iter().all(|c| (c - 1.0).abs() < 1e-6));
    }
}
