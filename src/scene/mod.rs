//! Retained scene graph.
//!
//! A [`SceneBuilder`] collects groups and meshes into a tree; `build()` freezes
//! it into a [`Scene`] with precomputed world matrices. Nothing mutates a scene
//! after that, the render loop only reads it.

mod builder;
mod light;
mod material;
mod mesh;
mod node;
mod transform;

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::geometry::Geometry;
use crate::math::{Color, AABB};

pub use builder::SceneBuilder;
pub use light::{AmbientLight, Lights, PointLight};
pub use material::Material;
pub use mesh::{Mesh, MeshStamp, PlacedMesh};
pub use node::{GeometryId, Node, NodeId, NodeKind};
pub use transform::Transform;

/// One mesh as seen from the root: what a renderer needs to draw it
#[derive(Debug, Clone, Copy)]
pub struct MeshInstance<'a> {
    pub node: NodeId,
    pub mesh: &'a Mesh,
    pub geometry: GeometryId,
    pub world: Mat4,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    world: Vec<Mat4>,
    geometries: Vec<Arc<Geometry>>,
    lights: Lights,
    background: Color,
}

impl Scene {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_group()).count()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First node with this name, in creation order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Unique geometries, indexed by [`GeometryId`]
    pub fn geometries(&self) -> &[Arc<Geometry>] {
        &self.geometries
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.world[id.0]
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world[id.0].transform_point3(Vec3::ZERO)
    }

    /// World-space bounds of a node and everything below it; `None` for empty groups
    pub fn world_bounds(&self, id: NodeId) -> Option<AABB> {
        let node = &self.nodes[id.0];
        let own = node
            .mesh()
            .map(|mesh| mesh.local_bounds().transformed(&self.world[id.0]));

        node.children
            .iter()
            .filter_map(|&child| self.world_bounds(child))
            .fold(own, |acc, bounds| match acc {
                Some(acc) => Some(acc.union(&bounds)),
                None => Some(bounds),
            })
    }

    /// Meshes in creation order with their world matrices
    pub fn mesh_instances(&self) -> impl Iterator<Item = MeshInstance<'_>> + '_ {
        self.nodes.iter().enumerate().filter_map(move |(index, node)| match &node.kind {
            NodeKind::Mesh { mesh, geometry } => Some(MeshInstance {
                node: NodeId(index),
                mesh,
                geometry: *geometry,
                world: self.world[index],
            }),
            NodeKind::Group => None,
        })
    }

    /// Top-level clusters whose bounds poke outside `room`
    pub fn out_of_bounds_clusters(&self, room: &AABB) -> Vec<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .filter(|&id| {
                self.world_bounds(id)
                    .map(|bounds| !room.contains(&bounds))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Local transforms of every node, in creation order
    pub fn transforms(&self) -> Vec<Transform> {
        self.nodes.iter().map(|n| n.transform).collect()
    }
}
