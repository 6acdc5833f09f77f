use std::sync::Arc;

use glam::Mat4;

use crate::geometry::Geometry;
use crate::math::Color;

use super::light::Lights;
use super::mesh::{Mesh, PlacedMesh};
use super::node::{GeometryId, Node, NodeId, NodeKind};
use super::transform::Transform;
use super::Scene;

/// Appends nodes to a growing tree and freezes it into a [`Scene`].
///
/// A node is attached to an already existing parent when it is created, so the
/// result is always a tree. Ids are only meaningful for the builder that made them.
pub struct SceneBuilder {
    nodes: Vec<Node>,
    geometries: Vec<Arc<Geometry>>,
    lights: Lights,
    background: Color,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        let root = Node {
            name: "scene".to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            kind: NodeKind::Group,
        };

        Self {
            nodes: vec![root],
            geometries: Vec::new(),
            lights: Lights::default(),
            background: Color::BLACK,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_lights(mut self, lights: Lights) -> Self {
        self.lights = lights;
        self
    }

    pub fn add_group(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> NodeId {
        self.push(parent, name.into(), transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        mesh: Mesh,
        transform: Transform,
    ) -> NodeId {
        let geometry = self.geometry_id(&mesh.geometry);
        self.push(parent, name.into(), transform, NodeKind::Mesh { mesh, geometry })
    }

    pub fn add_placed(&mut self, parent: NodeId, name: impl Into<String>, placed: PlacedMesh) -> NodeId {
        self.add_mesh(parent, name, placed.mesh, placed.transform)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn build(self) -> Scene {
        // Parents always precede their children, so one forward pass suffices
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let matrix = match node.parent {
                Some(parent) => world[parent.0] * local,
                None => local,
            };
            world.push(matrix);
        }

        log::debug!(
            "scene built: {} nodes, {} unique geometries",
            self.nodes.len(),
            self.geometries.len()
        );

        Scene {
            nodes: self.nodes,
            world,
            geometries: self.geometries,
            lights: self.lights,
            background: self.background,
        }
    }

    fn push(&mut self, parent: NodeId, name: String, transform: Transform, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            children: Vec::new(),
            transform,
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn geometry_id(&mut self, geometry: &Arc<Geometry>) -> GeometryId {
        if let Some(index) = self.geometries.iter().position(|g| Arc::ptr_eq(g, geometry)) {
            return GeometryId(index);
        }
        self.geometries.push(Arc::clone(geometry));
        GeometryId(self.geometries.len() - 1)
    }
}
