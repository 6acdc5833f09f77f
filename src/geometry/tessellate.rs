use glam::Vec3;
use std::f32::consts::TAU;

use crate::types::Vertex;

/// Indexed triangle list ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }

    /// Quad spanned by `u` and `v` from `corner`; `u x v` points along the face normal
    fn push_quad(&mut self, corner: Vec3, u: Vec3, v: Vec3) {
        let normal = u.cross(v).normalize();
        let a = self.push_vertex(corner, normal);
        let b = self.push_vertex(corner + u, normal);
        let c = self.push_vertex(corner + u + v, normal);
        let d = self.push_vertex(corner + v, normal);
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    pub(super) fn cuboid(half: Vec3) -> Self {
        let Vec3 { x: hx, y: hy, z: hz } = half;
        let mut mesh = MeshData::default();

        // +X, -X
        mesh.push_quad(Vec3::new(hx, -hy, hz), Vec3::new(0.0, 0.0, -2.0 * hz), Vec3::new(0.0, 2.0 * hy, 0.0));
        mesh.push_quad(Vec3::new(-hx, -hy, -hz), Vec3::new(0.0, 0.0, 2.0 * hz), Vec3::new(0.0, 2.0 * hy, 0.0));
        // +Y, -Y
        mesh.push_quad(Vec3::new(-hx, hy, hz), Vec3::new(2.0 * hx, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0 * hz));
        mesh.push_quad(Vec3::new(-hx, -hy, -hz), Vec3::new(2.0 * hx, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0 * hz));
        // +Z, -Z
        mesh.push_quad(Vec3::new(-hx, -hy, hz), Vec3::new(2.0 * hx, 0.0, 0.0), Vec3::new(0.0, 2.0 * hy, 0.0));
        mesh.push_quad(Vec3::new(hx, -hy, -hz), Vec3::new(-2.0 * hx, 0.0, 0.0), Vec3::new(0.0, 2.0 * hy, 0.0));

        mesh
    }

    pub(super) fn plane(width: f32, height: f32) -> Self {
        let mut mesh = MeshData::default();
        mesh.push_quad(
            Vec3::new(-width * 0.5, -height * 0.5, 0.0),
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(0.0, height, 0.0),
        );
        mesh
    }

    /// Open side wall plus a cap for each non-zero radius; a zero top radius gives a cone
    pub(super) fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let mut mesh = MeshData::default();
        let half_height = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;
        let segments = radial_segments as usize;

        let angle = |i: usize| (i as f32 / segments as f32) * TAU;

        let mut top_ring = Vec::with_capacity(segments + 1);
        let mut bottom_ring = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            let (sin, cos) = angle(i).sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            top_ring.push(mesh.push_vertex(Vec3::new(radius_top * sin, half_height, radius_top * cos), normal));
            bottom_ring.push(mesh.push_vertex(
                Vec3::new(radius_bottom * sin, -half_height, radius_bottom * cos),
                normal,
            ));
        }

        for i in 0..segments {
            let (a, b, c, d) = (top_ring[i], bottom_ring[i], bottom_ring[i + 1], top_ring[i + 1]);
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        if radius_top > 0.0 {
            mesh.push_cap(radius_top, half_height, Vec3::Y, segments);
        }
        if radius_bottom > 0.0 {
            mesh.push_cap(radius_bottom, -half_height, Vec3::NEG_Y, segments);
        }

        mesh
    }

    fn push_cap(&mut self, radius: f32, y: f32, normal: Vec3, segments: usize) {
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let ring: Vec<u32> = (0..=segments)
            .map(|i| {
                let (sin, cos) = ((i as f32 / segments as f32) * TAU).sin_cos();
                self.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal)
            })
            .collect();

        let facing_up = normal.y > 0.0;
        for i in 0..segments {
            if facing_up {
                self.indices.extend_from_slice(&[center, ring[i], ring[i + 1]]);
            } else {
                self.indices.extend_from_slice(&[center, ring[i + 1], ring[i]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle winds counter-clockwise when seen from its normal side
    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let pa = Vec3::from_array(a.position);
            let pb = Vec3::from_array(b.position);
            let pc = Vec3::from_array(c.position);
            let face = (pb - pa).cross(pc - pa);
            if face.length() < 1e-8 {
                continue;
            }
            let normal = Vec3::from_array(a.normal);
            assert!(face.dot(normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_cuboid_has_six_faces() {
        let mesh = MeshData::cuboid(Vec3::new(3.0, 0.5, 1.5));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = MeshData::plane(2.0, 1.0);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = MeshData::cylinder(0.2, 0.2, 0.5, 8);
        // side: 2 rings of 9, caps: centre + ring of 9 each
        assert_eq!(mesh.vertices.len(), 18 + 20);
        assert_eq!(mesh.triangle_count(), 16 + 16);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let mesh = MeshData::cylinder(0.0, 0.6, 1.0, 16);
        assert_eq!(mesh.vertices.len(), 34 + 18);
        assert_eq!(mesh.triangle_count(), 32 + 16);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = MeshData::cylinder(3.0, 3.0, 0.1, 32);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }
}
