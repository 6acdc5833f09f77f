use glam::Vec3;

use crate::config::BedConfig;
use crate::error::SceneError;
use crate::scene::{Mesh, NodeId, SceneBuilder, Transform};

/// Frame, mattress, blanket and pillow, each placed at its final room position
pub fn add_bed(builder: &mut SceneBuilder, bed: &BedConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "bed", Transform::IDENTITY);
    let [x, z] = bed.position;
    let at = |dx: f32, y: f32, dz: f32| Transform::from_translation(Vec3::new(x + dx, y, z + dz));

    let frame = Mesh::cuboid(bed.length, 1.0, bed.width, bed.frame_color)?;
    builder.add_mesh(group, "bed.frame", frame, at(0.0, 0.5, 0.0));

    let mattress = Mesh::cuboid(bed.length, 0.6, bed.width, bed.mattress_color)?;
    builder.add_mesh(group, "bed.mattress", mattress, at(0.0, 1.3, 0.0));

    let blanket = Mesh::cuboid(bed.length, 0.2, bed.width - 1.0, bed.blanket_color)?;
    builder.add_mesh(group, "bed.blanket", blanket, at(0.0, 1.5, 0.5));

    let pillow = Mesh::cuboid(1.5, 0.4, 1.0, bed.pillow_color)?;
    builder.add_mesh(group, "bed.pillow", pillow, at(-(bed.length * 0.25), 1.6, 0.0));

    Ok(group)
}
