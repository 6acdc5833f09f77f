use glam::Vec3;

use crate::config::{FloorLampConfig, RugConfig, SideTableConfig, WindowConfig};
use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::scene::{Material, Mesh, NodeId, SceneBuilder, Transform};

/// Bedside table with an optional cylinder-and-cone lamp on top
pub fn add_side_table(builder: &mut SceneBuilder, table: &SideTableConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "side_table", Transform::IDENTITY);
    let [x, z] = table.position;

    let top = Mesh::cuboid(table.size, table.height, table.size, table.color)?;
    builder.add_mesh(group, "side_table.body", top, Transform::from_xyz(x, table.height * 0.5, z));

    if let Some(lamp) = &table.lamp {
        let base = Mesh::new(Geometry::cylinder(0.2, 0.2, 0.5)?, Material::lambert(lamp.base_color));
        builder.add_mesh(
            group,
            "side_table.lamp.base",
            base,
            Transform::from_xyz(x, table.height + 0.25, z),
        );

        let shade = Mesh::new(
            Geometry::cone_with_segments(0.6, 1.0, 16)?,
            Material::lambert(lamp.shade_color),
        );
        builder.add_mesh(
            group,
            "side_table.lamp.shade",
            shade,
            Transform::from_xyz(x, table.height + 0.9, z),
        );
    }

    Ok(group)
}

/// Opaque frame plus a translucent pane set slightly behind it
pub fn add_window(builder: &mut SceneBuilder, window: &WindowConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "window", Transform::IDENTITY);
    let center = Vec3::from_array(window.center);

    let [fw, fh, fd] = window.frame_size;
    let frame = Mesh::cuboid(fw, fh, fd, window.frame_color)?;
    builder.add_mesh(group, "window.frame", frame, Transform::from_translation(center));

    let [gw, gh, gd] = window.glass_size;
    let glass = Mesh::new(
        Geometry::cuboid(gw, gh, gd)?,
        Material::translucent(window.glass_color, window.opacity)?,
    );
    builder.add_mesh(
        group,
        "window.glass",
        glass,
        Transform::from_translation(center + Vec3::new(0.0, 0.0, window.glass_offset_z)),
    );

    Ok(group)
}

pub fn add_rug(builder: &mut SceneBuilder, rug: &RugConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "rug", Transform::IDENTITY);

    let disc = Mesh::new(
        Geometry::cylinder(rug.radius, rug.radius, rug.thickness)?,
        Material::lambert(rug.color),
    );
    let transform = Transform::from_translation(Vec3::from_array(rug.position))
        .with_rotation(Vec3::new(rug.tilt_degrees.to_radians(), 0.0, 0.0));
    builder.add_mesh(group, "rug.disc", disc, transform);

    Ok(group)
}

/// Weighted base, thin pole and a cone shade opening downwards
pub fn add_floor_lamp(builder: &mut SceneBuilder, lamp: &FloorLampConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "floor_lamp", Transform::IDENTITY);
    let [x, z] = lamp.position;

    let base = Mesh::new(Geometry::cylinder(0.4, 0.4, 0.1)?, Material::lambert(lamp.pole_color));
    builder.add_mesh(group, "floor_lamp.base", base, Transform::from_xyz(x, 0.05, z));

    let pole = Mesh::new(
        Geometry::cylinder_with_segments(0.05, 0.05, lamp.height, 12)?,
        Material::lambert(lamp.pole_color),
    );
    builder.add_mesh(group, "floor_lamp.pole", pole, Transform::from_xyz(x, lamp.height * 0.5, z));

    let shade = Mesh::new(Geometry::cone(0.5, 0.8)?, Material::lambert(lamp.shade_color));
    builder.add_mesh(group, "floor_lamp.shade", shade, Transform::from_xyz(x, lamp.height + 0.2, z));

    Ok(group)
}
