use std::sync::Arc;

use glam::Vec3;

use crate::config::RoomConfig;
use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::scene::{Material, Mesh, NodeId, SceneBuilder, Transform};

/// Floor, back/left/right walls and optional ceiling under one `room` group
pub fn add_room(builder: &mut SceneBuilder, room: &RoomConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "room", Transform::IDENTITY);

    let floor = Mesh::cuboid(room.width, room.floor_thickness, room.depth, room.floor_color)?;
    builder.add_mesh(
        group,
        "room.floor",
        floor,
        Transform::from_xyz(0.0, -room.floor_thickness * 0.5, 0.0),
    );

    let wall_material = Arc::new(Material::lambert(room.wall_color));
    let wall = |geometry: Geometry| Mesh::shared(Arc::new(geometry), Arc::clone(&wall_material));

    let half_height = room.wall_height * 0.5;
    let back = Geometry::cuboid(room.width, room.wall_height, room.wall_thickness)?;
    builder.add_mesh(
        group,
        "room.back_wall",
        wall(back),
        Transform::from_xyz(0.0, half_height, -room.depth * 0.5),
    );

    // Side walls are the same box mirrored across X
    let side = Arc::new(Geometry::cuboid(room.wall_thickness, room.wall_height, room.depth)?);
    for (name, x) in [("room.left_wall", -room.width * 0.5), ("room.right_wall", room.width * 0.5)] {
        builder.add_mesh(
            group,
            name,
            Mesh::shared(Arc::clone(&side), Arc::clone(&wall_material)),
            Transform::from_translation(Vec3::new(x, half_height, 0.0)),
        );
    }

    if room.ceiling {
        let ceiling = Geometry::cuboid(room.width, room.wall_thickness, room.depth)?;
        builder.add_mesh(
            group,
            "room.ceiling",
            wall(ceiling),
            Transform::from_xyz(0.0, room.wall_height, 0.0),
        );
    }

    Ok(group)
}
