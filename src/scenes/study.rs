use crate::config::DeskConfig;
use crate::error::SceneError;
use crate::scene::{Mesh, MeshStamp, NodeId, SceneBuilder, Transform};

pub const DESK_HEIGHT: f32 = 2.0;
pub const LEG_SIZE: f32 = 0.2;

/// The desk leg stamp: one shared box, placed with its centre at half the desk height
pub fn desk_leg_stamp(desk: &DeskConfig) -> Result<MeshStamp, SceneError> {
    let leg = Mesh::cuboid(LEG_SIZE, DESK_HEIGHT, LEG_SIZE, desk.color)?;
    Ok(MeshStamp::new(leg, DESK_HEIGHT * 0.5))
}

/// Desk top, legs, monitor, keyboard and the chair in front of it
pub fn add_desk(builder: &mut SceneBuilder, desk: &DeskConfig) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), "desk", Transform::IDENTITY);
    let [x, z] = desk.position;

    let top = Mesh::cuboid(4.0, 0.4, 2.0, desk.color)?;
    builder.add_mesh(group, "desk.top", top, Transform::from_xyz(x, DESK_HEIGHT, z));

    let legs = desk_leg_stamp(desk)?;
    for (i, [dx, dz]) in desk.legs.iter().enumerate() {
        builder.add_placed(group, format!("desk.leg.{}", i), legs.at(x + dx, z + dz));
    }

    let monitor = Mesh::cuboid(2.0, 1.2, 0.1, desk.monitor_color)?;
    builder.add_mesh(group, "desk.monitor", monitor, Transform::from_xyz(x, 3.0, z));

    let keyboard = Mesh::cuboid(1.5, 0.1, 0.5, desk.keyboard_color)?;
    builder.add_mesh(group, "desk.keyboard", keyboard, Transform::from_xyz(x, 2.3, z + 0.6));

    if let Some(chair) = &desk.chair {
        let seat_z = z + chair.offset_z;
        let seat = Mesh::cuboid(1.5, 0.2, 1.5, chair.color)?;
        builder.add_mesh(group, "desk.chair.seat", seat, Transform::from_xyz(x, 1.0, seat_z));

        let back = Mesh::cuboid(1.5, 1.5, 0.2, chair.color)?;
        builder.add_mesh(group, "desk.chair.back", back, Transform::from_xyz(x, 2.0, seat_z - 0.6));
    }

    Ok(group)
}
