//! Bedroom assembly.
//!
//! [`assemble`] turns a [`SceneConfig`] into a built [`Scene`]: the room shell
//! first, then one top-level cluster per furniture entry in list order.

mod bed;
mod fixtures;
pub mod presets;
mod room;
mod shelf;
mod study;

use glam::Vec3;
use log::{debug, info, warn};

use crate::camera::Camera;
use crate::config::{CameraConfig, Furniture, LightConfig, SceneConfig};
use crate::error::SceneError;
use crate::scene::{AmbientLight, Lights, PointLight, Scene, SceneBuilder};

pub use bed::add_bed;
pub use fixtures::{add_floor_lamp, add_rug, add_side_table, add_window};
pub use presets::{preset, PRESET_NAMES};
pub use room::add_room;
pub use shelf::add_bookshelf;
pub use study::{add_desk, desk_leg_stamp, DESK_HEIGHT, LEG_SIZE};

pub fn assemble(config: &SceneConfig) -> Result<Scene, SceneError> {
    let mut builder = SceneBuilder::new()
        .with_background(config.background)
        .with_lights(build_lights(&config.lights));

    add_room(&mut builder, &config.room)?;

    let mut shelves = 0;
    for item in &config.furniture {
        match item {
            Furniture::Bed(bed) => add_bed(&mut builder, bed)?,
            Furniture::SideTable(table) => add_side_table(&mut builder, table)?,
            Furniture::Desk(desk) => add_desk(&mut builder, desk)?,
            Furniture::Bookshelf(shelf) => {
                let name = match shelves {
                    0 => "bookshelf".to_string(),
                    n => format!("bookshelf.{}", n),
                };
                shelves += 1;
                add_bookshelf(&mut builder, shelf, &name)?
            }
            Furniture::Window(window) => add_window(&mut builder, window)?,
            Furniture::Rug(rug) => add_rug(&mut builder, rug)?,
            Furniture::FloorLamp(lamp) => add_floor_lamp(&mut builder, lamp)?,
        };
        debug!("placed {}", item.cluster_name());
    }

    let scene = builder.build();

    // Reported only; layouts are kept exactly as configured
    for id in scene.out_of_bounds_clusters(&config.room.bounds()) {
        warn!("'{}' extends outside the room walls", scene.node(id).name);
    }

    info!(
        "assembled '{}': {} nodes, {} meshes, {} geometries",
        config.name,
        scene.node_count(),
        scene.mesh_count(),
        scene.geometries().len()
    );
    Ok(scene)
}

pub fn build_camera(config: &CameraConfig, aspect: f32) -> Camera {
    let mut camera = Camera::new(config.fov_degrees, aspect, config.near, config.far)
        .with_position(Vec3::from_array(config.position));
    if let Some(target) = config.look_at {
        camera.look_at(Vec3::from_array(target));
    }
    camera
}

pub fn build_lights(config: &LightConfig) -> Lights {
    Lights {
        ambient: AmbientLight {
            color: config.ambient_color,
            intensity: config.ambient_intensity,
        },
        point: PointLight {
            color: config.point_color,
            intensity: config.point_intensity,
            position: Vec3::from_array(config.point_position),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BedConfig;
    use crate::math::Color;
    use glam::Quat;

    #[test]
    fn test_classic_clusters_in_order() {
        let scene = assemble(&SceneConfig::default()).unwrap();
        let names: Vec<&str> = scene
            .children(scene.root())
            .iter()
            .map(|&id| scene.node(id).name.as_str())
            .collect();
        assert_eq!(
            names,
            ["room", "bed", "side_table", "desk", "bookshelf", "window", "rug"]
        );
    }

    #[test]
    fn test_classic_mesh_count() {
        let scene = assemble(&SceneConfig::default()).unwrap();
        // room 5, bed 4, table + lamp 3, desk 9, shelf 4, window 2, rug 1
        assert_eq!(scene.mesh_count(), 28);
    }

    #[test]
    fn test_invalid_furniture_aborts_assembly() {
        let config = SceneConfig {
            furniture: vec![Furniture::Bed(BedConfig {
                length: 0.0,
                ..BedConfig::default()
            })],
            ..SceneConfig::default()
        };
        assert!(matches!(
            assemble(&config),
            Err(SceneError::InvalidDimension { value, .. }) if value == 0.0
        ));
    }

    #[test]
    fn test_camera_without_target_keeps_default_orientation() {
        let camera = build_camera(&CameraConfig::default(), 4.0 / 3.0);
        assert_eq!(camera.position, Vec3::new(8.0, 6.0, 12.0));
        assert_eq!(camera.rotation, Quat::IDENTITY);
        assert_eq!(camera.aspect, 4.0 / 3.0);
    }

    #[test]
    fn test_camera_with_target_faces_it() {
        let config = CameraConfig {
            look_at: Some([0.0, 0.0, 0.0]),
            ..CameraConfig::default()
        };
        let camera = build_camera(&config, 1.0);
        let expected = (-camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_lights_follow_config() {
        let lights = build_lights(&LightConfig {
            ambient_color: Color(0x102030),
            ..LightConfig::default()
        });
        assert_eq!(lights.ambient.color, Color(0x102030));
        assert_eq!(lights.ambient.intensity, 0.6);
        assert_eq!(lights.point.position, Vec3::new(5.0, 8.0, 5.0));
    }
}
