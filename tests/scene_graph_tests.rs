use std::sync::Arc;

use bedroom_viewer::config::{DeskConfig, SceneConfig};
use bedroom_viewer::geometry::Geometry;
use bedroom_viewer::math::{Color, AABB};
use bedroom_viewer::scene::{Mesh, SceneBuilder, Transform};
use bedroom_viewer::scenes::{assemble, desk_leg_stamp};
use bedroom_viewer::SceneError;
use glam::Vec3;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[cfg(test)]
mod bounds_tests {
    use super::*;

    #[test]
    fn test_bed_frame_world_position_and_extents_are_exact() {
        let mut builder = SceneBuilder::new();
        let room = builder.add_group(builder.root(), "room", Transform::IDENTITY);
        let frame = builder.add_mesh(
            room,
            "frame",
            Mesh::cuboid(6.0, 1.0, 3.0, Color(0x3b3b98)).unwrap(),
            Transform::from_xyz(-5.0, 0.5, 0.0),
        );
        let scene = builder.build();

        assert_eq!(scene.world_position(frame), Vec3::new(-5.0, 0.5, 0.0));
        let bounds = scene.world_bounds(frame).unwrap();
        assert_eq!(bounds.center(), Vec3::new(-5.0, 0.5, 0.0));
        assert_eq!(bounds.half_extents(), Vec3::new(3.0, 0.5, 1.5));
    }

    #[test]
    fn test_assembled_bed_frame_matches_hand_built_one() {
        let scene = assemble(&SceneConfig::default()).unwrap();
        let frame = scene.find("bed.frame").unwrap();

        assert_eq!(scene.world_position(frame), Vec3::new(-5.0, 0.5, 0.0));
        assert_eq!(
            scene.world_bounds(frame).unwrap().half_extents(),
            Vec3::new(3.0, 0.5, 1.5)
        );
    }

    #[test]
    fn test_cluster_bounds_are_union_of_children() {
        let scene = assemble(&SceneConfig::default()).unwrap();

        for &cluster in scene.children(scene.root()) {
            let children = scene.children(cluster);
            assert!(!children.is_empty(), "{} is empty", scene.node(cluster).name);

            let union = children
                .iter()
                .filter_map(|&c| scene.world_bounds(c))
                .reduce(|a, b| a.union(&b))
                .unwrap();
            assert_eq!(scene.world_bounds(cluster), Some(union));
        }
    }

    #[test]
    fn test_rotated_group_bounds_contain_rotated_child() {
        let mut builder = SceneBuilder::new();
        let group = builder.add_group(
            builder.root(),
            "turned",
            Transform::from_xyz(1.0, 0.0, 0.0).with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0)),
        );
        builder.add_mesh(
            group,
            "plank",
            Mesh::cuboid(4.0, 1.0, 1.0, Color::WHITE).unwrap(),
            Transform::IDENTITY,
        );
        let scene = builder.build();

        // A 4-long plank along X turns to lie along Z
        let bounds = scene.world_bounds(group).unwrap();
        assert!(approx(bounds.half_extents(), Vec3::new(0.5, 0.5, 2.0)));
        assert!(approx(bounds.center(), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_room_bounds_flag_only_misplaced_clusters() {
        let scene = assemble(&bedroom_viewer::scenes::presets::sunset()).unwrap();
        let room = SceneConfig::default().room.bounds();
        let flagged: Vec<&str> = scene
            .out_of_bounds_clusters(&room)
            .into_iter()
            .map(|id| scene.node(id).name.as_str())
            .collect();
        assert!(flagged.contains(&"floor_lamp"));
        assert!(!flagged.contains(&"bed"));
        assert!(!flagged.contains(&"room"));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let outer = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(outer.contains(&outer));
    }
}

#[cfg(test)]
mod sharing_tests {
    use super::*;

    #[test]
    fn test_leg_helper_places_four_legs_sharing_resources() {
        let stamp = desk_leg_stamp(&DeskConfig::default()).unwrap();
        let spots = [(2.2, -0.9), (5.8, -0.9), (2.2, 0.9), (5.8, 0.9)];

        let mut builder = SceneBuilder::new();
        let desk = builder.add_group(builder.root(), "desk", Transform::IDENTITY);
        let legs: Vec<_> = spots
            .iter()
            .enumerate()
            .map(|(i, &(x, z))| builder.add_placed(desk, format!("leg.{}", i), stamp.at(x, z)))
            .collect();
        let scene = builder.build();

        for (&id, &(x, z)) in legs.iter().zip(&spots) {
            assert_eq!(scene.world_position(id), Vec3::new(x, 1.0, z));
        }

        let meshes: Vec<&Mesh> = legs.iter().map(|&id| scene.node(id).mesh().unwrap()).collect();
        for mesh in &meshes[1..] {
            assert!(Arc::ptr_eq(&meshes[0].geometry, &mesh.geometry));
            assert!(Arc::ptr_eq(&meshes[0].material, &mesh.material));
        }

        let mut ids: Vec<usize> = legs.iter().map(|id| id.index()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(scene.geometries().len(), 1);
    }

    #[test]
    fn test_assembled_desk_legs_share_one_geometry() {
        let scene = assemble(&SceneConfig::default()).unwrap();
        let legs: Vec<_> = (0..4)
            .map(|i| scene.find(&format!("desk.leg.{}", i)).unwrap())
            .collect();

        let first = scene.node(legs[0]).mesh().unwrap();
        for &leg in &legs[1..] {
            assert!(first.shares_resources_with(scene.node(leg).mesh().unwrap()));
        }

        let expected = [(2.2, -0.9), (5.8, -0.9), (2.2, 0.9), (5.8, 0.9)];
        for (&leg, &(x, z)) in legs.iter().zip(&expected) {
            assert!(approx(scene.world_position(leg), Vec3::new(x, 1.0, z)));
        }
    }

    #[test]
    fn test_room_side_walls_share_geometry_and_material() {
        let scene = assemble(&SceneConfig::default()).unwrap();
        let left = scene.node(scene.find("room.left_wall").unwrap()).mesh().unwrap();
        let right = scene.node(scene.find("room.right_wall").unwrap()).mesh().unwrap();
        let back = scene.node(scene.find("room.back_wall").unwrap()).mesh().unwrap();

        assert!(left.shares_resources_with(right));
        assert!(Arc::ptr_eq(&left.material, &back.material));
        assert!(!Arc::ptr_eq(&left.geometry, &back.geometry));
    }
}

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(matches!(
            Geometry::cuboid(-1.0, 1.0, 1.0),
            Err(SceneError::InvalidDimension { dimension: "width", .. })
        ));
        assert!(Geometry::cylinder(1.0, 1.0, f32::NAN).is_err());
        assert!(Geometry::cone(0.0, 1.0).is_err());
        assert!(Geometry::plane(1.0, f32::INFINITY).is_err());
        assert!(matches!(
            Geometry::cylinder_with_segments(1.0, 1.0, 1.0, 2),
            Err(SceneError::InvalidSegments { segments: 2, .. })
        ));
    }

    #[test]
    fn test_valid_shapes_report_centred_bounds() {
        let cone = Geometry::cone(0.6, 1.0).unwrap();
        let bounds = cone.local_bounds();
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.half_extents(), Vec3::new(0.6, 0.5, 0.6));

        let plane = Geometry::plane(2.0, 4.0).unwrap();
        assert_eq!(plane.local_bounds().half_extents(), Vec3::new(1.0, 2.0, 0.0));
    }
}
