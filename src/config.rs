//! Scene configuration.
//!
//! One [`SceneConfig`] describes a whole bedroom: room shell, palette, camera,
//! lights and the furniture list. `Default` values reproduce the classic blue
//! bedroom; other variants live in [`crate::scenes::presets`]. Configs can be
//! loaded from JSON, colors are written as `"#rrggbb"`.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_FAR, DEFAULT_FOV_DEGREES, DEFAULT_NEAR};
use crate::error::SceneError;
use crate::math::{Color, AABB};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    pub background: Color,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub room: RoomConfig,
    pub furniture: Vec<Furniture>,
    pub orbit: Option<OrbitConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            background: Color(0xb0c4de),
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            room: RoomConfig::default(),
            furniture: vec![
                Furniture::Bed(BedConfig::default()),
                Furniture::SideTable(SideTableConfig::default()),
                Furniture::Desk(DeskConfig::default()),
                Furniture::Bookshelf(BookshelfConfig::default()),
                Furniture::Window(WindowConfig::default()),
                Furniture::Rug(RugConfig::default()),
            ],
            orbit: None,
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse scene config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scene config")
    }

    /// Camera and orbit checks; furniture dimensions are checked by `assemble`
    pub fn validate(&self) -> Result<(), SceneError> {
        self.camera.validate()?;
        if let Some(orbit) = &self.orbit {
            orbit.validate()?;
        }
        Ok(())
    }

    /// Turn on orbit control with default settings unless the config already has some
    pub fn enable_orbit(&mut self) {
        if self.orbit.is_none() {
            self.orbit = Some(OrbitConfig::default());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    /// Without a target the camera keeps its default orientation, looking down -Z
    pub look_at: Option<[f32; 3]>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            position: [8.0, 6.0, 12.0],
            look_at: None,
        }
    }
}

impl CameraConfig {
    /// Checks the projection parameters: `0 < near < far`, fov within (0, 180)
    pub fn validate(&self) -> Result<(), SceneError> {
        check("camera.fov_degrees", self.fov_degrees, self.fov_degrees > 0.0 && self.fov_degrees < 180.0)?;
        check("camera.near", self.near, self.near.is_finite() && self.near > 0.0)?;
        check("camera.far", self.far, self.far.is_finite() && self.far > self.near)?;
        check_all("camera.position", &self.position)?;
        if let Some(target) = &self.look_at {
            check_all("camera.look_at", target)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub point_color: Color,
    pub point_intensity: f32,
    pub point_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::WHITE,
            ambient_intensity: 0.6,
            point_color: Color::WHITE,
            point_intensity: 0.8,
            point_position: [5.0, 8.0, 5.0],
        }
    }
}

/// Floor, three walls and a ceiling; the front (+Z) side stays open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: f32,
    pub depth: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    pub floor_color: Color,
    pub wall_color: Color,
    pub ceiling: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 20.0,
            wall_height: 8.0,
            wall_thickness: 0.5,
            floor_thickness: 0.5,
            floor_color: Color(0x87a7c4),
            wall_color: Color(0xe6f0fa),
            ceiling: true,
        }
    }
}

impl RoomConfig {
    /// Everything the shell encloses, walls included
    pub fn bounds(&self) -> AABB {
        let half_wall = self.wall_thickness * 0.5;
        AABB::new(
            Vec3::new(
                -self.width * 0.5 - half_wall,
                -self.floor_thickness,
                -self.depth * 0.5 - half_wall,
            ),
            Vec3::new(
                self.width * 0.5 + half_wall,
                self.wall_height + half_wall,
                self.depth * 0.5,
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Furniture {
    Bed(BedConfig),
    SideTable(SideTableConfig),
    Desk(DeskConfig),
    Bookshelf(BookshelfConfig),
    Window(WindowConfig),
    Rug(RugConfig),
    FloorLamp(FloorLampConfig),
}

impl Furniture {
    pub fn cluster_name(&self) -> &'static str {
        match self {
            Furniture::Bed(_) => "bed",
            Furniture::SideTable(_) => "side_table",
            Furniture::Desk(_) => "desk",
            Furniture::Bookshelf(_) => "bookshelf",
            Furniture::Window(_) => "window",
            Furniture::Rug(_) => "rug",
            Furniture::FloorLamp(_) => "floor_lamp",
        }
    }
}

/// Bed on the floor; `position` is the floor point under the frame centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BedConfig {
    pub position: [f32; 2],
    pub length: f32,
    pub width: f32,
    pub frame_color: Color,
    pub mattress_color: Color,
    pub blanket_color: Color,
    pub pillow_color: Color,
}

impl Default for BedConfig {
    fn default() -> Self {
        Self {
            position: [-5.0, 0.0],
            length: 6.0,
            width: 3.0,
            frame_color: Color(0x3b3b98),
            mattress_color: Color(0xffffff),
            blanket_color: Color(0x4682b4),
            pillow_color: Color(0xeeeeff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideTableConfig {
    pub position: [f32; 2],
    pub size: f32,
    pub height: f32,
    pub color: Color,
    pub lamp: Option<TableLampConfig>,
}

impl Default for SideTableConfig {
    fn default() -> Self {
        Self {
            position: [-1.5, 2.0],
            size: 1.5,
            height: 1.0,
            color: Color(0x2f4f4f),
            lamp: Some(TableLampConfig::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLampConfig {
    pub base_color: Color,
    pub shade_color: Color,
}

impl Default for TableLampConfig {
    fn default() -> Self {
        Self {
            base_color: Color(0x000000),
            shade_color: Color(0x1e90ff),
        }
    }
}

/// Desk with monitor, keyboard, four legs and an optional chair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub position: [f32; 2],
    pub color: Color,
    /// Leg offsets from `position` in the XZ plane
    pub legs: Vec<[f32; 2]>,
    pub monitor_color: Color,
    pub keyboard_color: Color,
    pub chair: Option<ChairConfig>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            position: [4.0, 0.0],
            color: Color(0x1a2b4c),
            legs: vec![[-1.8, -0.9], [1.8, -0.9], [-1.8, 0.9], [1.8, 0.9]],
            monitor_color: Color(0x000000),
            keyboard_color: Color(0xcccccc),
            chair: Some(ChairConfig::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairConfig {
    /// Seat centre offset from the desk along Z
    pub offset_z: f32,
    pub color: Color,
}

impl Default for ChairConfig {
    fn default() -> Self {
        Self {
            offset_z: -3.0,
            color: Color(0x1e3f66),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookshelfConfig {
    pub position: [f32; 2],
    pub size: [f32; 3],
    pub color: Color,
    pub book_color: Color,
    pub books: u32,
    pub book_size: [f32; 3],
    pub first_book_height: f32,
    pub book_spacing: f32,
}

impl Default for BookshelfConfig {
    fn default() -> Self {
        Self {
            position: [8.0, -6.0],
            size: [1.0, 5.0, 3.0],
            color: Color(0x2f4f4f),
            book_color: Color(0x4169e1),
            books: 3,
            book_size: [0.8, 0.2, 2.0],
            first_book_height: 1.0,
            book_spacing: 1.5,
        }
    }
}

/// Window frame with a translucent glass pane just behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub center: [f32; 3],
    pub frame_size: [f32; 3],
    pub frame_color: Color,
    pub glass_size: [f32; 3],
    pub glass_offset_z: f32,
    pub glass_color: Color,
    pub opacity: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 4.0, -9.9],
            frame_size: [5.0, 4.0, 0.2],
            frame_color: Color(0xaaaaaa),
            glass_size: [4.6, 3.6, 0.1],
            glass_offset_z: -0.1,
            glass_color: Color(0x87ceeb),
            opacity: 0.6,
        }
    }
}

/// Round rug; a disc lies flat by default, `tilt_degrees` rotates it about X
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RugConfig {
    pub position: [f32; 3],
    pub radius: f32,
    pub thickness: f32,
    pub color: Color,
    pub tilt_degrees: f32,
}

impl Default for RugConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.05, 0.0],
            radius: 3.0,
            thickness: 0.1,
            color: Color(0x5dade2),
            tilt_degrees: -90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorLampConfig {
    pub position: [f32; 2],
    pub height: f32,
    pub pole_color: Color,
    pub shade_color: Color,
}

impl Default for FloorLampConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            height: 4.0,
            pole_color: Color(0x222222),
            shade_color: Color(0xfff5cc),
        }
    }
}

/// Damped orbit camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: [f32; 3],
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

impl OrbitConfig {
    /// Checks the settings `update` relies on to settle and stay in range
    pub fn validate(&self) -> Result<(), SceneError> {
        check_all("orbit.target", &self.target)?;
        check(
            "orbit.damping_factor",
            self.damping_factor,
            self.damping_factor > 0.0 && self.damping_factor <= 1.0,
        )?;
        for (setting, speed) in [
            ("orbit.rotate_speed", self.rotate_speed),
            ("orbit.zoom_speed", self.zoom_speed),
            ("orbit.pan_speed", self.pan_speed),
        ] {
            check(setting, speed, speed.is_finite() && speed > 0.0)?;
        }
        check(
            "orbit.min_distance",
            self.min_distance,
            self.min_distance.is_finite() && self.min_distance > 0.0,
        )?;
        check(
            "orbit.max_distance",
            self.max_distance,
            self.max_distance.is_finite() && self.max_distance >= self.min_distance,
        )
    }
}

fn check(setting: &'static str, value: f32, ok: bool) -> Result<(), SceneError> {
    if ok {
        Ok(())
    } else {
        Err(SceneError::InvalidSetting { setting, value })
    }
}

fn check_all(setting: &'static str, values: &[f32]) -> Result<(), SceneError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(SceneError::InvalidSetting { setting, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut config = SceneConfig::default();
        config.enable_orbit();

        let json = config.to_json().unwrap();
        let parsed = SceneConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = SceneConfig::from_json(
            r##"{
                "background": "#000000",
                "furniture": [
                    { "kind": "bed", "position": [1.0, 2.0] },
                    { "kind": "floor_lamp", "height": 3.5 }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(config.background, Color(0x000000));
        assert_eq!(config.room, RoomConfig::default());
        assert_eq!(config.furniture.len(), 2);
        match &config.furniture[0] {
            Furniture::Bed(bed) => {
                assert_eq!(bed.position, [1.0, 2.0]);
                assert_eq!(bed.frame_color, BedConfig::default().frame_color);
            }
            other => panic!("expected bed, got {:?}", other),
        }
        assert_eq!(config.furniture[1].cluster_name(), "floor_lamp");
    }

    #[test]
    fn test_bad_color_is_reported() {
        let err = SceneConfig::from_json(r#"{ "background": "blue" }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("#rrggbb"));
    }

    #[test]
    fn test_enable_orbit_keeps_existing_settings() {
        let mut config = SceneConfig::default();
        config.orbit = Some(OrbitConfig {
            damping_factor: 0.2,
            ..OrbitConfig::default()
        });
        config.enable_orbit();
        assert_eq!(config.orbit.unwrap().damping_factor, 0.2);
    }

    #[test]
    fn test_room_bounds_cover_walls() {
        let bounds = RoomConfig::default().bounds();
        assert_eq!(bounds.min, Vec3::new(-10.25, -0.5, -10.25));
        assert_eq!(bounds.max, Vec3::new(10.25, 8.25, 10.0));
    }

    fn rejected(orbit: OrbitConfig) -> &'static str {
        match orbit.validate() {
            Err(SceneError::InvalidSetting { setting, .. }) => setting,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_default_camera_and_orbit_are_valid() {
        let mut config = SceneConfig::default();
        config.enable_orbit();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_orbit_distance_range_rejected() {
        let inverted = OrbitConfig {
            min_distance: 50.0,
            max_distance: 10.0,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(inverted), "orbit.max_distance");

        let nan = OrbitConfig {
            min_distance: f32::NAN,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(nan), "orbit.min_distance");

        let zero = OrbitConfig {
            min_distance: 0.0,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(zero), "orbit.min_distance");
    }

    #[test]
    fn test_orbit_damping_factor_range_rejected() {
        for factor in [0.0, -0.1, 2.5, f32::NAN] {
            let orbit = OrbitConfig {
                damping_factor: factor,
                ..OrbitConfig::default()
            };
            assert_eq!(rejected(orbit), "orbit.damping_factor");
        }

        let full = OrbitConfig {
            damping_factor: 1.0,
            ..OrbitConfig::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_orbit_speeds_must_be_positive() {
        let rotate = OrbitConfig {
            rotate_speed: 0.0,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(rotate), "orbit.rotate_speed");

        let zoom = OrbitConfig {
            zoom_speed: -1.0,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(zoom), "orbit.zoom_speed");

        let pan = OrbitConfig {
            pan_speed: f32::INFINITY,
            ..OrbitConfig::default()
        };
        assert_eq!(rejected(pan), "orbit.pan_speed");
    }

    #[test]
    fn test_camera_projection_range_rejected() {
        let cases = [
            (CameraConfig { near: 0.0, ..CameraConfig::default() }, "camera.near"),
            (CameraConfig { near: 5.0, far: 5.0, ..CameraConfig::default() }, "camera.far"),
            (CameraConfig { far: f32::INFINITY, ..CameraConfig::default() }, "camera.far"),
            (CameraConfig { fov_degrees: 0.0, ..CameraConfig::default() }, "camera.fov_degrees"),
            (CameraConfig { fov_degrees: 180.0, ..CameraConfig::default() }, "camera.fov_degrees"),
            (CameraConfig { position: [0.0, f32::NAN, 0.0], ..CameraConfig::default() }, "camera.position"),
        ];
        for (camera, setting) in cases {
            match camera.validate() {
                Err(SceneError::InvalidSetting { setting: got, .. }) => assert_eq!(got, setting),
                other => panic!("{} accepted: {:?}", setting, other),
            }
        }
    }

    #[test]
    fn test_scene_validate_checks_orbit_from_json() {
        let config = SceneConfig::from_json(r#"{ "orbit": { "min_distance": 50, "max_distance": 10 } }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidSetting { setting: "orbit.max_distance", .. })
        ));
    }
}
