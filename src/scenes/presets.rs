//! Named scene layouts selectable from the command line.

use crate::config::{
    BedConfig, BookshelfConfig, CameraConfig, DeskConfig, FloorLampConfig, Furniture, LightConfig,
    OrbitConfig, RoomConfig, RugConfig, SceneConfig, SideTableConfig, TableLampConfig, WindowConfig,
};
use crate::error::SceneError;
use crate::math::Color;

pub const PRESET_NAMES: [&str; 4] = ["classic", "sunset", "loft", "orbit"];

pub fn preset(name: &str) -> Result<SceneConfig, SceneError> {
    match name {
        "classic" => Ok(classic()),
        "sunset" => Ok(sunset()),
        "loft" => Ok(loft()),
        "orbit" => Ok(orbit()),
        other => Err(SceneError::UnknownPreset(other.to_string())),
    }
}

/// The blue bedroom with its fixed camera
pub fn classic() -> SceneConfig {
    SceneConfig::default()
}

/// Warm palette with a floor lamp standing just behind the back wall
pub fn sunset() -> SceneConfig {
    let classic = SceneConfig::default();

    SceneConfig {
        name: "sunset".to_string(),
        background: Color(0xffb07c),
        lights: LightConfig {
            ambient_color: Color(0xffe0b0),
            ambient_intensity: 0.5,
            point_color: Color(0xffa060),
            point_intensity: 1.0,
            point_position: [-4.0, 7.0, 6.0],
        },
        room: RoomConfig {
            floor_color: Color(0xa0522d),
            wall_color: Color(0xffe4c4),
            ..RoomConfig::default()
        },
        furniture: vec![
            Furniture::Bed(BedConfig {
                frame_color: Color(0x8b4513),
                blanket_color: Color(0xe9967a),
                pillow_color: Color(0xfff0e0),
                ..BedConfig::default()
            }),
            Furniture::SideTable(SideTableConfig {
                color: Color(0x5c3317),
                lamp: Some(TableLampConfig {
                    base_color: Color(0x3b2414),
                    shade_color: Color(0xff8c00),
                }),
                ..SideTableConfig::default()
            }),
            Furniture::Desk(DeskConfig {
                color: Color(0x6b3e26),
                ..DeskConfig::default()
            }),
            Furniture::Bookshelf(BookshelfConfig {
                color: Color(0x5c3317),
                book_color: Color(0xcd5c5c),
                ..BookshelfConfig::default()
            }),
            Furniture::Window(WindowConfig {
                frame_color: Color(0x8b5a2b),
                glass_color: Color(0xffcc99),
                opacity: 0.5,
                ..WindowConfig::default()
            }),
            Furniture::Rug(RugConfig {
                color: Color(0xd2691e),
                ..RugConfig::default()
            }),
            // Behind the back wall, which ends at z = -10.25
            Furniture::FloorLamp(FloorLampConfig {
                position: [6.0, -10.8],
                shade_color: Color(0xffd27f),
                ..FloorLampConfig::default()
            }),
        ],
        ..classic
    }
}

/// Bigger room, two bookshelves and a reading lamp
pub fn loft() -> SceneConfig {
    let room = RoomConfig {
        width: 28.0,
        depth: 24.0,
        wall_height: 10.0,
        ..RoomConfig::default()
    };

    SceneConfig {
        name: "loft".to_string(),
        background: Color(0xc8d6e5),
        camera: CameraConfig {
            position: [12.0, 9.0, 18.0],
            ..CameraConfig::default()
        },
        lights: LightConfig {
            point_position: [0.0, 9.0, 4.0],
            ..LightConfig::default()
        },
        furniture: vec![
            Furniture::Bed(BedConfig {
                position: [-8.0, -4.0],
                ..BedConfig::default()
            }),
            Furniture::SideTable(SideTableConfig {
                position: [-4.5, -2.0],
                ..SideTableConfig::default()
            }),
            Furniture::Desk(DeskConfig {
                position: [6.0, 5.0],
                ..DeskConfig::default()
            }),
            Furniture::Bookshelf(BookshelfConfig {
                position: [12.5, -8.0],
                books: 4,
                size: [1.0, 7.0, 3.0],
                ..BookshelfConfig::default()
            }),
            Furniture::Bookshelf(BookshelfConfig {
                position: [12.5, -3.5],
                books: 4,
                size: [1.0, 7.0, 3.0],
                book_color: Color(0x2e8b57),
                ..BookshelfConfig::default()
            }),
            Furniture::Window(WindowConfig {
                center: [-2.0, 5.0, -11.9],
                frame_size: [7.0, 5.0, 0.2],
                glass_size: [6.6, 4.6, 0.1],
                ..WindowConfig::default()
            }),
            Furniture::Rug(RugConfig {
                radius: 4.0,
                ..RugConfig::default()
            }),
            Furniture::FloorLamp(FloorLampConfig {
                position: [-11.0, 8.0],
                height: 5.0,
                ..FloorLampConfig::default()
            }),
        ],
        room,
        ..SceneConfig::default()
    }
}

/// Classic layout with a damped orbit camera circling the room centre
pub fn orbit() -> SceneConfig {
    let orbit = OrbitConfig::default();

    SceneConfig {
        name: "orbit".to_string(),
        camera: CameraConfig {
            look_at: Some(orbit.target),
            ..CameraConfig::default()
        },
        orbit: Some(orbit),
        ..SceneConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_preset_resolves() {
        for name in PRESET_NAMES {
            let config = preset(name).unwrap();
            assert_eq!(config.name, name);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = preset("attic").unwrap_err();
        assert_eq!(err, SceneError::UnknownPreset("attic".to_string()));
    }

    #[test]
    fn test_only_orbit_preset_enables_orbit() {
        assert!(orbit().orbit.is_some());
        assert!(classic().orbit.is_none());
        assert!(sunset().orbit.is_none());
        assert!(loft().orbit.is_none());
    }

    #[test]
    fn test_loft_has_two_bookshelves() {
        let shelves = loft()
            .furniture
            .iter()
            .filter(|f| matches!(f, Furniture::Bookshelf(_)))
            .count();
        assert_eq!(shelves, 2);
    }
}
