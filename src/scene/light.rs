use glam::Vec3;

use crate::math::Color;
use crate::types::LightUniform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

/// The fixed light rig of a scene: one ambient term and one point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.6,
            },
            point: PointLight {
                color: Color::WHITE,
                intensity: 0.8,
                position: Vec3::new(5.0, 8.0, 5.0),
            },
        }
    }
}

impl Lights {
    pub fn to_uniform(&self) -> LightUniform {
        let scaled = |color: Color, intensity: f32| {
            let [r, g, b] = color.to_linear();
            [r * intensity, g * intensity, b * intensity, 1.0]
        };

        LightUniform {
            ambient: scaled(self.ambient.color, self.ambient.intensity),
            point_color: scaled(self.point.color, self.point.intensity),
            point_position: self.point.position.extend(1.0).to_array(),
        }
    }
}
