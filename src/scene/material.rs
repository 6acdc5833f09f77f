use crate::error::SceneError;
use crate::math::Color;

/// Diffuse (Lambert) shading parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub transparent: bool,
    pub opacity: f32,
}

impl Material {
    pub fn lambert(color: Color) -> Self {
        Self {
            color,
            transparent: false,
            opacity: 1.0,
        }
    }

    /// Alpha-blended material; opacity must be within `[0, 1]`
    pub fn translucent(color: Color, opacity: f32) -> Result<Self, SceneError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(SceneError::InvalidOpacity(opacity));
        }
        Ok(Self {
            color,
            transparent: true,
            opacity,
        })
    }

    /// Linear RGBA as sent to the shader; opaque materials always get alpha 1
    pub fn linear_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.color.to_linear();
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        [r, g, b, alpha]
    }
}
