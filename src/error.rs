use std::fmt;

/// Errors raised while constructing primitives or assembling a scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A geometry dimension was zero, negative, or not finite
    InvalidDimension {
        shape: &'static str,
        dimension: &'static str,
        value: f32,
    },
    /// A round shape was asked for fewer than three radial segments
    InvalidSegments { shape: &'static str, segments: u32 },
    /// Material opacity outside `[0, 1]`
    InvalidOpacity(f32),
    /// A camera or orbit setting outside its allowed range
    InvalidSetting { setting: &'static str, value: f32 },
    /// No preset with this name
    UnknownPreset(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidDimension {
                shape,
                dimension,
                value,
            } => write!(
                f,
                "{} {} must be positive and finite, got {}",
                shape, dimension, value
            ),
            SceneError::InvalidSegments { shape, segments } => write!(
                f,
                "{} needs at least 3 radial segments, got {}",
                shape, segments
            ),
            SceneError::InvalidOpacity(value) => {
                write!(f, "opacity must be within [0, 1], got {}", value)
            }
            SceneError::InvalidSetting { setting, value } => {
                write!(f, "{} out of range, got {}", setting, value)
            }
            SceneError::UnknownPreset(name) => write!(f, "unknown scene preset {:?}", name),
        }
    }
}

impl std::error::Error for SceneError {}

/// Errors surfaced by a render target while drawing a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The surface could not hand out a texture this frame
    Surface(String),
    /// The GPU ran out of memory; the loop cannot continue
    OutOfMemory,
}

impl RenderError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::OutOfMemory)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Surface(reason) => write!(f, "surface error: {}", reason),
            RenderError::OutOfMemory => write!(f, "GPU out of memory"),
        }
    }
}

impl std::error::Error for RenderError {}
