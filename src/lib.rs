pub mod camera;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod types;

pub use camera::Camera;
pub use config::SceneConfig;
pub use context::AppContext;
pub use error::{RenderError, SceneError};
pub use render_loop::{FrameStatus, LoopState, RenderLoop, RenderTarget};
pub use renderer::DrawList;
pub use scene::{Scene, SceneBuilder};
pub use scenes::assemble;
