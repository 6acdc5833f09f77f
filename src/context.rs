use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::core::{OrbitController, Viewport};
use crate::error::SceneError;
use crate::scene::Scene;
use crate::scenes::{assemble, build_camera};

/// State shared by every frame: the built scene, the camera looking at it,
/// the optional orbit controller and the current output size.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: Option<OrbitController>,
    pub viewport: Viewport,
}

impl AppContext {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Result<Self, SceneError> {
        config.validate()?;
        let scene = assemble(config)?;
        let aspect = if viewport.is_empty() { 1.0 } else { viewport.aspect() };
        let camera = build_camera(&config.camera, aspect);
        let orbit = config.orbit.clone().map(OrbitController::new);

        Ok(Self {
            scene,
            camera,
            orbit,
            viewport,
        })
    }
}
