use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use bedroom_viewer::{
    cli::Cli,
    context::AppContext,
    core::{Button, Controller, Viewport, WinitController},
    frame::FrameIterator,
    logging::{init_logging, LoggingConfig},
    render_loop::RenderLoop,
    renderer::SceneRenderer,
};

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

struct App {
    ctx: AppContext,
    title: String,
    show_hud: bool,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    render_loop: RenderLoop,
    input: WinitController,
    frames: FrameIterator,
    /// First fatal error; returned from main once the event loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(ctx: AppContext, title: String, show_hud: bool) -> Self {
        Self {
            ctx,
            title,
            show_hud,
            window: None,
            renderer: None,
            render_loop: RenderLoop::new(),
            input: WinitController::new(),
            frames: FrameIterator::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(&self.title)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let mut renderer = pollster::block_on(SceneRenderer::new(
            window.clone(),
            &self.ctx.scene,
            self.show_hud,
        ))
        .context("failed to initialize renderer")?;

        let viewport = Viewport::from(window.inner_size());
        self.render_loop.start(&mut self.ctx, &mut renderer, viewport);

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        // Let the HUD handle the event first; releases still reach the input state
        if renderer.handle_event(&event) {
            if WinitController::releases_state(&event) {
                self.input.process_event(&event);
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.render_loop
                    .on_resize(&mut self.ctx, renderer, Viewport::from(size));
            }
            WindowEvent::RedrawRequested => {
                let Some(frame) = self.frames.next() else {
                    return;
                };
                let result = self.render_loop.tick(&mut self.ctx, &self.input, frame, renderer);
                self.input.reset_deltas();
                if let Err(err) = result {
                    self.fail(event_loop, err.into());
                }
            }
            other => {
                self.input.process_event(&other);
                if self.input.is_down(Button::Escape) {
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let config = cli.scene_config()?;
    let ctx = AppContext::new(
        &config,
        Viewport::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT),
    )
    .context("failed to assemble scene")?;

    if ctx.orbit.is_some() {
        info!("scene '{}': drag to orbit, right-drag to pan, scroll to zoom, Escape to quit", config.name);
    } else {
        info!("scene '{}': Escape to quit", config.name);
    }

    let title = format!("Bedroom - {}", config.name);
    let event_loop = EventLoop::new()?;
    let mut app = App::new(ctx, title, !cli.no_ui);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
