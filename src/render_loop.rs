//! Per-frame driver.
//!
//! The loop owns no window or GPU state. Whoever owns the window calls
//! [`RenderLoop::start`] once the output surface exists, [`RenderLoop::on_resize`]
//! for size changes and [`RenderLoop::tick`] once per redraw.

use log::{debug, warn};

use crate::context::AppContext;
use crate::core::{Controller, Viewport};
use crate::error::RenderError;
use crate::frame::FrameInfo;
use crate::renderer::DrawList;

/// FPS is averaged over windows of this many seconds
const FPS_WINDOW: f32 = 1.0;

/// What became of a frame handed to a [`RenderTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// Nothing was shown, e.g. the surface had to be reconfigured first
    Skipped,
}

/// Anything a frame can be drawn into
pub trait RenderTarget {
    fn resize(&mut self, viewport: Viewport);

    fn render(&mut self, draws: &DrawList, frame: &FrameInfo) -> Result<FrameStatus, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No output surface yet; ticks and resizes are ignored
    Uninitialized,
    Running,
}

#[derive(Debug, Clone, Default)]
struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < FPS_WINDOW {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }
}

#[derive(Debug, Clone)]
pub struct RenderLoop {
    state: LoopState,
    fps: FpsCounter,
    frames_drawn: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Uninitialized,
            fps: FpsCounter::default(),
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// The output surface now exists at `viewport`
    pub fn start(&mut self, ctx: &mut AppContext, target: &mut dyn RenderTarget, viewport: Viewport) {
        self.state = LoopState::Running;
        if !viewport.is_empty() {
            Self::apply_viewport(ctx, target, viewport);
        }
        debug!("render loop running at {}x{}", ctx.viewport.width, ctx.viewport.height);
    }

    /// Returns whether the resize was applied.
    ///
    /// Only the camera projection and the target change; scene transforms
    /// are left as they are.
    pub fn on_resize(&mut self, ctx: &mut AppContext, target: &mut dyn RenderTarget, viewport: Viewport) -> bool {
        if self.state == LoopState::Uninitialized {
            debug!("resize to {}x{} before start, ignored", viewport.width, viewport.height);
            return false;
        }
        if viewport.is_empty() {
            return false;
        }
        Self::apply_viewport(ctx, target, viewport);
        true
    }

    /// Advance the orbit controller, then draw the scene once.
    ///
    /// Surface hiccups are logged and the frame dropped; only fatal errors
    /// are returned.
    pub fn tick(
        &mut self,
        ctx: &mut AppContext,
        input: &dyn Controller,
        frame: FrameInfo,
        target: &mut dyn RenderTarget,
    ) -> Result<(), RenderError> {
        if self.state == LoopState::Uninitialized {
            return Ok(());
        }

        if let Some(orbit) = ctx.orbit.as_mut() {
            orbit.handle_input(input, &ctx.camera, ctx.viewport);
            orbit.update(&mut ctx.camera);
        }

        if let Some(fps) = self.fps.record(frame.delta) {
            debug!("{:.1} fps", fps);
        }
        let frame = FrameInfo {
            fps: self.fps.fps,
            ..frame
        };

        let draws = DrawList::build(&ctx.scene, &ctx.camera);
        match target.render(&draws, &frame) {
            Ok(FrameStatus::Presented) => {
                self.frames_drawn += 1;
                Ok(())
            }
            Ok(FrameStatus::Skipped) => {
                debug!("frame {} skipped", frame.number);
                Ok(())
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!("frame {} dropped: {}", frame.number, err);
                Ok(())
            }
        }
    }

    fn apply_viewport(ctx: &mut AppContext, target: &mut dyn RenderTarget, viewport: Viewport) {
        ctx.viewport = viewport;
        ctx.camera.set_aspect(viewport.aspect());
        ctx.camera.update_projection_matrix();
        target.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_reports_once_per_window() {
        let mut counter = FpsCounter::default();
        let reports: Vec<f32> = (0..90).filter_map(|_| counter.record(1.0 / 60.0)).collect();
        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 60.0).abs() < 1.0);
    }

    #[test]
    fn test_new_loop_is_uninitialized() {
        let render_loop = RenderLoop::new();
        assert_eq!(render_loop.state(), LoopState::Uninitialized);
        assert_eq!(render_loop.frames_drawn(), 0);
        assert_eq!(render_loop.fps(), 0.0);
    }
}
