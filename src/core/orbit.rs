//! Damped orbit camera control.
//!
//! Input is turned into pending deltas (rotation angles, a dolly scale and a
//! pan offset). Each [`OrbitController::update`] applies them to the camera
//! in spherical coordinates around the target. With damping on, only
//! `damping_factor` of a pending rotation or pan is applied per update and the
//! remainder decays, so motion eases out over the following frames.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::OrbitConfig;

use super::controller::{Button, Controller};
use super::window::Viewport;

/// Keeps the camera off the poles, where the up vector degenerates
const POLAR_EPSILON: f32 = 1e-6;
/// Pending deltas below this are dropped
const SNAP_EPSILON: f32 = 1e-6;
/// Dolly scale per wheel notch at zoom_speed 1
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    pub target: Vec3,
    config: OrbitConfig,
    /// Pending azimuth (theta) and polar (phi) change in radians
    rotate_delta: Vec2,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            target: Vec3::from_array(config.target),
            config,
            rotate_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn has_pending_motion(&self) -> bool {
        self.rotate_delta != Vec2::ZERO || self.scale != 1.0 || self.pan_offset != Vec3::ZERO
    }

    /// Turn this frame's pointer drag and wheel movement into pending deltas.
    ///
    /// Left drag rotates, right or middle drag pans, the wheel dollies.
    pub fn handle_input(&mut self, input: &dyn Controller, camera: &Camera, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        let height = viewport.height as f32;
        let pointer = input.pointer_delta();

        if pointer != Vec2::ZERO {
            if input.is_down(Button::MouseLeft) {
                let angles = TAU * pointer / height * self.config.rotate_speed;
                self.rotate_left(angles.x);
                self.rotate_up(angles.y);
            } else if input.is_down(Button::MouseRight) || input.is_down(Button::MouseMiddle) {
                self.pan(pointer * self.config.pan_speed, camera, height);
            }
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.dolly(ZOOM_BASE.powf(self.config.zoom_speed * scroll));
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.rotate_delta.x -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.rotate_delta.y -= angle;
    }

    /// Scale the orbit radius; values below 1 move the camera closer
    pub fn dolly(&mut self, scale: f32) {
        self.scale *= scale;
    }

    /// Screen-space pan: moving the pointer drags the scene along with it
    fn pan(&mut self, delta: Vec2, camera: &Camera, viewport_height: f32) {
        let distance = (camera.position - self.target).length();
        let half_fov = (camera.fov_y_degrees * 0.5).to_radians();
        let world_per_pixel = 2.0 * distance * half_fov.tan() / viewport_height;

        self.pan_offset += camera.right() * (-delta.x * world_per_pixel);
        self.pan_offset += camera.up() * (delta.y * world_per_pixel);
    }

    /// Apply pending motion to `camera`; returns whether the camera moved.
    ///
    /// Without pending motion the camera is not touched at all.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.has_pending_motion() {
            return false;
        }

        let step = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        theta += self.rotate_delta.x * step;
        phi = (phi + self.rotate_delta.y * step).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        radius = (radius * self.scale)
            .max(self.config.min_distance)
            .min(self.config.max_distance);
        self.target += self.pan_offset * step;

        let sin_phi = phi.sin();
        let offset = Vec3::new(sin_phi * theta.sin(), phi.cos(), sin_phi * theta.cos()) * radius;
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if self.config.enable_damping {
            self.rotate_delta *= 1.0 - step;
            self.pan_offset *= 1.0 - step;
            if self.rotate_delta.abs().max_element() < SNAP_EPSILON {
                self.rotate_delta = Vec2::ZERO;
            }
            if self.pan_offset.abs().max_element() < SNAP_EPSILON {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.rotate_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        true
    }
}
