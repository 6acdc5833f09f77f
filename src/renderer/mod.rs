//! Rasterizing wgpu backend.
//!
//! Geometry is uploaded once per unique [`GeometryId`](crate::scene::GeometryId)
//! at startup. Each frame writes the camera, lights and one instance record per
//! draw, then issues one indexed draw per mesh: opaque meshes with depth writes,
//! transparent ones blended on top without them.

mod draw_list;
mod hud;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::{GpuContext, Viewport};
use crate::error::RenderError;
use crate::frame::FrameInfo;
use crate::render_loop::{FrameStatus, RenderTarget};
use crate::scene::Scene;
use crate::types::{CameraUniform, InstanceData, LightUniform, Vertex};

pub use draw_list::{Draw, DrawList};
pub use hud::{Hud, HudStats};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// What to do after `get_current_texture` fails
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame
    Reconfigured,
    /// Transient error; skip the current frame
    SkipFrame,
    /// Out of memory; stop rendering
    Fatal,
}

pub fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

pub(crate) fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub struct SceneRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    opaque_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    hud: Option<Hud>,
    node_count: usize,
    mesh_count: usize,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, scene: &Scene, show_hud: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let caps = surface.get_capabilities(gpu.adapter());
        let format = choose_surface_format(&caps)
            .ok_or_else(|| anyhow!("surface is not supported by the selected adapter"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &config);

        let device = gpu.device();
        let depth_view = Self::create_depth_view(device, config.width, config.height);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[scene.lights().to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[Self::uniform_entry(0), Self::uniform_entry(1)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let opaque_pipeline = Self::create_pipeline(device, &pipeline_layout, &shader, format, false);
        let blend_pipeline = Self::create_pipeline(device, &pipeline_layout, &shader, format, true);

        let meshes = Self::upload_meshes(device, scene);
        let instance_capacity = scene.mesh_count().max(1);
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);

        let hud = show_hud.then(|| Hud::new(&window, device, format));

        info!(
            "renderer ready: {}x{} {:?}, {} geometries uploaded",
            config.width,
            config.height,
            format,
            meshes.len()
        );

        Ok(Self {
            window,
            gpu,
            surface,
            config,
            depth_view,
            opaque_pipeline,
            blend_pipeline,
            camera_buffer,
            light_buffer,
            bind_group,
            meshes,
            instance_buffer,
            instance_capacity,
            hud,
            node_count: scene.node_count(),
            mesh_count: scene.mesh_count(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    /// Forward a window event to the HUD; true when it was consumed
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        match self.hud.as_mut() {
            Some(hud) => hud.on_window_event(&self.window, event),
            None => false,
        }
    }

    fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        blended: bool,
    ) -> wgpu::RenderPipeline {
        let (label, blend) = if blended {
            ("Transparent Pipeline", wgpu::BlendState::ALPHA_BLENDING)
        } else {
            ("Opaque Pipeline", wgpu::BlendState::REPLACE)
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), InstanceData::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: !blended,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn upload_meshes(device: &wgpu::Device, scene: &Scene) -> Vec<GpuMesh> {
        scene
            .geometries()
            .iter()
            .map(|geometry| {
                let data = geometry.tessellate();
                let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(geometry.kind_name()),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(geometry.kind_name()),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                GpuMesh {
                    vertices,
                    indices,
                    index_count: data.indices.len() as u32,
                }
            })
            .collect()
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * std::mem::size_of::<InstanceData>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn write_frame_data(&mut self, draws: &DrawList) {
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        if draws.len() > self.instance_capacity {
            self.instance_capacity = draws.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.instance_capacity);
            debug!("instance buffer grown to {}", self.instance_capacity);
        }

        let instances: Vec<InstanceData> = draws.draws.iter().map(|d| d.instance).collect();
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[draws.camera]));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[draws.lights]));
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
    }

    fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>, RenderError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(Some(texture)),
            Err(err) => match surface_error_action(&err) {
                SurfaceErrorAction::Reconfigured => {
                    debug!("surface {:?}, reconfiguring", err);
                    self.surface.configure(self.gpu.device(), &self.config);
                    Ok(None)
                }
                SurfaceErrorAction::SkipFrame => Err(RenderError::Surface(err.to_string())),
                SurfaceErrorAction::Fatal => Err(RenderError::OutOfMemory),
            },
        }
    }
}

impl RenderTarget for SceneRenderer {
    fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(self.gpu.device(), &self.config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), viewport.width, viewport.height);
    }

    fn render(&mut self, draws: &DrawList, frame: &FrameInfo) -> Result<FrameStatus, RenderError> {
        self.write_frame_data(draws);

        let Some(output) = self.acquire()? else {
            return Ok(FrameStatus::Skipped);
        };
        if output.suboptimal {
            warn!("surface texture is suboptimal");
        }
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let [r, g, b, a] = draws.clear_color.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut blended = None;
            for (index, draw) in draws.draws.iter().enumerate() {
                if blended != Some(draw.transparent) {
                    let pipeline = if draw.transparent {
                        &self.blend_pipeline
                    } else {
                        &self.opaque_pipeline
                    };
                    pass.set_pipeline(pipeline);
                    blended = Some(draw.transparent);
                }

                let mesh = &self.meshes[draw.geometry.index()];
                let instance = index as u32;
                pass.set_vertex_buffer(0, mesh.vertices.slice(..));
                pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
            }
        }

        let mut command_buffers = Vec::new();
        if let Some(hud) = self.hud.as_mut() {
            let stats = HudStats {
                fps: frame.fps,
                frame_time_ms: frame.delta * 1000.0,
                camera_position: {
                    let [x, y, z, _] = draws.camera.eye;
                    [x, y, z]
                },
                nodes: self.node_count,
                meshes: self.mesh_count,
                viewport: Viewport::new(self.config.width, self.config.height),
            };
            command_buffers = hud.paint(
                &self.window,
                self.gpu.device(),
                self.gpu.queue(),
                &mut encoder,
                &view,
                &stats,
            );
        }

        command_buffers.push(encoder.finish());
        self.gpu.queue().submit(command_buffers);
        self.window.pre_present_notify();
        output.present();

        Ok(FrameStatus::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_actions() {
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Other),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
