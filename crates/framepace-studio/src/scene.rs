use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Result};
use bytemuck::{Pod, Zeroable};
use framepace_engine::scene::Scene;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};

/// Rotation speed, radians per second.
const SPIN: f32 = 1.0;

/// Background pulse period, seconds.
const PULSE_PERIOD: f32 = 4.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    angle: f32,
    aspect: f32,
    _pad: [f32; 2], // 16-byte alignment
}

/// A triangle spinning over a slowly pulsing background.
///
/// `advance` integrates wall-clock time since the previous advance, so the
/// animation speed does not depend on the refresh rate.
pub struct TriangleScene {
    gpu: Gpu,
    window: Arc<Window>,
    pipeline: wgpu::RenderPipeline,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    last_update: Instant,
    angle: f32,
    elapsed: f32,
}

impl TriangleScene {
    pub fn new(gpu: Gpu, shader_src: &str, window: Arc<Window>) -> Result<Self> {
        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("framepace scene shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("framepace scene ubo"),
            contents: bytemuck::bytes_of(&SceneUniform {
                angle: 0.0,
                aspect: 1.0,
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("framepace scene bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("framepace scene bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("framepace scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("framepace scene pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            gpu,
            window,
            pipeline,
            uniform,
            bind_group,
            last_update: Instant::now(),
            angle: 0.0,
            elapsed: 0.0,
        })
    }

    fn background(&self) -> wgpu::Color {
        let phase = (self.elapsed / PULSE_PERIOD) * std::f32::consts::TAU;
        let level = 0.04 + 0.04 * (0.5 + 0.5 * phase.sin());
        wgpu::Color {
            r: level as f64,
            g: level as f64,
            b: (level * 1.6) as f64,
            a: 1.0,
        }
    }

    /// Follows the window size; the host does not forward resize events.
    fn track_window_size(&mut self) {
        let size = self.window.inner_size();
        if size != self.gpu.size() {
            self.gpu.resize(size);
        }
    }
}

impl Scene for TriangleScene {
    fn advance(&mut self) -> Result<()> {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        self.elapsed += dt;
        self.angle = (self.angle + dt * SPIN) % std::f32::consts::TAU;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.track_window_size();

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => match self.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => bail!("GPU surface failed beyond recovery"),
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => return Ok(()),
            },
        };

        let u = SceneUniform {
            angle: self.angle,
            aspect: size.width as f32 / size.height as f32,
            _pad: [0.0; 2],
        };
        self.gpu.queue().write_buffer(&self.uniform, 0, bytemuck::bytes_of(&u));

        // Pass borrows frame.encoder; dropped before submit() takes the frame.
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("framepace scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }
}
