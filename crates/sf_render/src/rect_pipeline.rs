//! Presents a recorded `DrawList`: the fill becomes the pass clear color and
//! every rect becomes one solid-colored quad, drawn in recording order with a
//! single indexed draw call.

use sf_core::canvas::{Color, DrawList};
use wgpu::util::DeviceExt;

use crate::camera::ScreenCamera;
use crate::gpu_context::GpuContext;
use crate::vertex::RectVertex;

const SHADER_SOURCE: &str = include_str!("shaders/rect.wgsl");

pub struct RectRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    quad_capacity: usize,
}

impl RectRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rect Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let camera_uniform = ScreenCamera::new(1, 1).build_uniform();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rect Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rect Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[RectVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let quad_capacity = 64;
        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            vertex_buffer: create_vertex_buffer(device, quad_capacity * 4),
            index_buffer: create_index_buffer(device, quad_capacity * 6),
            quad_capacity,
        }
    }

    /// Draw one frame and present it. Skips the frame if the surface is not
    /// available (minimized, lost).
    pub fn render(&mut self, gpu: &GpuContext, draw_list: &DrawList) {
        let Some((output, view)) = gpu.begin_frame() else {
            return;
        };

        let camera = ScreenCamera::new(gpu.size.0, gpu.size.1);
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.build_uniform()]),
        );

        let (vertices, indices) = build_quads(draw_list);
        self.ensure_capacity(&gpu.device, vertices.len() / 4);
        if !vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            gpu.queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }

        let clear = linear_color(draw_list.background().unwrap_or(Color::BLACK));
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Rect Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: clear[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if !indices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    // Buffers grow (power-of-two) but never shrink.
    fn ensure_capacity(&mut self, device: &wgpu::Device, quad_count: usize) {
        if quad_count <= self.quad_capacity {
            return;
        }
        self.quad_capacity = quad_count.next_power_of_two();
        self.vertex_buffer = create_vertex_buffer(device, self.quad_capacity * 4);
        self.index_buffer = create_index_buffer(device, self.quad_capacity * 6);
        log::debug!("Rect buffers grown to {} quads", self.quad_capacity);
    }
}

/// CPU-side mesh for every rect in the list, two triangles per rect.
pub fn build_quads(draw_list: &DrawList) -> (Vec<RectVertex>, Vec<u32>) {
    let count = draw_list.rects().count();
    let mut vertices = Vec::with_capacity(count * 4);
    let mut indices = Vec::with_capacity(count * 6);

    for (rect, color) in draw_list.rects() {
        let color = linear_color(*color);
        let base = vertices.len() as u32;
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.w, rect.y + rect.h);
        for position in [[left, top], [right, top], [right, bottom], [left, bottom]] {
            vertices.push(RectVertex { position, color });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// sRGB-encoded color to linear, since the surface format re-encodes on write.
pub fn linear_color(color: Color) -> [f32; 4] {
    let [r, g, b, a] = color.to_f32();
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Rect Vertex Buffer"),
        size: (vertex_capacity * std::mem::size_of::<RectVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Rect Index Buffer"),
        size: (index_capacity * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
