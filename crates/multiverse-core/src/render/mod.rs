//! wgpu renderer shared by the web and native frontends.
//!
//! Three passes over one render target: lit node meshes, dashed connection
//! lines, then billboarded stars and sparkles. Static geometry (meshes and
//! point clouds) is uploaded once; per frame only the globals, mesh
//! instances and dash vertices change.

use crate::color::linear_rgb;
use crate::draw::{self, Globals, LineVertex, MeshInstance, PointInstance};
use crate::error::RenderError;
use crate::geometry::{MeshKind, MeshVertex};
use crate::scene::Scene;
use crate::SCENE_WGSL;
use fnv::FnvHashMap;
use wgpu::util::DeviceExt;

mod helpers;
use helpers::{create_depth_view, make_pipeline, DynamicBuffer, PipelineDesc};

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub struct Renderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,

    meshes: FnvHashMap<MeshKind, GpuMesh>,
    mesh_instances: DynamicBuffer,
    quad_vb: wgpu::Buffer,
    points: DynamicBuffer,
    point_count: u32,
    lines: DynamicBuffer,

    line_scratch: Vec<LineVertex>,
    instance_scratch: Vec<MeshInstance>,
    clear_color: wgpu::Color,
}

impl<'w> Renderer<'w> {
    /// Build device and pipelines on `surface`. Nothing is drawn besides the
    /// clear colour until [`Renderer::load_scene`] uploads static geometry.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{}", format, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4,
                    3 => Float32x4,
                    4 => Float32x4,
                    5 => Float32x4,
                    6 => Float32x4,
                    7 => Float32x4,
                    8 => Float32x4,
                    9 => Float32x4,
                    10 => Float32x4,
                    11 => Float32x4
                ],
            },
        ];
        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
        }];
        let point_buffers = [
            // slot 0: billboard corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            // slot 1: per-point data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x3,
                    2 => Float32,
                    3 => Float32x4,
                    4 => Float32,
                    5 => Float32
                ],
            },
        ];

        let mesh_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineDesc {
                label: "mesh_pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_mesh",
                buffers: &mesh_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
            },
        );
        let line_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineDesc {
                label: "line_pipeline",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                buffers: &line_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: false,
            },
        );
        let point_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            format,
            &PipelineDesc {
                label: "point_pipeline",
                vs_entry: "vs_point",
                fs_entry: "fs_point",
                buffers: &point_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: false,
            },
        );

        // Two triangles forming a unit billboard
        let quad: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            depth_view: create_depth_view(&device, config.width, config.height),
            mesh_instances: DynamicBuffer::new(
                &device,
                "mesh_instances",
                (std::mem::size_of::<MeshInstance>() * 16) as u64,
            ),
            lines: DynamicBuffer::new(
                &device,
                "dash_lines",
                (std::mem::size_of::<LineVertex>() * 256) as u64,
            ),
            points: DynamicBuffer::new(
                &device,
                "points",
                (std::mem::size_of::<PointInstance>() * 4096) as u64,
            ),
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            mesh_pipeline,
            line_pipeline,
            point_pipeline,
            meshes: FnvHashMap::default(),
            quad_vb,
            point_count: 0,
            line_scratch: Vec::new(),
            instance_scratch: Vec::new(),
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Upload the scene's meshes, point clouds and background colour.
    pub fn load_scene(&mut self, scene: &Scene) {
        for node in &scene.nodes {
            for part in &node.shape.parts {
                let device = &self.device;
                self.meshes
                    .entry(part.mesh)
                    .or_insert_with(|| upload_mesh(device, part.mesh));
            }
        }

        let point_data = draw::point_instances(scene);
        self.points
            .write(&self.device, &self.queue, bytemuck::cast_slice(&point_data));
        self.point_count = point_data.len() as u32;

        let bg = linear_rgb(scene.env.background);
        self.clear_color = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: 1.0,
        };
        log::info!(
            "[gpu] scene loaded: {} meshes, {} points",
            self.meshes.len(),
            self.point_count
        );
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Reapply the current configuration, e.g. after `SurfaceError::Lost`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let globals = draw::globals(scene);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let batches = draw::mesh_batches(scene);
        self.instance_scratch.clear();
        let mut ranges = Vec::with_capacity(batches.len());
        for b in &batches {
            let start = self.instance_scratch.len() as u32;
            self.instance_scratch.extend_from_slice(&b.instances);
            ranges.push((b.mesh, start..self.instance_scratch.len() as u32));
        }
        self.mesh_instances.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.instance_scratch),
        );

        draw::connection_vertices(scene, &mut self.line_scratch);
        self.lines.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.line_scratch),
        );
        let line_vertex_count = self.line_scratch.len() as u32;

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
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
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_vertex_buffer(1, self.mesh_instances.buffer.slice(..));
            for (kind, range) in ranges {
                if let Some(mesh) = self.meshes.get(&kind) {
                    rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                    rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, range);
                }
            }

            if line_vertex_count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                rpass.draw(0..line_vertex_count, 0..1);
            }

            if self.point_count > 0 {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.points.buffer.slice(..));
                rpass.draw(0..6, 0..self.point_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn upload_mesh(device: &wgpu::Device, kind: MeshKind) -> GpuMesh {
    let mesh = kind.build();
    let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vb"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_ib"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertices,
        indices,
        index_count: mesh.indices.len() as u32,
    }
}
