use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use ironsight_assets::{MeshData, MeshVertex, primitives};
use ironsight_common::Rgba;
use ironsight_scene::{FramePlan, LineSegment, MeshInstance, MeshKind};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Upper bound on mesh instances written per frame. The scene emits a fixed
/// handful plus the weapon, so this never binds in practice.
const MAX_INSTANCES: usize = 64;

/// Upper bound on line vertices written per frame: grid, wireframes, and a
/// full tracer pool together stay well under this.
const MAX_LINE_VERTICES: usize = 1024;

const MESH_KINDS: usize = 4;

fn mesh_slot(kind: MeshKind) -> usize {
    match kind {
        MeshKind::Plane => 0,
        MeshKind::Cube => 1,
        MeshKind::Cylinder => 2,
        MeshKind::Weapon => 3,
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    fn new(instance: &MeshInstance) -> Self {
        let cols = instance.transform.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: instance.color.to_f32_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// Contiguous instances sharing one mesh. Runs follow the plan's paint order,
/// so a kind may appear more than once.
struct InstanceRun {
    kind: MeshKind,
    range: Range<u32>,
}

fn instance_runs(instances: &[MeshInstance]) -> (Vec<InstanceData>, Vec<InstanceRun>) {
    let mut data = Vec::with_capacity(instances.len());
    let mut runs: Vec<InstanceRun> = Vec::new();
    for instance in instances {
        let end = data.len() as u32 + 1;
        match runs.last_mut() {
            Some(run) if run.kind == instance.kind => run.range.end = end,
            _ => runs.push(InstanceRun {
                kind: instance.kind,
                range: end - 1..end,
            }),
        }
        data.push(InstanceData::new(instance));
    }
    (data, runs)
}

fn line_vertices(lines: &[LineSegment]) -> Vec<LineVertex> {
    let mut verts = Vec::with_capacity(lines.len() * 2);
    for line in lines {
        let color = line.color.to_f32_array();
        verts.push(LineVertex {
            position: line.start.to_array(),
            color,
        });
        verts.push(LineVertex {
            position: line.end.to_array(),
            color,
        });
    }
    verts
}

/// Bottom-right third of the surface as (x, y, width, height), extended to
/// the surface edge when the size does not divide evenly.
fn pane_rect(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let x = width * 2 / 3;
    let y = height * 2 / 3;
    (x, y, width - x, height - y)
}

fn clear_color(color: Rgba) -> wgpu::Color {
    let [r, g, b, a] = color.to_f32_array();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// One camera's view-projection uniform and its bind group.
struct CameraUniform {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CameraUniform {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );
    }
}

/// Static vertex buffer for one mesh kind.
struct KindMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// wgpu-based frame plan renderer.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    world_camera: CameraUniform,
    weapon_camera: CameraUniform,
    meshes: [KindMesh; MESH_KINDS],
    instance_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl WgpuRenderer {
    /// Build pipelines and static mesh buffers. The weapon mesh is supplied
    /// by the caller, loaded from disk or a fallback.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        weapon_mesh: &MeshData,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
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

        let world_camera = CameraUniform::new(device, &bind_group_layout, "world_camera");
        let weapon_camera = CameraUniform::new(device, &bind_group_layout, "weapon_camera");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Mesh pipeline
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<MeshVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Line pipeline
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // One static vertex buffer per mesh kind, indexed by mesh_slot.
        let meshes = [
            Self::upload_mesh(device, "plane_mesh", &primitives::unit_plane()),
            Self::upload_mesh(device, "cube_mesh", &primitives::unit_cube()),
            Self::upload_mesh(device, "cylinder_mesh", &primitives::unit_cylinder()),
            Self::upload_mesh(device, "weapon_mesh", weapon_mesh),
        ];

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_buffer"),
            size: (MAX_LINE_VERTICES * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            weapon_vertices = weapon_mesh.vertex_count(),
            ?surface_format,
            "gpu renderer ready"
        );

        Self {
            mesh_pipeline,
            line_pipeline,
            world_camera,
            weapon_camera,
            meshes,
            instance_buffer,
            line_buffer,
            depth_texture,
            surface_format,
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> KindMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        KindMesh {
            vertex_buffer,
            vertex_count: mesh.vertex_count(),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.depth_texture = Self::create_depth_texture(device, self.width, self.height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame plan: the world pass, then the weapon inset pass.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        plan: &FramePlan,
    ) {
        let aspect = self.width as f32 / self.height as f32;
        self.world_camera.write(queue, plan.camera.view_projection(aspect));

        let (pane_x, pane_y, pane_w, pane_h) = pane_rect(self.width, self.height);
        let pane_aspect = pane_w as f32 / pane_h.max(1) as f32;
        self.weapon_camera
            .write(queue, plan.weapon.camera.view_projection(pane_aspect));

        // The weapon instance rides at the tail of the instance buffer so
        // both passes share one write.
        let scene_count = plan.instances.len().min(MAX_INSTANCES - 1);
        let (mut instances, runs) = instance_runs(&plan.instances[..scene_count]);
        let weapon_index = instances.len() as u32;
        instances.push(InstanceData::new(&plan.weapon.instance));
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut lines = line_vertices(&plan.lines);
        lines.truncate(MAX_LINE_VERTICES);
        if !lines.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&lines));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("world_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(plan.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.world_camera.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for run in &runs {
                let mesh = &self.meshes[mesh_slot(run.kind)];
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.draw(0..mesh.vertex_count, run.range.clone());
            }

            if !lines.is_empty() {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_bind_group(0, &self.world_camera.bind_group, &[]);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                pass.draw(0..lines.len() as u32, 0..1);
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("weapon_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_viewport(
                pane_x as f32,
                pane_y as f32,
                pane_w as f32,
                pane_h as f32,
                0.0,
                1.0,
            );
            pass.set_scissor_rect(pane_x, pane_y, pane_w, pane_h);

            let weapon = &self.meshes[mesh_slot(MeshKind::Weapon)];
            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.weapon_camera.bind_group, &[]);
            pass.set_vertex_buffer(0, weapon.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.draw(0..weapon.vertex_count, weapon_index..weapon_index + 1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
