//! wgpu scene renderer
//!
//! Uploads the static scene once, then per frame writes the camera and spot
//! light uniforms, refreshes the helper lines when they changed, and draws
//! everything into a [`RenderTarget`].

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use spot_core::{Color, SceneGraph, SceneObject, SpotLight, SpotLightHelper};

use crate::camera::PerspectiveCamera;
use crate::config::ViewportConfig;
use crate::error::RenderError;
use crate::pipeline::{PipelineConfig, uniform_bind_group, uniform_bind_group_layout};
use crate::target::{DEPTH_FORMAT, RenderTarget};
use crate::texture::{GpuTexture, load_or_fallback};
use crate::traits::RenderEngine;
use crate::vertex::{LineVertex, MeshVertex};

/// Per-object uniform data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Model matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix.
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear base color (a = 1).
    pub color: [f32; 4],
    /// xy = UV repeat, z = double sided, w = textured.
    pub params: [f32; 4],
}

impl ObjectUniform {
    /// Build the uniform for a scene object
    pub fn from_object(object: &SceneObject) -> Self {
        let model = object.transform.matrix();
        let [r, g, b] = object.material.color.to_linear();
        let (repeat, textured) = match &object.material.texture {
            Some(texture) => (texture.repeat.to_array(), 1.0),
            None => ([1.0, 1.0], 0.0),
        };
        let double_sided = if object.material.double_sided { 1.0 } else { 0.0 };

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: [r, g, b, 1.0],
            params: [repeat[0], repeat[1], double_sided, textured],
        }
    }
}

/// Spot light uniform data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpotLightUniform {
    /// xyz = position, w = range (0 = unlimited).
    pub position: [f32; 4],
    /// xyz = direction, w = decay exponent.
    pub direction: [f32; 4],
    /// rgb = linear color scaled by intensity.
    pub color: [f32; 4],
    /// x = cos(outer angle), y = cos(inner angle).
    pub cone: [f32; 4],
    /// rgb = ambient term, w = shininess.
    pub ambient: [f32; 4],
    /// x = specular strength.
    pub specular: [f32; 4],
}

impl SpotLightUniform {
    /// Build the uniform for a light with the given viewport shading
    pub fn new(light: &SpotLight, viewport: &ViewportConfig) -> Self {
        let [r, g, b] = light.color.to_linear();
        let direction = light.direction();
        let (outer, inner) = light.cone_cosines();
        let [ar, ag, ab] = viewport.ambient_color;
        let ambient = viewport.ambient_strength;

        Self {
            position: light.position.extend(light.distance.max(0.0)).to_array(),
            direction: direction.extend(light.decay).to_array(),
            color: [
                r * light.intensity,
                g * light.intensity,
                b * light.intensity,
                1.0,
            ],
            cone: [outer, inner, 0.0, 0.0],
            ambient: [ar * ambient, ag * ambient, ab * ambient, viewport.shininess],
            specular: [viewport.specular_strength, 0.0, 0.0, 0.0],
        }
    }
}

/// Line list vertices for the helper cone
pub fn helper_vertices(helper: &SpotLightHelper) -> Vec<LineVertex> {
    let color = helper.color().to_linear();
    helper
        .segments()
        .iter()
        .flat_map(|[a, b]| {
            [
                LineVertex {
                    position: a.to_array(),
                    color,
                },
                LineVertex {
                    position: b.to_array(),
                    color,
                },
            ]
        })
        .collect()
}

/// Clear color for the target: linear for sRGB formats, encoded otherwise
pub fn clear_color(background: Color, format: wgpu::TextureFormat) -> wgpu::Color {
    let [r, g, b] = if format.is_srgb() {
        background.to_linear()
    } else {
        background.to_array()
    };
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

fn shader_source(body: &str, format: wgpu::TextureFormat) -> String {
    format!(
        "const ENCODE_SRGB: bool = {};\n{}",
        !format.is_srgb(),
        body
    )
}

struct GpuObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    // Kept alive for the bind group
    _uniform_buffer: wgpu::Buffer,
    _texture: Option<GpuTexture>,
    bind_group: wgpu::BindGroup,
}

struct HelperLines {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    revision: u64,
}

/// Forward renderer for the spotlight scene
pub struct SceneRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    format: wgpu::TextureFormat,
    viewport: ViewportConfig,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    objects: Vec<GpuObject>,
    helper: HelperLines,
}

impl SceneRenderer {
    /// Create the pipelines and upload the scene's static objects
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        scene: &SceneGraph,
        viewport: ViewportConfig,
    ) -> Self {
        let camera_layout =
            uniform_bind_group_layout(&device, "Camera", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let light_layout =
            uniform_bind_group_layout(&device, "Light", wgpu::ShaderStages::FRAGMENT);
        let object_layout = object_bind_group_layout(&device);

        let phong_source = shader_source(include_str!("shaders/phong.wgsl"), format);
        let mesh_layouts = [&camera_layout, &object_layout, &light_layout];
        let mesh_pipeline =
            PipelineConfig::new("Phong", &phong_source, format, DEPTH_FORMAT, &mesh_layouts)
                .with_vertex_layouts(vec![MeshVertex::layout()])
                .build(&device);

        let line_source = shader_source(include_str!("shaders/line.wgsl"), format);
        let line_layouts = [&camera_layout];
        let line_pipeline =
            PipelineConfig::new("Helper", &line_source, format, DEPTH_FORMAT, &line_layouts)
                .with_vertex_layouts(vec![LineVertex::layout()])
                .with_topology(wgpu::PrimitiveTopology::LineList)
                .build(&device);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[PerspectiveCamera::default().uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group =
            uniform_bind_group(&device, &camera_layout, &camera_buffer, "Camera");

        let light = *scene.light().lock();
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Spot Light Buffer"),
            contents: bytemuck::cast_slice(&[SpotLightUniform::new(&light, &viewport)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_bind_group = uniform_bind_group(&device, &light_layout, &light_buffer, "Light");

        let white = GpuTexture::white(&device, &queue);
        let objects: Vec<GpuObject> = scene
            .objects()
            .iter()
            .map(|object| upload_object(&device, &queue, &object_layout, &white, object))
            .collect();

        let helper = {
            let helper = scene.helper().lock();
            let vertices = helper_vertices(&helper);
            HelperLines {
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Spot Light Helper Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                }),
                vertex_count: vertices.len() as u32,
                revision: helper.revision(),
            }
        };

        tracing::info!(
            "Scene renderer ready: {} objects, format {:?}",
            objects.len(),
            format
        );

        Self {
            device,
            queue,
            format,
            viewport,
            mesh_pipeline,
            line_pipeline,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            objects,
            helper,
        }
    }

    fn sync_helper(&mut self, helper: &SpotLightHelper) {
        if helper.revision() == self.helper.revision {
            return;
        }
        let vertices = helper_vertices(helper);
        if vertices.len() as u32 == self.helper.vertex_count {
            self.queue.write_buffer(
                &self.helper.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        } else {
            self.helper.vertex_buffer =
                self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Spot Light Helper Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });
            self.helper.vertex_count = vertices.len() as u32;
        }
        self.helper.revision = helper.revision();
    }
}

impl RenderEngine<RenderTarget> for SceneRenderer {
    fn render(
        &mut self,
        target: &mut RenderTarget,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        if scene.objects().len() != self.objects.len() {
            return Err(RenderError::SceneChanged {
                expected: self.objects.len(),
                actual: scene.objects().len(),
            });
        }
        if target.is_empty() {
            return Ok(());
        }

        self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera.uniform()]));

        let light = *scene.light().lock();
        self.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[SpotLightUniform::new(&light, &self.viewport)]),
        );

        if self.viewport.show_helper {
            let helper = scene.helper().lock();
            self.sync_helper(&helper);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(scene.background(), self.format)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_bind_group(2, &self.light_bind_group, &[]);
            for object in &self.objects {
                pass.set_bind_group(1, &object.bind_group, &[]);
                pass.set_vertex_buffer(0, object.vertex_buffer.slice(..));
                pass.set_index_buffer(object.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..object.index_count, 0, 0..1);
            }

            if self.viewport.show_helper && self.helper.vertex_count > 0 {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, self.helper.vertex_buffer.slice(..));
                pass.draw(0..self.helper.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

fn object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn upload_object(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    white: &GpuTexture,
    object: &SceneObject,
) -> GpuObject {
    let mesh = object.geometry.mesh();
    let vertices = MeshVertex::from_mesh(&mesh);

    tracing::debug!(
        "Uploading {}: {} vertices, {} triangles",
        object.name,
        vertices.len(),
        mesh.triangle_count()
    );

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Vertex Buffer", object.name)),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Index Buffer", object.name)),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Uniform Buffer", object.name)),
        contents: bytemuck::cast_slice(&[ObjectUniform::from_object(object)]),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    let texture = object.material.texture.as_ref().map(|texture| {
        let image = load_or_fallback(texture);
        GpuTexture::upload(device, queue, &image, texture)
    });
    let bound = texture.as_ref().unwrap_or(white);

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{} Bind Group", object.name)),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&bound.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&bound.sampler),
            },
        ],
    });

    GpuObject {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        _uniform_buffer: uniform_buffer,
        _texture: texture,
        bind_group,
    }
}
