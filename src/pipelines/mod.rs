//! Render pipelines and the bind group layouts they share.
//!
//! Every pipeline is built through [`mk_render_pipeline`]. Uniform data
//! (camera, per object, per shadow pass, skybox) all use the single-buffer
//! layout from [`uniform_layout`]; the lit pipeline additionally binds the
//! light uniform together with every shadow map through [`lights_layout`].

use crate::{
    data_structures::{
        light::{MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS},
        texture::Texture,
    },
    resources::texture::{cube_texture_layout, texture_layout},
    shader::Shader,
};

pub mod basic;
pub mod flat;
pub mod omni_shadow;
pub mod shadow;
pub mod skybox;

/// Binding of the first omnidirectional shadow cube in [`lights_layout`].
/// Point light maps come first, then spot light maps.
pub const FIRST_OMNI_BINDING: u32 = 3;
/// Number of cube shadow maps bound to the lit pipeline.
pub const OMNI_SHADOW_SLOTS: usize = MAX_POINT_LIGHTS + MAX_SPOT_LIGHTS;

/// One uniform buffer at binding 0, visible to both shader stages.
pub fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    })
}

/// Light uniform (0), directional shadow map (1), comparison sampler (2)
/// and the cube shadow maps from [`FIRST_OMNI_BINDING`] on.
pub fn lights_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let depth_texture = |binding, view_dimension| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension,
            sample_type: wgpu::TextureSampleType::Depth,
        },
        count: None,
    };

    let mut entries = vec![
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        },
        depth_texture(1, wgpu::TextureViewDimension::D2),
        wgpu::BindGroupLayoutEntry {
            binding: 2,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
            count: None,
        },
    ];
    entries.extend(
        (0..OMNI_SHADOW_SLOTS as u32)
            .map(|slot| depth_texture(FIRST_OMNI_BINDING + slot, wgpu::TextureViewDimension::Cube)),
    );

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("lights_bind_group_layout"),
    })
}

/// Bind group layouts created once per context and shared by every
/// pipeline and every resource bound to them.
#[derive(Debug)]
pub struct Layouts {
    pub texture: wgpu::BindGroupLayout,
    pub cube_texture: wgpu::BindGroupLayout,
    pub uniform: wgpu::BindGroupLayout,
    pub lights: wgpu::BindGroupLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            texture: texture_layout(device),
            cube_texture: cube_texture_layout(device),
            uniform: uniform_layout(device, "uniform_bind_group_layout"),
            lights: lights_layout(device),
        }
    }
}

/// Fixed-function state that differs between the pipelines.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions<'a> {
    pub label: &'a str,
    /// `None` for depth-only passes.
    pub color_format: Option<wgpu::TextureFormat>,
    /// Whether the shader has an `fs_main` entry point.
    pub fragment: bool,
    pub depth_write: bool,
    pub depth_compare: wgpu::CompareFunction,
}

impl<'a> PipelineOptions<'a> {
    /// Colour output with ordinary depth testing.
    pub fn opaque(label: &'a str, color_format: wgpu::TextureFormat) -> Self {
        Self {
            label,
            color_format: Some(color_format),
            fragment: true,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        }
    }

    /// Depth output only. `fragment` is set when the shader writes
    /// `frag_depth` itself.
    pub fn depth_only(label: &'a str, fragment: bool) -> Self {
        Self {
            label,
            color_format: None,
            fragment,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        }
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &Shader,
    options: PipelineOptions<'_>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
) -> wgpu::RenderPipeline {
    let targets = options
        .color_format
        .map(|format| wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })
        .into_iter()
        .map(Some)
        .collect::<Vec<_>>();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(options.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader.module(),
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: options.fragment.then(|| wgpu::FragmentState {
            module: shader.module(),
            entry_point: Some("fs_main"),
            targets: &targets,
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // The lecture meshes have mixed winding and the cube face
            // transforms mirror it, so nothing is culled.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: options.depth_write,
            depth_compare: options.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
