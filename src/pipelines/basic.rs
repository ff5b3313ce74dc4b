use crate::{
    data_structures::{
        light::{MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS},
        mesh::{ModelVertex, Vertex},
    },
    pipelines::{Layouts, PipelineOptions, mk_render_pipeline},
    shader::Shader,
};

pub const TEXTURE_GROUP: u32 = 0;
pub const CAMERA_GROUP: u32 = 1;
pub const LIGHTS_GROUP: u32 = 2;
pub const OBJECT_GROUP: u32 = 3;

/// WGSL of the lit pipeline, with the light array bounds declared from the
/// same constants [`LightsUniform`](crate::data_structures::light::LightsUniform)
/// is packed with.
pub fn lit_shader_source() -> String {
    format!(
        "const MAX_POINT_LIGHTS: u32 = {MAX_POINT_LIGHTS}u;\nconst MAX_SPOT_LIGHTS: u32 = {MAX_SPOT_LIGHTS}u;\n\n{}",
        include_str!("shader.wgsl")
    )
}

/// Textured Phong pipeline with shadows.
pub fn mk_basic_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &Layouts,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Lit Pipeline Layout"),
        bind_group_layouts: &[
            &layouts.texture,
            camera_bind_group_layout,
            &layouts.lights,
            &layouts.uniform,
        ],
        push_constant_ranges: &[],
    });

    let shader = Shader::from_wgsl(device, "Lit Shader", &lit_shader_source())?;

    Ok(mk_render_pipeline(
        device,
        &render_pipeline_layout,
        &shader,
        PipelineOptions::opaque("Lit Pipeline", color_format),
        &[ModelVertex::desc()],
    ))
}
