use crate::{
    data_structures::mesh::{ModelVertex, Vertex},
    pipelines::{PipelineOptions, mk_render_pipeline},
    shader::Shader,
};

pub const CUBE_TEXTURE_GROUP: u32 = 0;
pub const SKY_GROUP: u32 = 1;

/// Background pipeline: samples the cube map along the vertex direction and
/// leaves the depth buffer untouched.
pub fn mk_skybox_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    cube_texture_layout: &wgpu::BindGroupLayout,
    uniform_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Skybox Pipeline Layout"),
        bind_group_layouts: &[cube_texture_layout, uniform_layout],
        push_constant_ranges: &[],
    });
    let shader = Shader::from_wgsl(device, "Skybox Shader", include_str!("skybox.wgsl"))?;

    Ok(mk_render_pipeline(
        device,
        &layout,
        &shader,
        PipelineOptions {
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
            ..PipelineOptions::opaque("Skybox Pipeline", color_format)
        },
        &[ModelVertex::desc()],
    ))
}
