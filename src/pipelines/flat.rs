use cgmath::Matrix4;

use crate::{
    data_structures::mesh::{ModelVertex, Vertex},
    pipelines::{PipelineOptions, mk_render_pipeline},
    shader::Shader,
};

/// Single model-view-projection matrix of the flat pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniform {
    pub mvp: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for FlatUniform {
    fn from(mvp: Matrix4<f32>) -> Self {
        Self { mvp: mvp.into() }
    }
}

/// Unlit pipeline of the early lectures: vertices are coloured by their
/// clamped model-space position.
pub fn mk_flat_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    uniform_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Flat Pipeline Layout"),
        bind_group_layouts: &[uniform_layout],
        push_constant_ranges: &[],
    });
    let shader = Shader::from_wgsl(device, "Flat Shader", include_str!("flat.wgsl"))?;

    Ok(mk_render_pipeline(
        device,
        &layout,
        &shader,
        PipelineOptions::opaque("Flat Pipeline", color_format),
        &[ModelVertex::desc()],
    ))
}
