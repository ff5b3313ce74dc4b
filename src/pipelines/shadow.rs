use cgmath::Matrix4;

use crate::{
    data_structures::mesh::{ModelVertex, Vertex},
    pipelines::{PipelineOptions, mk_render_pipeline},
    shader::Shader,
};

pub const PASS_GROUP: u32 = 0;
pub const OBJECT_GROUP: u32 = 1;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowPassUniform {
    pub light_transform: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for ShadowPassUniform {
    fn from(light_transform: Matrix4<f32>) -> Self {
        Self {
            light_transform: light_transform.into(),
        }
    }
}

/// Depth-only pipeline rendering the scene from the directional light.
pub fn mk_shadow_pipeline(
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Directional Shadow Pipeline Layout"),
        bind_group_layouts: &[uniform_layout, uniform_layout],
        push_constant_ranges: &[],
    });
    let shader = Shader::from_wgsl(
        device,
        "Directional Shadow Shader",
        include_str!("directional_shadow_map.wgsl"),
    )?;

    Ok(mk_render_pipeline(
        device,
        &layout,
        &shader,
        PipelineOptions::depth_only("Directional Shadow Pipeline", false),
        &[ModelVertex::desc()],
    ))
}
