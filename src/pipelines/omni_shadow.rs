use cgmath::{Matrix4, Vector3};

use crate::{
    data_structures::mesh::{ModelVertex, Vertex},
    pipelines::{PipelineOptions, mk_render_pipeline},
    shader::Shader,
};

pub const FACE_GROUP: u32 = 0;
pub const OBJECT_GROUP: u32 = 1;

/// Per cube face data of an omnidirectional shadow pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OmniFaceUniform {
    pub light_transform: [[f32; 4]; 4],
    pub light_position: [f32; 3],
    pub far_plane: f32,
}

impl OmniFaceUniform {
    pub fn new(light_transform: Matrix4<f32>, light_position: Vector3<f32>, far_plane: f32) -> Self {
        Self {
            light_transform: light_transform.into(),
            light_position: light_position.into(),
            far_plane,
        }
    }
}

/// Depth pipeline for one cube face; the fragment stage writes the
/// normalized distance to the light as depth.
pub fn mk_omni_shadow_pipeline(
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Omnidirectional Shadow Pipeline Layout"),
        bind_group_layouts: &[uniform_layout, uniform_layout],
        push_constant_ranges: &[],
    });
    let shader = Shader::from_wgsl(
        device,
        "Omnidirectional Shadow Shader",
        include_str!("omni_shadow_map.wgsl"),
    )?;

    Ok(mk_render_pipeline(
        device,
        &layout,
        &shader,
        PipelineOptions::depth_only("Omnidirectional Shadow Pipeline", true),
        &[ModelVertex::desc()],
    ))
}
