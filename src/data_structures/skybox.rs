//! Cube-mapped background drawn behind the scene.

use std::path::Path;

use anyhow::{Context as _, anyhow};
use cgmath::{Matrix4, SquareMatrix, Vector4};
use image::ImageFormat;
use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        mesh::{Mesh, MeshData},
        texture::{BoundTexture, Texture},
    },
    pipelines::{
        Layouts, mk_uniform_bind_group,
        skybox::{CUBE_TEXTURE_GROUP, SKY_GROUP, mk_skybox_pipeline},
    },
    resources::{SKYBOX_DIR, TEXTURES_DIR, texture::load_binary},
};

/// Cube faces in the order +X, -X, +Y, -Y, +Z, -Z.
pub type FaceFiles<'a> = [&'a str; 6];

/// The faces of the final lecture's sky.
pub const CUPERTIN_LAKE: FaceFiles<'static> = [
    "cupertin-lake_rt.tga",
    "cupertin-lake_lf.tga",
    "cupertin-lake_up.tga",
    "cupertin-lake_dn.tga",
    "cupertin-lake_bk.tga",
    "cupertin-lake_ft.tga",
];

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

/// Keeps only the rotation of a view matrix so the sky never moves
/// relative to the camera.
pub fn strip_translation(view: Matrix4<f32>) -> Matrix4<f32> {
    let mut rotation = view;
    rotation.x.w = 0.0;
    rotation.y.w = 0.0;
    rotation.z.w = 0.0;
    rotation.w = Vector4::new(0.0, 0.0, 0.0, 1.0);
    rotation
}

#[derive(Debug)]
pub struct SkyBox {
    mesh: Mesh,
    texture: BoundTexture,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl SkyBox {
    /// Loads six faces from `textures/skybox/` under the asset root.
    pub fn new(ctx: &Context, faces: &FaceFiles<'_>) -> anyhow::Result<Self> {
        let dir = ctx.assets.path(TEXTURES_DIR).join(SKYBOX_DIR);
        let images = faces
            .iter()
            .map(|face| load_face(&dir.join(face)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let images: [image::DynamicImage; 6] = images
            .try_into()
            .map_err(|_| anyhow!("a skybox needs exactly six faces"))?;

        Self::from_images(&ctx.device, &ctx.queue, ctx.config.format, &ctx.layouts, &images)
    }

    pub fn from_images(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        layouts: &Layouts,
        faces: &[image::DynamicImage; 6],
    ) -> anyhow::Result<Self> {
        let texture = Texture::cube_from_images(device, queue, faces, "skybox")?;
        let texture = BoundTexture::new(device, &layouts.cube_texture, texture);
        let mesh = Mesh::new(device, "skybox", &MeshData::sky_cube());

        let uniform = SkyUniform {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skybox Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_uniform_bind_group(device, &layouts.uniform, &buffer, "skybox_bind_group");
        let pipeline = mk_skybox_pipeline(device, color_format, &layouts.cube_texture, &layouts.uniform)?;

        Ok(Self {
            mesh,
            texture,
            buffer,
            bind_group,
            pipeline,
        })
    }

    /// Uploads the camera matrices for this frame. The view's translation is
    /// removed here.
    pub fn prepare(&self, queue: &wgpu::Queue, view: Matrix4<f32>, projection: Matrix4<f32>) {
        let uniform = SkyUniform {
            view: strip_translation(view).into(),
            projection: projection.into(),
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draws the sky. Must come before the scene in the same pass since it
    /// neither tests nor writes depth.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(CUBE_TEXTURE_GROUP, &self.texture.bind_group, &[]);
        render_pass.set_bind_group(SKY_GROUP, &self.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}

fn load_face(path: &Path) -> anyhow::Result<image::DynamicImage> {
    let bytes = futures::executor::block_on(load_binary(path))?;
    let image = match ImageFormat::from_path(path) {
        Ok(format) => image::load_from_memory_with_format(&bytes, format),
        Err(_) => image::load_from_memory(&bytes),
    };
    image.with_context(|| format!("Failed to decode skybox face {}", path.display()))
}
