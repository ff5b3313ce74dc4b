use std::path::Path;

use anyhow::Context as _;

use crate::data_structures::texture::{self, PixelFormat};

/// Texture at binding 0, filtering sampler at binding 1.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    sampled_layout(device, wgpu::TextureViewDimension::D2, "texture_bind_group_layout")
}

/// Same shape as [`texture_layout`] but for cube maps.
pub fn cube_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    sampled_layout(device, wgpu::TextureViewDimension::Cube, "cube_texture_bind_group_layout")
}

fn sampled_layout(
    device: &wgpu::Device,
    view_dimension: wgpu::TextureViewDimension,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some(label),
    })
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to find: {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to find: {}", path.display()))
}

pub async fn load_texture(
    path: &Path,
    pixel_format: PixelFormat,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(path).await?;
    let label = path.to_string_lossy();
    let format = path.extension().and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, &label, format, pixel_format)
}

/// Loads `path`, falling back to the plain white texture when the file is
/// missing or cannot be decoded. The failure is logged.
pub async fn load_texture_or_plain(
    path: &Path,
    pixel_format: PixelFormat,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    match load_texture(path, pixel_format, device, queue).await {
        Ok(texture) => texture,
        Err(e) => {
            log::error!("{e:#}");
            texture::Texture::plain(device, queue)
        }
    }
}
