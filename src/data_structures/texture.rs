//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around a WGPU texture with its
//! view and sampler, plus helpers for the screen depth buffer, the plain
//! fallback texture and six-face cube maps.

use std::path::Path;

use anyhow::*;
use image::{GenericImageView, ImageFormat, load_from_memory_with_format};

use crate::resources::texture::load_texture;

/// Channel layout requested when an image is uploaded.
///
/// Both end up as RGBA8 on the GPU; `Rgb` discards whatever alpha the file
/// carries and uploads an opaque image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing the main pass.
    ///
    /// `size` is [width, height] in pixels; zero is clamped to one.
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// 1x1 opaque white texture. Used wherever an image failed to load so the
    /// pipelines never need a "no texture" variant.
    pub fn plain(device: &wgpu::Device, queue: &wgpu::Queue) -> Texture {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            1,
            1,
            image::Rgba([255, 255, 255, 255]),
        ));
        // A 1x1 RGBA upload cannot fail.
        Self::upload(device, queue, &img, Some("plain texture"), PixelFormat::Rgba)
    }

    /// Read an image file and upload it, blocking on the resource loader.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        pixel_format: PixelFormat,
    ) -> Result<Self> {
        futures::executor::block_on(load_texture(path, pixel_format, device, queue))
    }

    /// Load a texture from raw file contents.
    ///
    /// `format` is an optional extension hint (e.g. "png"); unknown or absent
    /// hints fall back to content sniffing.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        format: Option<&str>,
        pixel_format: PixelFormat,
    ) -> Result<Self> {
        let img = match format.and_then(ImageFormat::from_extension) {
            Some(fmt) => load_from_memory_with_format(bytes, fmt)?,
            None => image::load_from_memory(bytes)?,
        };
        Self::from_image(device, queue, &img, Some(label), pixel_format)
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        pixel_format: PixelFormat,
    ) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            bail!("image {:?} has no pixels", label.unwrap_or("<unnamed>"));
        }
        Ok(Self::upload(device, queue, img, label, pixel_format))
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        pixel_format: PixelFormat,
    ) -> Self {
        let (width, height) = img.dimensions();
        let rgba = to_rgba8(img, pixel_format);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        write_layer(queue, &texture, 0, &rgba, width, height);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_default_sampler(device));

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Build a cube map from six equally sized images in face order
    /// +X, -X, +Y, -Y, +Z, -Z.
    pub fn cube_from_images(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        faces: &[image::DynamicImage; 6],
        label: &str,
    ) -> Result<Self> {
        let (width, height) = faces[0].dimensions();
        if width == 0 || height == 0 {
            bail!("cube map {label} has an empty face");
        }
        if let Some(i) = faces.iter().position(|face| face.dimensions() != (width, height)) {
            bail!(
                "cube map {label}: face {i} is {:?}, expected {:?}",
                faces[i].dimensions(),
                (width, height)
            );
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        for (layer, face) in faces.iter().enumerate() {
            let rgba = to_rgba8(face, PixelFormat::Rgb);
            write_layer(queue, &texture, layer as u32, &rgba, width, height);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        }));

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Bind group for the texture layout the lit and skybox pipelines use.
    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        let fallback;
        let sampler = match &self.sampler {
            Some(sampler) => sampler,
            None => {
                fallback = create_default_sampler(device);
                &fallback
            }
        };
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some("texture_bind_group"),
        })
    }
}

fn to_rgba8(img: &image::DynamicImage, pixel_format: PixelFormat) -> image::RgbaImage {
    match pixel_format {
        PixelFormat::Rgba => img.to_rgba8(),
        PixelFormat::Rgb => image::DynamicImage::ImageRgb8(img.to_rgb8()).to_rgba8(),
    }
}

fn write_layer(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    layer: u32,
    rgba: &[u8],
    width: u32,
    height: u32,
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Repeat wrapping, linear filtering.
pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// A texture together with the bind group that exposes it to a pipeline.
#[derive(Debug)]
pub struct BoundTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl BoundTexture {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, texture: Texture) -> Self {
        let bind_group = texture.bind_group(device, layout);
        Self {
            texture,
            bind_group,
        }
    }
}
