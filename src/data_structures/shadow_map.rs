//! Depth maps rendered from a light's point of view.
//!
//! [`ShadowMap`] is a single 2D depth texture for directional lights;
//! [`OmniShadowMap`] is a depth cube map for point and spot lights. Both are
//! written as render-pass depth attachments and read back in the main pass
//! through the comparison sampler the [`ShadowMap`] owns.

use crate::data_structures::texture::Texture;

/// Depth comparison sampler. Lookups outside the map clamp to the edge; the
/// lit shader treats coordinates beyond the far plane as unshadowed.
fn comparison_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        compare: Some(wgpu::CompareFunction::LessEqual),
        ..Default::default()
    })
}

#[derive(Debug)]
pub struct ShadowMap {
    width: u32,
    height: u32,
    #[allow(unused)]
    texture: wgpu::Texture,
    /// Depth attachment for the shadow pass.
    pub write_view: wgpu::TextureView,
    /// Sampled view for the main pass.
    pub read_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ShadowMap {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("directional shadow map"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let write_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let read_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = comparison_sampler(device, "directional shadow sampler");

        Self {
            width,
            height,
            texture,
            write_view,
            read_view,
            sampler,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct OmniShadowMap {
    width: u32,
    height: u32,
    #[allow(unused)]
    texture: wgpu::Texture,
    /// One depth attachment per cube face, in +X, -X, +Y, -Y, +Z, -Z order.
    pub face_views: Vec<wgpu::TextureView>,
    pub read_view: wgpu::TextureView,
}

impl OmniShadowMap {
    pub const NUM_FACES: usize = 6;

    /// Cube faces must be square, so there is a single edge length.
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let (width, height) = (size.max(1), size.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("omnidirectional shadow map"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: Self::NUM_FACES as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let face_views = (0..Self::NUM_FACES as u32)
            .map(|face| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("omnidirectional shadow face"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_array_layer: face,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();
        let read_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("omnidirectional shadow cube"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        Self {
            width,
            height,
            texture,
            face_views,
            read_view,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
