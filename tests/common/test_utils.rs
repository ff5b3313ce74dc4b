use cgmath::{Matrix4, Vector3, Vector4};

pub const EPSILON: f32 = 1e-4;

pub fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= EPSILON
}

#[track_caller]
pub fn assert_approx(actual: f32, expected: f32) {
    assert!(approx(actual, expected), "expected {expected}, got {actual}");
}

#[track_caller]
pub fn assert_vec3_approx(actual: Vector3<f32>, expected: Vector3<f32>) {
    for i in 0..3 {
        assert!(
            approx(actual[i], expected[i]),
            "expected {expected:?}, got {actual:?}"
        );
    }
}

#[track_caller]
pub fn assert_mat4_approx(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    for c in 0..4 {
        for r in 0..4 {
            assert!(
                approx(actual[c][r], expected[c][r]),
                "mismatch at column {c} row {r}: expected {expected:?}, got {actual:?}"
            );
        }
    }
}

/// Projects `point` with `transform` and divides by w.
pub fn to_ndc(transform: Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let clip = transform * Vector4::new(point.x, point.y, point.z, 1.0);
    clip.truncate() / clip.w
}

/// Opens a device without a window for the GPU tests.
#[cfg(feature = "integration-tests")]
pub fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let (_, device, queue) =
        futures::executor::block_on(flow_lectures::context::request_device(&instance, None))
            .expect("no graphics adapter for the integration tests");
    (device, queue)
}

/// A colour texture to render into instead of a window surface, with a depth
/// buffer of the same size.
#[cfg(feature = "integration-tests")]
pub struct Offscreen {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub depth: flow_lectures::data_structures::texture::Texture,
}

#[cfg(feature = "integration-tests")]
impl Offscreen {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = flow_lectures::data_structures::texture::Texture::create_depth_texture(
            device,
            [width, height],
            "offscreen_depth",
        );
        Self {
            texture,
            view,
            depth,
        }
    }

    /// Copies the colour texture back into an image, blocking until the GPU
    /// is done with everything submitted so far.
    pub fn read(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> image::RgbaImage {
        let (width, height) = (self.texture.width(), self.texture.height());
        let unpadded_row = 4 * width;
        let padded_row = unpadded_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen_readback"),
            size: (padded_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            self.texture.size(),
        );
        queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures::channel::oneshot::channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(std::time::Duration::from_secs(5)),
            })
            .expect("the GPU did not finish in time");
        futures::executor::block_on(rx)
            .expect("map callback dropped")
            .expect("readback buffer could not be mapped");

        let pixels = {
            let data = buffer_slice.get_mapped_range();
            data.chunks(padded_row as usize)
                .flat_map(|row| &row[..unpadded_row as usize])
                .copied()
                .collect::<Vec<u8>>()
        };
        output_buffer.unmap();
        image::RgbaImage::from_raw(width, height, pixels).expect("readback matches the texture size")
    }
}
