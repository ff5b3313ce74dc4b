//! Frame composition.
//!
//! [`render_frame`] acquires the surface texture, lets a recorder fill one
//! command encoder and presents the result. [`Renderer`] is the recorder of
//! the lit lectures: it owns the lit and shadow pipelines together with every
//! shadow map and records, per frame and into any [`RenderTarget`],
//!
//! 1. the directional shadow pass,
//! 2. six cube face passes per point light and per spot light,
//! 3. the main pass: clear to black, skybox, scene.

use std::iter;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::{
    camera::CameraResources,
    context::Context,
    data_structures::{
        light::{LightsUniform, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS, PointLight},
        shadow_map::{OmniShadowMap, ShadowMap},
    },
    pipelines::{
        FIRST_OMNI_BINDING, Layouts, OMNI_SHADOW_SLOTS,
        basic::{self, mk_basic_pipeline},
        mk_uniform_bind_group,
        omni_shadow::{self, OmniFaceUniform, mk_omni_shadow_pipeline},
        shadow::{self, ShadowPassUniform, mk_shadow_pipeline},
    },
    scene::{Lights, Scene},
};

/// Acquires the next surface texture, records into a fresh encoder through
/// `record` and presents. Does nothing while the surface is unconfigured.
pub fn render_frame(
    ctx: &Context,
    record: impl FnOnce(&Context, &mut wgpu::CommandEncoder, &wgpu::TextureView),
) -> Result<(), wgpu::SurfaceError> {
    // keep the loop going
    ctx.window.request_redraw();

    if !ctx.is_surface_configured() {
        return Ok(());
    }

    let output = ctx.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    record(ctx, &mut encoder, &view);

    ctx.queue.submit(iter::once(encoder.finish()));
    output.present();
    Ok(())
}

/// The device side of a frame: where the renderer draws and with what.
///
/// Borrowed from a [`Context`] for the window, or assembled from a headless
/// device and an offscreen texture.
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub layouts: &'a Layouts,
    pub camera: &'a CameraResources,
    pub color_format: wgpu::TextureFormat,
    pub depth_view: &'a wgpu::TextureView,
}

impl<'a> From<&'a Context> for RenderTarget<'a> {
    fn from(ctx: &'a Context) -> Self {
        Self {
            device: &ctx.device,
            queue: &ctx.queue,
            layouts: &ctx.layouts,
            camera: &ctx.camera,
            color_format: ctx.config.format,
            depth_view: &ctx.depth_texture.view,
        }
    }
}

/// Starts a pass that clears `view` to `clear` and the depth buffer to 1.
pub fn begin_main_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        ..Default::default()
    })
}

fn begin_depth_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    depth_view: &wgpu::TextureView,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        ..Default::default()
    })
}

/// A uniform buffer with its bind group.
#[derive(Debug)]
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new<T: bytemuck::Pod>(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, data: T, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[data]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_uniform_bind_group(device, layout, &buffer, label);
        Self { buffer, bind_group }
    }

    fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, data: T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[data]));
    }
}

/// Every shadow map the lit pipeline reads. Cube slots without a light hold
/// a 1x1 placeholder since the bind group needs a texture in every slot.
#[derive(Debug)]
pub struct ShadowMaps {
    pub directional: ShadowMap,
    /// Point light maps first, then spot light maps.
    pub omni: Vec<OmniShadowMap>,
}

impl ShadowMaps {
    pub fn new(device: &wgpu::Device, lights: &Lights) -> Self {
        let (width, height) = lights.directional.shadow_size;
        let omni = omni_slot_sizes(lights)
            .iter()
            .map(|&size| OmniShadowMap::new(device, size))
            .collect();
        Self {
            directional: ShadowMap::new(device, width, height),
            omni,
        }
    }

    /// Recreates the maps whose light changed its shadow size. Returns
    /// whether anything was recreated.
    pub fn sync(&mut self, device: &wgpu::Device, lights: &Lights) -> bool {
        let mut changed = false;

        let (width, height) = lights.directional.shadow_size;
        if (self.directional.width(), self.directional.height()) != (width.max(1), height.max(1)) {
            log::info!("Recreating the directional shadow map at {width}x{height}");
            self.directional = ShadowMap::new(device, width, height);
            changed = true;
        }

        for (map, size) in self.omni.iter_mut().zip(omni_slot_sizes(lights)) {
            if map.width() != size.max(1) {
                *map = OmniShadowMap::new(device, size);
                changed = true;
            }
        }
        changed
    }
}

/// The lights that get a cube shadow map, in slot order.
fn omni_lights(lights: &Lights) -> impl Iterator<Item = (usize, &PointLight)> {
    let points = lights.points.iter().take(MAX_POINT_LIGHTS).enumerate();
    let spots = lights
        .spots
        .iter()
        .take(MAX_SPOT_LIGHTS)
        .map(|spot| &spot.point)
        .enumerate()
        .map(|(i, light)| (MAX_POINT_LIGHTS + i, light));
    points.chain(spots)
}

fn omni_slot_sizes(lights: &Lights) -> [u32; OMNI_SHADOW_SLOTS] {
    let mut sizes = [1; OMNI_SHADOW_SLOTS];
    for (slot, light) in omni_lights(lights) {
        sizes[slot] = light.shadow_size;
    }
    sizes
}

fn mk_lights_bind_group(
    device: &wgpu::Device,
    layouts: &Layouts,
    buffer: &wgpu::Buffer,
    maps: &ShadowMaps,
) -> wgpu::BindGroup {
    let mut entries = vec![
        wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        },
        wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::TextureView(&maps.directional.read_view),
        },
        wgpu::BindGroupEntry {
            binding: 2,
            resource: wgpu::BindingResource::Sampler(&maps.directional.sampler),
        },
    ];
    entries.extend(maps.omni.iter().enumerate().map(|(slot, map)| wgpu::BindGroupEntry {
        binding: FIRST_OMNI_BINDING + slot as u32,
        resource: wgpu::BindingResource::TextureView(&map.read_view),
    }));

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &layouts.lights,
        entries: &entries,
        label: Some("lights_bind_group"),
    })
}

/// Records shadow passes and the lit main pass of a [`Scene`].
#[derive(Debug)]
pub struct Renderer {
    lit_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    omni_pipeline: wgpu::RenderPipeline,
    shadow_maps: ShadowMaps,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    directional_pass: UniformSlot,
    /// One uniform per cube face of every omnidirectional slot.
    omni_faces: Vec<Vec<UniformSlot>>,
    pub clear_colour: wgpu::Color,
}

impl Renderer {
    pub fn new(target: RenderTarget<'_>, lights: &Lights) -> anyhow::Result<Self> {
        let device = target.device;
        let layouts = target.layouts;

        let lit_pipeline = mk_basic_pipeline(
            device,
            target.color_format,
            layouts,
            &target.camera.bind_group_layout,
        )?;
        let shadow_pipeline = mk_shadow_pipeline(device, &layouts.uniform)?;
        let omni_pipeline = mk_omni_shadow_pipeline(device, &layouts.uniform)?;

        let shadow_maps = ShadowMaps::new(device, lights);
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::pack(
                &lights.directional,
                &lights.points,
                &lights.spots,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_bind_group = mk_lights_bind_group(device, layouts, &lights_buffer, &shadow_maps);

        let directional_pass = UniformSlot::new(
            device,
            &layouts.uniform,
            ShadowPassUniform::from(lights.directional.light_transform()),
            "directional_shadow_pass",
        );
        let omni_faces = (0..OMNI_SHADOW_SLOTS)
            .map(|_| {
                (0..OmniShadowMap::NUM_FACES)
                    .map(|_| {
                        UniformSlot::new(
                            device,
                            &layouts.uniform,
                            OmniFaceUniform::zeroed(),
                            "omni_shadow_face",
                        )
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            lit_pipeline,
            shadow_pipeline,
            omni_pipeline,
            shadow_maps,
            lights_buffer,
            lights_bind_group,
            directional_pass,
            omni_faces,
            clear_colour: wgpu::Color::BLACK,
        })
    }

    pub fn shadow_maps(&self) -> &ShadowMaps {
        &self.shadow_maps
    }

    /// Uploads this frame's uniforms: lights, shadow pass transforms, object
    /// transforms and the skybox camera.
    fn prepare(&mut self, target: RenderTarget<'_>, scene: &Scene) {
        if self.shadow_maps.sync(target.device, &scene.lights) {
            self.lights_bind_group = mk_lights_bind_group(
                target.device,
                target.layouts,
                &self.lights_buffer,
                &self.shadow_maps,
            );
        }

        let queue = target.queue;
        let lights = &scene.lights;
        let uniform = LightsUniform::pack(&lights.directional, &lights.points, &lights.spots);
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[uniform]));

        self.directional_pass.write(
            queue,
            ShadowPassUniform::from(lights.directional.light_transform()),
        );
        for (slot, light) in omni_lights(lights) {
            for (face, transform) in self.omni_faces[slot].iter().zip(light.light_transforms()) {
                face.write(
                    queue,
                    OmniFaceUniform::new(transform, light.position, light.far_plane),
                );
            }
        }

        scene.write_buffers(queue);
        if let Some(skybox) = &scene.skybox {
            skybox.prepare(
                queue,
                target.camera.camera.view_matrix(),
                target.camera.projection.calc_matrix(),
            );
        }
    }

    /// Records every pass of one frame into `encoder`, drawing to `view`.
    /// `view` must have the target's colour format and the target's depth
    /// buffer's size.
    pub fn render(
        &mut self,
        target: RenderTarget<'_>,
        scene: &Scene,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        self.prepare(target, scene);

        {
            let mut pass = begin_depth_pass(
                encoder,
                &self.shadow_maps.directional.write_view,
                "Directional Shadow Pass",
            );
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(shadow::PASS_GROUP, &self.directional_pass.bind_group, &[]);
            scene.render_scene(&mut pass, shadow::OBJECT_GROUP, None);
        }

        for (slot, _) in omni_lights(&scene.lights) {
            let map = &self.shadow_maps.omni[slot];
            for (face_view, face) in map.face_views.iter().zip(&self.omni_faces[slot]) {
                let mut pass = begin_depth_pass(encoder, face_view, "Omnidirectional Shadow Pass");
                pass.set_pipeline(&self.omni_pipeline);
                pass.set_bind_group(omni_shadow::FACE_GROUP, &face.bind_group, &[]);
                scene.render_scene(&mut pass, omni_shadow::OBJECT_GROUP, None);
            }
        }

        let mut pass = begin_main_pass(encoder, view, target.depth_view, self.clear_colour);
        if let Some(skybox) = &scene.skybox {
            skybox.render(&mut pass);
        }
        pass.set_pipeline(&self.lit_pipeline);
        pass.set_bind_group(basic::CAMERA_GROUP, &target.camera.bind_group, &[]);
        pass.set_bind_group(basic::LIGHTS_GROUP, &self.lights_bind_group, &[]);
        scene.render_scene(&mut pass, basic::OBJECT_GROUP, Some(basic::TEXTURE_GROUP));
    }
}
