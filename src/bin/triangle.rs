//! The first lectures: one coloured triangle sliding left and right, or
//! with `--scale`, shrinking and growing in place.

use cgmath::{Matrix4, Vector3};
use flow_lectures::{
    animation::Oscillator,
    config::LectureConfig,
    context::Context,
    data_structures::mesh::{Mesh, MeshData},
    flow::{Lecture, run},
    pipelines::{
        flat::{FlatUniform, mk_flat_pipeline},
        mk_uniform_bind_group,
    },
    render::begin_main_pass,
};
use instant::Duration;
use wgpu::util::DeviceExt;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Translate,
    Scale,
}

impl Motion {
    fn oscillator(self) -> Oscillator {
        match self {
            Motion::Translate => Oscillator::translation(0.7, 0.005),
            Motion::Scale => Oscillator::scale(0.1, 1.0, 0.001),
        }
    }

    fn transform(self, value: f32) -> Matrix4<f32> {
        match self {
            Motion::Translate => Matrix4::from_translation(Vector3::new(value, 0.0, 0.0)),
            Motion::Scale => Matrix4::from_nonuniform_scale(value, value, 0.0),
        }
    }
}

struct Triangle {
    motion: Motion,
    oscillator: Oscillator,
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl Triangle {
    fn new(ctx: &mut Context, motion: Motion) -> anyhow::Result<Self> {
        let pipeline = mk_flat_pipeline(&ctx.device, ctx.config.format, &ctx.layouts.uniform)?;
        let mesh = Mesh::new(&ctx.device, "triangle", &MeshData::triangle());

        let oscillator = motion.oscillator();
        let uniform_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Triangle Uniform Buffer"),
            contents: bytemuck::cast_slice(&[FlatUniform::from(motion.transform(oscillator.value()))]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group =
            mk_uniform_bind_group(&ctx.device, &ctx.layouts.uniform, &uniform_buffer, "triangle_bind_group");

        Ok(Self {
            motion,
            oscillator,
            pipeline,
            mesh,
            uniform_buffer,
            uniform_bind_group,
        })
    }
}

impl Lecture for Triangle {
    fn on_update(&mut self, ctx: &mut Context, _dt: Duration) {
        let value = self.oscillator.advance();
        let uniform = FlatUniform::from(self.motion.transform(value));
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn on_render(&mut self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = begin_main_pass(encoder, view, &ctx.depth_texture.view, wgpu::Color::BLACK);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        self.mesh.draw(&mut pass);
    }
}

fn main() -> anyhow::Result<()> {
    let motion = if std::env::args().skip(1).any(|arg| arg == "--scale") {
        Motion::Scale
    } else {
        Motion::Translate
    };
    let config = LectureConfig::from_env().titled("Triangle");
    run(config, move |ctx| Triangle::new(ctx, motion))
}
