//! A pyramid spinning around the y axis in front of a perspective camera.

use cgmath::{Deg, Matrix4, Vector3};
use flow_lectures::{
    animation::Spinner,
    camera::OPENGL_TO_WGPU_MATRIX,
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

const FOVY: Deg<f32> = Deg(45.0);
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

struct Transforms {
    spinner: Spinner,
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

/// Projection times model; this lecture has no view matrix yet.
fn mvp(aspect: f32, angle: f32) -> Matrix4<f32> {
    let projection = OPENGL_TO_WGPU_MATRIX * cgmath::perspective(FOVY, aspect, NEAR, FAR);
    let model = Matrix4::from_translation(Vector3::new(0.0, 0.0, -2.5))
        * Matrix4::from_angle_y(Deg(angle))
        * Matrix4::from_nonuniform_scale(0.4, 0.4, 1.0);
    projection * model
}

impl Transforms {
    fn new(ctx: &mut Context) -> anyhow::Result<Self> {
        let pipeline = mk_flat_pipeline(&ctx.device, ctx.config.format, &ctx.layouts.uniform)?;
        let mesh = Mesh::new(&ctx.device, "pyramid", &MeshData::pyramid());

        let spinner = Spinner::new(0.5);
        let uniform_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Pyramid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[FlatUniform::from(mvp(ctx.aspect_ratio(), spinner.angle()))]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group =
            mk_uniform_bind_group(&ctx.device, &ctx.layouts.uniform, &uniform_buffer, "pyramid_bind_group");

        Ok(Self {
            spinner,
            pipeline,
            mesh,
            uniform_buffer,
            uniform_bind_group,
        })
    }
}

impl Lecture for Transforms {
    fn on_update(&mut self, ctx: &mut Context, _dt: Duration) {
        let angle = self.spinner.advance();
        let uniform = FlatUniform::from(mvp(ctx.aspect_ratio(), angle));
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
    let config = LectureConfig::from_env().titled("Transforms");
    run(config, Transforms::new)
}
