//! The final lecture: shadowed pyramids, an X-wing and a circling Black Hawk
//! under an orange sun, in front of a lake skybox.

use cgmath::{Deg, Matrix4, Vector3};
use flow_lectures::{
    animation::Spinner,
    config::LectureConfig,
    context::Context,
    data_structures::{
        light::{DirectionalLight, Light},
        material::Material,
        mesh::{Mesh, MeshData},
        skybox::{CUPERTIN_LAKE, SkyBox},
        texture::{BoundTexture, PixelFormat},
    },
    flow::{Lecture, run},
    render::{RenderTarget, Renderer},
    resources::{TEXTURES_DIR, load_model_obj_or_empty, texture::load_texture_or_plain},
    scene::{Drawable, Lights, Scene, SceneObject},
};
use futures::executor::block_on;
use instant::Duration;

struct Skybox {
    scene: Scene,
    renderer: Renderer,
    helicopter: usize,
    orbit: Spinner,
}

fn helicopter_transform(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(-angle))
        * Matrix4::from_translation(Vector3::new(-8.0, 2.0, 0.0))
        * Matrix4::from_angle_z(Deg(-20.0))
        * Matrix4::from_angle_x(Deg(-90.0))
        * Matrix4::from_scale(0.4)
}

impl Skybox {
    fn new(ctx: &mut Context) -> anyhow::Result<Self> {
        let size = ctx.shadows.directional_size;
        let lights = Lights::new(DirectionalLight::new(
            (size, size),
            Light::new([1.0, 0.5, 0.3], 0.1, 0.6),
            [-8.0, -10.0, 14.0],
        ));
        let renderer = Renderer::new(RenderTarget::from(&*ctx), &lights)?;
        let mut scene = Scene::new(&ctx.device, &ctx.queue, &ctx.layouts.texture, lights);

        let textures_dir = ctx.assets.path(TEXTURES_DIR);
        let mut load = |file: &str| {
            let texture = block_on(load_texture_or_plain(
                &textures_dir.join(file),
                PixelFormat::Rgba,
                &ctx.device,
                &ctx.queue,
            ));
            scene.add_texture(BoundTexture::new(&ctx.device, &ctx.layouts.texture, texture))
        };
        let brick = load("brick.png");
        let dirt = load("dirt.png");

        let mut add = |drawable: Drawable, texture: Option<usize>, material: Material, transform: Matrix4<f32>| {
            let object = SceneObject::new(&ctx.device, &ctx.layouts.uniform, drawable, texture, material)
                .with_transform(transform);
            scene.add(object)
        };
        let mesh = |name: &str, data: MeshData| Drawable::Mesh(Mesh::new(&ctx.device, name, &data));
        let model = |file: &str| {
            Drawable::Model(block_on(load_model_obj_or_empty(
                file,
                &ctx.assets,
                &ctx.device,
                &ctx.queue,
                &ctx.layouts.texture,
            )))
        };

        add(
            mesh("pyramid", MeshData::pyramid()),
            Some(brick),
            Material::shiny(),
            Matrix4::from_translation(Vector3::new(0.0, 2.0, -2.5)),
        );
        add(
            mesh("pyramid", MeshData::pyramid()),
            Some(dirt),
            Material::dull(),
            Matrix4::from_translation(Vector3::new(0.0, 4.0, -2.5)),
        );
        add(
            mesh("floor", MeshData::floor(10.0, 10.0)),
            Some(dirt),
            Material::dull(),
            Matrix4::from_translation(Vector3::new(0.0, -2.0, 0.0)),
        );
        add(
            model("x-wing.obj"),
            None,
            Material::shiny(),
            Matrix4::from_translation(Vector3::new(-20.0, 0.0, 15.0)) * Matrix4::from_scale(0.01),
        );
        let orbit = Spinner::restarting_at(0.1, 0.1);
        let helicopter = add(
            model("uh60.obj"),
            None,
            Material::shiny(),
            helicopter_transform(orbit.angle()),
        );

        scene.skybox = match SkyBox::new(ctx, &CUPERTIN_LAKE) {
            Ok(skybox) => Some(skybox),
            Err(e) => {
                log::error!("Drawing without a skybox: {e:#}");
                None
            }
        };

        Ok(Self {
            scene,
            renderer,
            helicopter,
            orbit,
        })
    }
}

impl Lecture for Skybox {
    fn on_update(&mut self, _ctx: &mut Context, _dt: Duration) {
        let angle = self.orbit.advance();
        if let Some(object) = self.scene.objects.get_mut(self.helicopter) {
            object.transform = helicopter_transform(angle);
        }
    }

    fn on_render(&mut self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        self.renderer.render(RenderTarget::from(ctx), &self.scene, encoder, view);
    }
}

fn main() -> anyhow::Result<()> {
    let config = LectureConfig::from_env().titled("Skybox");
    run(config, Skybox::new)
}
