//! Textured pyramids on a floor, lit by a dim sun, a blue and a green point
//! light and a torch that follows the camera. WASD moves, the mouse looks.

use cgmath::{Matrix4, Vector3};
use flow_lectures::{
    config::LectureConfig,
    context::Context,
    data_structures::{
        light::{DirectionalLight, Light, PointLight, SpotLight},
        material::Material,
        mesh::{Mesh, MeshData},
        texture::{BoundTexture, PixelFormat},
    },
    flow::{Lecture, run},
    render::{RenderTarget, Renderer},
    resources::{TEXTURES_DIR, texture::load_texture_or_plain},
    scene::{Drawable, Lights, Scene, SceneObject},
};
use futures::executor::block_on;
use instant::Duration;

const POINT_LIGHT_PLANES: (f32, f32) = (0.1, 100.0);

struct Lighting {
    scene: Scene,
    renderer: Renderer,
    torch: usize,
}

fn lights(ctx: &Context) -> Lights {
    let shadows = &ctx.shadows;
    let directional = DirectionalLight::new(
        (shadows.directional_size, shadows.directional_size),
        Light::new([1.0, 1.0, 1.0], 0.1, 0.0),
        [0.0, -1.0, 0.5],
    );

    let mut lights = Lights::new(directional);
    lights.points.push(PointLight::new(
        shadows.omnidirectional_size,
        POINT_LIGHT_PLANES,
        Light::new([0.0, 0.0, 1.0], 0.1, 0.1),
        [4.0, 0.0, 0.0],
        (0.1, 0.2, 0.3),
    ));
    lights.points.push(PointLight::new(
        shadows.omnidirectional_size,
        POINT_LIGHT_PLANES,
        Light::new([0.0, 1.0, 0.0], 0.0, 1.0),
        [-4.0, 2.0, 0.0],
        (0.1, 0.1, 0.3),
    ));
    lights.spots.push(SpotLight::new(
        PointLight::new(
            shadows.omnidirectional_size,
            POINT_LIGHT_PLANES,
            Light::new([1.0, 1.0, 1.0], 0.0, 2.0),
            [0.0, 3.0, -5.0],
            (0.0, 0.0, 1.0),
        ),
        [0.0, -1.0, 0.0],
        20.0,
    ));
    lights
}

impl Lighting {
    fn new(ctx: &mut Context) -> anyhow::Result<Self> {
        let lights = lights(ctx);
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

        let mut add = |name: &str, data: MeshData, texture: usize, material: Material, at: [f32; 3]| {
            let object = SceneObject::new(
                &ctx.device,
                &ctx.layouts.uniform,
                Drawable::Mesh(Mesh::new(&ctx.device, name, &data)),
                Some(texture),
                material,
            )
            .with_transform(Matrix4::from_translation(Vector3::from(at)));
            scene.add(object);
        };
        add("pyramid", MeshData::pyramid(), brick, Material::shiny(), [0.0, 0.0, -2.5]);
        add("pyramid", MeshData::pyramid(), dirt, Material::dull(), [0.0, 4.0, -2.5]);
        add("floor", MeshData::floor(10.0, 10.0), dirt, Material::dull(), [0.0, -2.0, 0.0]);

        Ok(Self {
            scene,
            renderer,
            torch: 0,
        })
    }
}

impl Lecture for Lighting {
    fn on_update(&mut self, ctx: &mut Context, _dt: Duration) {
        let camera = &ctx.camera.camera;
        if let Some(torch) = self.scene.lights.spots.get_mut(self.torch) {
            torch.set(camera.position(), camera.front());
        }
    }

    fn on_render(&mut self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        self.renderer.render(RenderTarget::from(ctx), &self.scene, encoder, view);
    }
}

fn main() -> anyhow::Result<()> {
    let config = LectureConfig::from_env().titled("Lighting");
    run(config, Lighting::new)
}
