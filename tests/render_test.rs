#![cfg(feature = "integration-tests")]

mod common;

use cgmath::{Deg, Matrix4, Vector3};
use common::test_utils::{Offscreen, headless_device, to_ndc};
use flow_lectures::{
    camera::{Camera, CameraResources, Projection},
    data_structures::{
        light::{DirectionalLight, Light, PointLight, SpotLight},
        material::Material,
        mesh::{Mesh, MeshData},
        skybox::SkyBox,
    },
    pipelines::Layouts,
    render::{RenderTarget, Renderer},
    scene::{Drawable, Lights, Scene, SceneObject},
};

const SIZE: u32 = 64;
const OCCLUDER_HEIGHT: f32 = 4.0;
/// No specular highlight, so equally lit floor reads back equally bright.
const MATTE: Material = Material::new(0.0, 1.0);
/// Light travelling down and towards +x at 45 degrees, so the occluder's
/// shadow lands `OCCLUDER_HEIGHT` to the right of it.
const SUN_DIRECTION: [f32; 3] = [5.0, -5.0, 0.0];

struct Fixture {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layouts: Layouts,
    camera: CameraResources,
    offscreen: Offscreen,
}

impl Fixture {
    fn new() -> Self {
        let (device, queue) = headless_device();
        let layouts = Layouts::new(&device);
        // Looking straight down at the floor from above the occluder.
        let camera = CameraResources::new(
            &device,
            Camera::new([0.0, 10.0, 0.0], [0.0, 1.0, 0.0], -89.0, -90.0, 5.0, 0.5),
            Projection::new(SIZE, SIZE, Deg(60.0), 0.1, 100.0),
        );
        let offscreen = Offscreen::new(&device, SIZE, SIZE);
        Self {
            device,
            queue,
            layouts,
            camera,
            offscreen,
        }
    }

    fn target(&self) -> RenderTarget<'_> {
        RenderTarget {
            device: &self.device,
            queue: &self.queue,
            layouts: &self.layouts,
            camera: &self.camera,
            color_format: Offscreen::FORMAT,
            depth_view: &self.offscreen.depth.view,
        }
    }

    fn draw(&self, renderer: &mut Renderer, scene: &Scene) -> image::RgbaImage {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Test Encoder"),
            });
        renderer.render(self.target(), scene, &mut encoder, &self.offscreen.view);
        self.queue.submit(std::iter::once(encoder.finish()));
        self.offscreen.read(&self.device, &self.queue)
    }

    /// The pixel a point on the floor lands on.
    fn pixel_of(&self, point: Vector3<f32>) -> (u32, u32) {
        let view_projection = self.camera.projection.calc_matrix() * self.camera.camera.view_matrix();
        let ndc = to_ndc(view_projection, point);
        let x = (ndc.x + 1.0) * 0.5 * SIZE as f32;
        let y = (1.0 - ndc.y) * 0.5 * SIZE as f32;
        ((x as u32).min(SIZE - 1), (y as u32).min(SIZE - 1))
    }

    fn brightness(&self, image: &image::RgbaImage, point: Vector3<f32>) -> u32 {
        let (x, y) = self.pixel_of(point);
        let pixel = image.get_pixel(x, y);
        pixel.0[..3].iter().map(|&c| c as u32).sum()
    }
}

/// A sun casting the shadow, plus a black point and spot light so the cube
/// shadow passes run without changing any colour.
fn lights() -> Lights {
    let mut lights = Lights::new(DirectionalLight::new(
        (512, 512),
        Light::new([1.0, 1.0, 1.0], 0.1, 0.8),
        SUN_DIRECTION,
    ));
    let dark = || {
        PointLight::new(
            16,
            (0.1, 100.0),
            Light::new([0.0, 0.0, 0.0], 0.0, 0.0),
            [0.0, 8.0, 0.0],
            (0.0, 0.0, 1.0),
        )
    };
    lights.points.push(dark());
    lights.spots.push(SpotLight::new(dark(), [0.0, -1.0, 0.0], 20.0));
    lights
}

/// A floor at y = 0 and a 2x2 plate floating above its centre. Returns the
/// scene and the plate's object index.
fn floor_scene(fixture: &Fixture, plate_height: f32) -> (Scene, usize) {
    let device = &fixture.device;
    let mut scene = Scene::new(device, &fixture.queue, &fixture.layouts.texture, lights());
    let mut add = |name: &str, data: MeshData, transform: Matrix4<f32>| {
        let object = SceneObject::new(
            device,
            &fixture.layouts.uniform,
            Drawable::Mesh(Mesh::new(device, name, &data)),
            None,
            MATTE,
        )
        .with_transform(transform);
        scene.add(object)
    };
    add("floor", MeshData::floor(10.0, 1.0), Matrix4::from_scale(1.0));
    let plate = add(
        "plate",
        MeshData::floor(1.0, 1.0),
        Matrix4::from_translation(Vector3::new(0.0, plate_height, 0.0)),
    );

    // White sky: were it drawn over the scene, lit and shadowed floor would
    // come out the same.
    let face = || image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, image::Rgb([255; 3])));
    let faces = [face(), face(), face(), face(), face(), face()];
    scene.skybox = Some(
        SkyBox::from_images(device, &fixture.queue, Offscreen::FORMAT, &fixture.layouts, &faces)
            .expect("skybox from equal faces"),
    );
    (scene, plate)
}

fn shadowed_point() -> Vector3<f32> {
    Vector3::new(OCCLUDER_HEIGHT, 0.0, 0.0)
}

fn lit_point() -> Vector3<f32> {
    Vector3::new(-OCCLUDER_HEIGHT, 0.0, 0.0)
}

#[test]
fn should_darken_the_floor_behind_an_occluder() {
    let fixture = Fixture::new();
    let (scene, _) = floor_scene(&fixture, OCCLUDER_HEIGHT);
    let mut renderer = Renderer::new(fixture.target(), &scene.lights).expect("renderer");

    let image = fixture.draw(&mut renderer, &scene);

    let shadowed = fixture.brightness(&image, shadowed_point());
    let lit = fixture.brightness(&image, lit_point());
    assert!(
        shadowed < lit,
        "shadowed pixel ({shadowed}) should be darker than the lit one ({lit})"
    );
    // Ambient still reaches the shadow.
    assert!(shadowed > 0);
}

#[test]
fn should_light_both_sides_without_an_occluder_above() {
    let fixture = Fixture::new();
    // Below the floor the plate is hidden and casts nothing onto it.
    let (scene, _) = floor_scene(&fixture, -50.0);
    let mut renderer = Renderer::new(fixture.target(), &scene.lights).expect("renderer");

    let image = fixture.draw(&mut renderer, &scene);

    let right = fixture.brightness(&image, shadowed_point());
    let left = fixture.brightness(&image, lit_point());
    assert!(right.abs_diff(left) <= 24, "expected even lighting, got {right} and {left}");
}

#[test]
fn should_sample_the_recreated_shadow_map_after_a_resize() {
    let fixture = Fixture::new();
    let (mut scene, plate) = floor_scene(&fixture, -50.0);
    let mut renderer = Renderer::new(fixture.target(), &scene.lights).expect("renderer");
    fixture.draw(&mut renderer, &scene);

    scene.lights.directional.shadow_size = (1024, 1024);
    scene.objects[plate].transform = Matrix4::from_translation(Vector3::new(0.0, OCCLUDER_HEIGHT, 0.0));
    let image = fixture.draw(&mut renderer, &scene);

    assert_eq!(renderer.shadow_maps().directional.width(), 1024);
    // A stale bind group would still point at the first, unshadowed map.
    let shadowed = fixture.brightness(&image, shadowed_point());
    let lit = fixture.brightness(&image, lit_point());
    assert!(
        shadowed < lit,
        "shadowed pixel ({shadowed}) should be darker than the lit one ({lit})"
    );
}
