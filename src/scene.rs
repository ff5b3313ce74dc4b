//! Objects to draw and the lights that shine on them.
//!
//! A [`Scene`] is drawn several times per frame: once per shadow map and
//! once for the screen. [`Scene::render_scene`] issues the same draw calls
//! every time; only the pipeline and the bind groups set beforehand differ.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        light::{DirectionalLight, PointLight, SpotLight},
        material::Material,
        mesh::Mesh,
        model::Model,
        skybox::SkyBox,
        texture::{BoundTexture, Texture},
    },
    pipelines::mk_uniform_bind_group,
};

/// Per-object uniform: transforms and material.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub specular_intensity: f32,
    pub shininess: f32,
    // Uniforms require 16 byte (4 float) spacing
    _padding: [f32; 2],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, material: Material) -> Self {
        Self {
            model: model.into(),
            normal_matrix: normal_matrix(model).into(),
            specular_intensity: material.specular_intensity,
            shininess: material.shininess,
            _padding: [0.0; 2],
        }
    }
}

/// Inverse transpose of `model`, so normals stay perpendicular under
/// non-uniform scaling. A singular matrix (e.g. a zero scale) falls back to
/// `model` itself.
pub fn normal_matrix(model: Matrix4<f32>) -> Matrix4<f32> {
    model.invert().map_or(model, |inverse| inverse.transpose())
}

#[derive(Debug)]
pub enum Drawable {
    Mesh(Mesh),
    Model(Model),
}

#[derive(Debug)]
pub struct SceneObject {
    pub drawable: Drawable,
    pub transform: Matrix4<f32>,
    /// Index into [`Scene::textures`]. Meshes are drawn with it; models use
    /// it for meshes whose own material texture is missing.
    pub texture: Option<usize>,
    pub material: Material,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    pub fn new(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        drawable: Drawable,
        texture: Option<usize>,
        material: Material,
    ) -> Self {
        let transform = Matrix4::identity();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Buffer"),
            contents: bytemuck::cast_slice(&[ObjectUniform::new(transform, material)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_uniform_bind_group(device, uniform_layout, &buffer, "object_bind_group");

        Self {
            drawable,
            transform,
            texture,
            material,
            buffer,
            bind_group,
        }
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform::new(self.transform, self.material)
    }

    pub fn write_to_buffer(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform()]));
    }
}

/// The lights of a lit scene. Only the first lights up to the shader's
/// limits are used.
#[derive(Debug, Clone)]
pub struct Lights {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
    pub spots: Vec<SpotLight>,
}

impl Lights {
    pub fn new(directional: DirectionalLight) -> Self {
        Self {
            directional,
            points: Vec::new(),
            spots: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    pub textures: Vec<BoundTexture>,
    pub objects: Vec<SceneObject>,
    pub lights: Lights,
    pub skybox: Option<SkyBox>,
    /// Bound for objects without a usable texture.
    plain: BoundTexture,
}

impl Scene {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_layout: &wgpu::BindGroupLayout,
        lights: Lights,
    ) -> Self {
        let plain = BoundTexture::new(device, texture_layout, Texture::plain(device, queue));
        Self {
            textures: Vec::new(),
            objects: Vec::new(),
            lights,
            skybox: None,
            plain,
        }
    }

    /// Adds a texture and returns its index for [`SceneObject::texture`].
    pub fn add_texture(&mut self, texture: BoundTexture) -> usize {
        self.textures.push(texture);
        self.textures.len() - 1
    }

    /// Adds an object and returns its index into [`Scene::objects`].
    pub fn add(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn write_buffers(&self, queue: &wgpu::Queue) {
        for object in &self.objects {
            object.write_to_buffer(queue);
        }
    }

    /// Draws every object with the pipeline already set on `render_pass`.
    ///
    /// `object_group` is where the pipeline expects the object uniform;
    /// `texture_group` is where it expects textures, or `None` for
    /// depth-only pipelines.
    pub fn render_scene(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        object_group: u32,
        texture_group: Option<u32>,
    ) {
        for object in &self.objects {
            render_pass.set_bind_group(object_group, &object.bind_group, &[]);
            if let Some(group) = texture_group {
                let texture = object
                    .texture
                    .and_then(|i| self.textures.get(i))
                    .unwrap_or(&self.plain);
                render_pass.set_bind_group(group, &texture.bind_group, &[]);
            }
            match &object.drawable {
                Drawable::Mesh(mesh) => mesh.draw(render_pass),
                Drawable::Model(model) => model.draw(render_pass, texture_group),
            }
        }
    }
}
