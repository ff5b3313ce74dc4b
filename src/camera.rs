//! Fly camera, perspective projection and the camera uniform.
//!
//! The camera keeps its orientation as Euler angles (pitch/yaw in degrees) and
//! derives `front`, `right` and `up` from them whenever they change. Input is
//! accumulated between frames and applied once per frame in [`Camera::update`].

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3, Zero};
use winit::keyboard::KeyCode;

use crate::input::Keys;

/// cgmath builds OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch is clamped to this many degrees either side of the horizon so the
/// view never flips over the world up axis.
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    velocity: Vector3<f32>,
    x_rotation: f32,
    y_rotation: f32,
    pitch: f32,
    yaw: f32,
    movement_speed: f32,
    rotation_speed: f32,
}

impl Camera {
    pub fn new<V: Into<Vector3<f32>>>(
        position: V,
        world_up: V,
        pitch: f32,
        yaw: f32,
        movement_speed: f32,
        rotation_speed: f32,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: world_up.into(),
            velocity: Vector3::zero(),
            x_rotation: 0.0,
            y_rotation: 0.0,
            pitch,
            yaw,
            movement_speed,
            rotation_speed,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &crate::config::CameraConfig) -> Self {
        Self::new(
            config.position,
            config.world_up,
            config.pitch,
            config.yaw,
            config.movement_speed,
            config.rotation_speed,
        )
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    /// Sets the velocity for this frame. Keys are checked W, S, D, A and each
    /// match overwrites the previous one, so A beats D beats S beats W.
    pub fn handle_keys(&mut self, keys: &Keys) {
        if keys.is_pressed(KeyCode::KeyW) {
            self.velocity = self.front * self.movement_speed;
        }
        if keys.is_pressed(KeyCode::KeyS) {
            self.velocity = -self.front * self.movement_speed;
        }
        if keys.is_pressed(KeyCode::KeyD) {
            self.velocity = self.right * self.movement_speed;
        }
        if keys.is_pressed(KeyCode::KeyA) {
            self.velocity = -self.right * self.movement_speed;
        }
    }

    /// Mouse y grows downwards, so it is inverted for pitch.
    pub fn handle_mouse(&mut self, x_change: f32, y_change: f32) {
        self.x_rotation = x_change * self.rotation_speed;
        self.y_rotation = -y_change * self.rotation_speed;
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.pitch += self.y_rotation * dt;
        self.yaw += self.x_rotation * dt;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
        self.velocity = Vector3::zero();
        self.x_rotation = 0.0;
        self.y_rotation = 0.0;
    }

    fn update_vectors(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        self.front = Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[derive(Debug, Clone)]
pub struct Projection {
    aspect: f32,
    fovy: cgmath::Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<cgmath::Rad<f32>>>(
        width: u32,
        height: u32,
        fovy: F,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// What the lit pipelines need from the camera each frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    eye_position: [f32; 3],
    // Uniforms require 16 byte (4 float) spacing
    _padding: u32,
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
            eye_position: [0.0; 3],
            _padding: 0,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view = camera.view_matrix().into();
        self.projection = projection.calc_matrix().into();
        self.eye_position = camera.position().into();
    }

    pub fn eye_position(&self) -> [f32; 3] {
        self.eye_position
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: uniform buffer and its bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub projection: Projection,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: Camera, projection: Projection) -> Self {
        use wgpu::util::DeviceExt;

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = crate::pipelines::uniform_layout(device, "camera_bind_group_layout");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            projection,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera, &self.projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
