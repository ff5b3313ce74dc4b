//! Light descriptors and their GPU packing.
//!
//! The three light kinds compose rather than inherit: a [`SpotLight`] is a
//! [`PointLight`] with a direction and a cone edge, and every kind carries a
//! [`Light`] with the shared colour and intensity terms. Shadow map textures
//! are owned by the renderer; a light only knows the size its map should
//! have and how to build the light-space transforms for it.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::camera::OPENGL_TO_WGPU_MATRIX;

/// Upper bound on point lights the lit shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 3;
/// Upper bound on spot lights the lit shader evaluates.
pub const MAX_SPOT_LIGHTS: usize = 3;

/// Rendering into a cube face with a top-left framebuffer origin mirrors the
/// face vertically compared to how cube maps are addressed, so the face
/// transforms flip clip-space y back.
#[rustfmt::skip]
pub const CUBE_FACE_FLIP: Matrix4<f32> = Matrix4::new(
    1.0,  0.0, 0.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 1.0, 0.0,
    0.0,  0.0, 0.0, 1.0,
);

/// Half extent of the square volume a directional light's shadow covers.
pub const DIRECTIONAL_SHADOW_EXTENT: f32 = 20.0;
pub const DIRECTIONAL_SHADOW_NEAR: f32 = 0.1;
pub const DIRECTIONAL_SHADOW_FAR: f32 = 100.0;

/// Colour and intensity terms shared by every light kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vector3<f32>,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
}

impl Light {
    pub fn new<V: Into<Vector3<f32>>>(color: V, ambient_intensity: f32, diffuse_intensity: f32) -> Self {
        Self {
            color: color.into(),
            ambient_intensity,
            diffuse_intensity,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0], 1.0, 0.0)
    }
}

/// Sun-like light: parallel rays along `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub base: Light,
    pub direction: Vector3<f32>,
    pub shadow_size: (u32, u32),
    projection: Matrix4<f32>,
}

impl DirectionalLight {
    pub fn new<V: Into<Vector3<f32>>>(shadow_size: (u32, u32), base: Light, direction: V) -> Self {
        let projection = OPENGL_TO_WGPU_MATRIX
            * cgmath::ortho(
                -DIRECTIONAL_SHADOW_EXTENT,
                DIRECTIONAL_SHADOW_EXTENT,
                -DIRECTIONAL_SHADOW_EXTENT,
                DIRECTIONAL_SHADOW_EXTENT,
                DIRECTIONAL_SHADOW_NEAR,
                DIRECTIONAL_SHADOW_FAR,
            );
        Self {
            base,
            direction: direction.into(),
            shadow_size,
            projection,
        }
    }

    /// World to light clip space: an orthographic view from `-direction`
    /// looking at the origin.
    pub fn light_transform(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(-self.direction);
        // look_at degenerates when the light shines straight along the up axis.
        let up = if self.direction.magnitude2() > 0.0
            && self.direction.normalize().y.abs() > 0.999
        {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        self.projection * Matrix4::look_at_rh(eye, Point3::origin(), up)
    }
}

/// Light radiating from a point, fading with distance.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub base: Light,
    pub position: Vector3<f32>,
    /// Quadratic attenuation term.
    pub a: f32,
    /// Linear attenuation term.
    pub b: f32,
    /// Constant attenuation term.
    pub c: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub shadow_size: u32,
    projection: Matrix4<f32>,
}

impl PointLight {
    /// `shadow_size` is the edge length of each (square) cube face, so the
    /// face projection always has a 1:1 aspect.
    pub fn new<V: Into<Vector3<f32>>>(
        shadow_size: u32,
        (near_plane, far_plane): (f32, f32),
        base: Light,
        position: V,
        (a, b, c): (f32, f32, f32),
    ) -> Self {
        let projection = OPENGL_TO_WGPU_MATRIX
            * cgmath::perspective(cgmath::Deg(90.0), 1.0, near_plane, far_plane);
        Self {
            base,
            position: position.into(),
            a,
            b,
            c,
            near_plane,
            far_plane,
            shadow_size,
            projection,
        }
    }

    /// Divisor applied to the light's contribution at `distance`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        self.a * distance * distance + self.b * distance + self.c
    }

    /// One view-projection per cube face, in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn light_transforms(&self) -> [Matrix4<f32>; 6] {
        let eye = Point3::from_vec(self.position);
        let face = |direction: Vector3<f32>, up: Vector3<f32>| {
            CUBE_FACE_FLIP * self.projection * Matrix4::look_at_rh(eye, eye + direction, up)
        };
        [
            face(Vector3::unit_x(), -Vector3::unit_y()),
            face(-Vector3::unit_x(), -Vector3::unit_y()),
            face(Vector3::unit_y(), Vector3::unit_z()),
            face(-Vector3::unit_y(), -Vector3::unit_z()),
            face(Vector3::unit_z(), -Vector3::unit_y()),
            face(-Vector3::unit_z(), -Vector3::unit_y()),
        ]
    }
}

/// Point light restricted to a cone around `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub point: PointLight,
    direction: Vector3<f32>,
    edge: f32,
    proc_edge: f32,
}

impl SpotLight {
    /// `edge` is the cone's half angle in degrees.
    pub fn new<V: Into<Vector3<f32>>>(point: PointLight, direction: V, edge: f32) -> Self {
        Self {
            point,
            direction: normalize_or_zero(direction.into()),
            edge,
            proc_edge: edge.to_radians().cos(),
        }
    }

    /// Moves and re-aims the light, e.g. to follow the camera as a torch.
    pub fn set<V: Into<Vector3<f32>>>(&mut self, position: V, direction: V) {
        self.point.position = position.into();
        self.direction = normalize_or_zero(direction.into());
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn edge(&self) -> f32 {
        self.edge
    }

    /// Cosine of the edge angle, which is what the shader compares against.
    pub fn proc_edge(&self) -> f32 {
        self.proc_edge
    }
}

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        log::warn!("Light direction is a zero vector");
        v
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub color: [f32; 3],
    pub ambient_intensity: f32,
    pub direction: [f32; 3],
    pub diffuse_intensity: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub color: [f32; 3],
    pub ambient_intensity: f32,
    pub position: [f32; 3],
    pub diffuse_intensity: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub far_plane: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightRaw {
    pub point: PointLightRaw,
    pub direction: [f32; 3],
    pub edge: f32,
}

impl From<&DirectionalLight> for DirectionalLightRaw {
    fn from(light: &DirectionalLight) -> Self {
        Self {
            color: light.base.color.into(),
            ambient_intensity: light.base.ambient_intensity,
            direction: light.direction.into(),
            diffuse_intensity: light.base.diffuse_intensity,
        }
    }
}

impl From<&PointLight> for PointLightRaw {
    fn from(light: &PointLight) -> Self {
        Self {
            color: light.base.color.into(),
            ambient_intensity: light.base.ambient_intensity,
            position: light.position.into(),
            diffuse_intensity: light.base.diffuse_intensity,
            a: light.a,
            b: light.b,
            c: light.c,
            far_plane: light.far_plane,
        }
    }
}

impl From<&SpotLight> for SpotLightRaw {
    fn from(light: &SpotLight) -> Self {
        Self {
            point: (&light.point).into(),
            direction: light.direction.into(),
            edge: light.proc_edge,
        }
    }
}

/// Every light of a frame in the lit shader's uniform layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub directional_transform: [[f32; 4]; 4],
    pub directional: DirectionalLightRaw,
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spot_lights: [SpotLightRaw; MAX_SPOT_LIGHTS],
    pub point_count: u32,
    pub spot_count: u32,
    // Uniforms require 16 byte (4 float) spacing
    _padding: [u32; 2],
}

impl LightsUniform {
    /// Packs the lights, dropping (with a warning) any beyond the shader's
    /// limits.
    pub fn pack(directional: &DirectionalLight, points: &[PointLight], spots: &[SpotLight]) -> Self {
        if points.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights given, only the first {} are used",
                points.len(),
                MAX_POINT_LIGHTS
            );
        }
        if spots.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spot lights given, only the first {} are used",
                spots.len(),
                MAX_SPOT_LIGHTS
            );
        }

        let mut point_lights = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        for (slot, light) in point_lights.iter_mut().zip(points) {
            *slot = light.into();
        }
        let mut spot_lights = [SpotLightRaw::default(); MAX_SPOT_LIGHTS];
        for (slot, light) in spot_lights.iter_mut().zip(spots) {
            *slot = light.into();
        }

        Self {
            directional_transform: directional.light_transform().into(),
            directional: directional.into(),
            point_lights,
            spot_lights,
            point_count: points.len().min(MAX_POINT_LIGHTS) as u32,
            spot_count: spots.len().min(MAX_SPOT_LIGHTS) as u32,
            _padding: [0; 2],
        }
    }
}
