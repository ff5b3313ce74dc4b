//! Static indexed meshes.
//!
//! A [`Mesh`] owns one vertex buffer and one index buffer on the GPU. The CPU
//! side lives in [`MeshData`] until it is uploaded; this is also where the
//! lecture shapes and the normal averaging are defined.

use cgmath::{InnerSpace, Vector3, Zero};
use wgpu::util::DeviceExt;

/// Anything that can describe its own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved vertex: position, texture coordinates, normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl ModelVertex {
    pub const fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            normal,
        }
    }

    /// Vertex without texture coordinates or normal.
    pub const fn at(position: [f32; 3]) -> Self {
        Self::new(position, [0.0; 2], [0.0; 3])
    }
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Smooth per-vertex normals for an indexed triangle list.
///
/// Every triangle adds its unit face normal `(v1 - v0) x (v2 - v0)` to its
/// three corners, then every vertex normal is normalized. Degenerate
/// triangles add nothing, vertices no triangle references keep a zero
/// normal, and a trailing partial triangle is ignored.
pub fn calculate_average_normals(indices: &[u32], vertices: &mut [ModelVertex]) {
    let mut sums = vec![Vector3::<f32>::zero(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let corners = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        if corners.iter().any(|&i| i >= vertices.len()) {
            log::warn!("Triangle {:?} references a vertex out of range, skipping it", triangle);
            continue;
        }
        let v0: Vector3<f32> = vertices[corners[0]].position.into();
        let v1: Vector3<f32> = vertices[corners[1]].position.into();
        let v2: Vector3<f32> = vertices[corners[2]].position.into();

        let face = (v1 - v0).cross(v2 - v0);
        if face.magnitude2() == 0.0 {
            continue;
        }
        let face = face.normalize();
        for corner in corners {
            sums[corner] += face;
        }
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = if sum.magnitude2() > 0.0 {
            sum.normalize().into()
        } else {
            [0.0; 3]
        };
    }
}

/// CPU-side mesh, ready to be uploaded with [`Mesh::new`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<ModelVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Recomputes all normals from the triangles.
    pub fn with_average_normals(mut self) -> Self {
        calculate_average_normals(&self.indices, &mut self.vertices);
        self
    }

    /// The lectures' first shape: one triangle in normalized device space.
    pub fn triangle() -> Self {
        Self::new(
            vec![
                ModelVertex::at([-1.0, -1.0, 0.0]),
                ModelVertex::at([1.0, -1.0, 0.0]),
                ModelVertex::at([0.0, 1.0, 0.0]),
            ],
            vec![0, 1, 2],
        )
    }

    /// Four-sided pyramid (a tetrahedron with its apex up), with texture
    /// coordinates and averaged normals.
    #[rustfmt::skip]
    pub fn pyramid() -> Self {
        let indices = vec![
            0, 3, 1,
            1, 3, 2,
            2, 3, 0,
            0, 1, 2,
        ];
        let vertices = vec![
            ModelVertex::new([-1.0, -1.0, 0.0], [0.0, 0.0], [0.0; 3]),
            ModelVertex::new([ 0.0, -1.0, 1.0], [0.5, 0.0], [0.0; 3]),
            ModelVertex::new([ 1.0, -1.0, 0.0], [1.0, 0.0], [0.0; 3]),
            ModelVertex::new([ 0.0,  1.0, 0.0], [0.5, 1.0], [0.0; 3]),
        ];
        Self::new(vertices, indices).with_average_normals()
    }

    /// Square floor in the xz-plane. Its normal points down, following the
    /// inward-normal convention the lit shader expects.
    #[rustfmt::skip]
    pub fn floor(half_extent: f32, uv_repeat: f32) -> Self {
        let e = half_extent;
        let n = [0.0, -1.0, 0.0];
        let vertices = vec![
            ModelVertex::new([-e, 0.0, -e], [0.0, 0.0], n),
            ModelVertex::new([ e, 0.0, -e], [uv_repeat, 0.0], n),
            ModelVertex::new([-e, 0.0,  e], [0.0, uv_repeat], n),
            ModelVertex::new([ e, 0.0,  e], [uv_repeat, uv_repeat], n),
        ];
        Self::new(vertices, vec![0, 2, 1, 1, 2, 3])
    }

    /// Unit cube around the origin, used as skybox geometry. Only positions
    /// matter.
    #[rustfmt::skip]
    pub fn sky_cube() -> Self {
        let indices = vec![
            // front
            0, 1, 2,
            2, 1, 3,
            // right
            2, 3, 5,
            5, 3, 7,
            // back
            5, 7, 4,
            4, 7, 6,
            // left
            4, 6, 0,
            0, 6, 1,
            // top
            4, 0, 5,
            5, 0, 2,
            // bottom
            1, 6, 3,
            3, 6, 7,
        ];
        let vertices = vec![
            ModelVertex::at([-1.0,  1.0, -1.0]),
            ModelVertex::at([-1.0, -1.0, -1.0]),
            ModelVertex::at([ 1.0,  1.0, -1.0]),
            ModelVertex::at([ 1.0, -1.0, -1.0]),
            ModelVertex::at([-1.0,  1.0,  1.0]),
            ModelVertex::at([ 1.0,  1.0,  1.0]),
            ModelVertex::at([-1.0, -1.0,  1.0]),
            ModelVertex::at([ 1.0, -1.0,  1.0]),
        ];
        Self::new(vertices, indices)
    }

    /// Inverts every normal in place.
    pub fn flip_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = vertex.normal.map(|c| -c);
        }
    }
}

/// A static mesh on the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, name: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
        }
    }

    /// Issues one indexed draw with whatever pipeline and bind groups are set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.num_elements == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
    }
}
