mod common;

use cgmath::{InnerSpace, Vector3};
use common::test_utils::{assert_approx, assert_vec3_approx};
use flow_lectures::{
    data_structures::mesh::{MeshData, ModelVertex, calculate_average_normals},
    resources::mesh::load_meshes,
};

fn normal(vertex: &ModelVertex) -> Vector3<f32> {
    vertex.normal.into()
}

#[test]
fn should_average_face_normals() {
    let mut vertices = vec![
        ModelVertex::at([0.0, 0.0, 0.0]),
        ModelVertex::at([1.0, 0.0, 0.0]),
        ModelVertex::at([0.0, 1.0, 0.0]),
        ModelVertex::at([0.0, 0.0, 1.0]),
    ];
    // Two triangles sharing the edge 0-1: one in the xy-plane, one in the xz-plane.
    calculate_average_normals(&[0, 1, 2, 0, 3, 1], &mut vertices);

    assert_vec3_approx(normal(&vertices[2]), Vector3::unit_z());
    assert_vec3_approx(normal(&vertices[3]), Vector3::unit_y());
    let shared = Vector3::new(0.0, 1.0, 1.0).normalize();
    assert_vec3_approx(normal(&vertices[0]), shared);
    assert_vec3_approx(normal(&vertices[1]), shared);
}

#[test]
fn should_skip_degenerate_and_broken_triangles() {
    let mut vertices = vec![
        ModelVertex::at([0.0, 0.0, 0.0]),
        ModelVertex::at([1.0, 0.0, 0.0]),
        ModelVertex::at([2.0, 0.0, 0.0]),
        ModelVertex::at([5.0, 5.0, 5.0]),
    ];
    // Collinear, out of range, and a trailing partial triangle.
    calculate_average_normals(&[0, 1, 2, 0, 1, 9, 0, 1], &mut vertices);

    for vertex in &vertices {
        assert_eq!(vertex.normal, [0.0; 3]);
    }
}

#[test]
fn should_build_pyramid_with_unit_normals() {
    let pyramid = MeshData::pyramid();

    assert_eq!(pyramid.vertices.len(), 4);
    assert_eq!(pyramid.indices.len(), 12);
    for vertex in &pyramid.vertices {
        assert_approx(normal(vertex).magnitude(), 1.0);
    }
    assert_eq!(pyramid.vertices[3].tex_coords, [0.5, 1.0]);
}

#[test]
fn should_build_floor_facing_down() {
    let floor = MeshData::floor(10.0, 10.0);

    assert_eq!(floor.vertices.len(), 4);
    assert_eq!(floor.indices, vec![0, 2, 1, 1, 2, 3]);
    for vertex in &floor.vertices {
        assert_eq!(vertex.normal, [0.0, -1.0, 0.0]);
        assert_eq!(vertex.position[1], 0.0);
        assert_eq!(vertex.position[0].abs(), 10.0);
    }
    assert_eq!(floor.vertices[3].tex_coords, [10.0, 10.0]);
}

#[test]
fn should_build_sky_cube() {
    let cube = MeshData::sky_cube();

    assert_eq!(cube.vertices.len(), 8);
    assert_eq!(cube.indices.len(), 36);
    assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
}

#[test]
fn should_flip_normals() {
    let mut pyramid = MeshData::pyramid();
    let before = pyramid.vertices.clone();

    pyramid.flip_normals();

    for (flipped, original) in pyramid.vertices.iter().zip(&before) {
        assert_vec3_approx(normal(flipped), -normal(original));
        assert_eq!(flipped.position, original.position);
    }
}

#[test]
fn should_convert_obj_meshes() {
    let mesh = tobj::Mesh {
        positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        texcoords: vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.25],
        indices: vec![0, 1, 2],
        material_id: Some(2),
        ..Default::default()
    };
    let models = [tobj::Model::new(mesh, "hull".to_string())];

    let meshes = load_meshes(&models, "ship.obj");

    assert_eq!(meshes.len(), 1);
    let (name, data, material) = &meshes[0];
    assert_eq!(name, "ship.obj/hull");
    assert_eq!(*material, 2);
    assert_eq!(data.indices, vec![0, 1, 2]);
    assert_eq!(data.vertices[0].tex_coords, [0.0, 1.0]);
    assert_eq!(data.vertices[2].tex_coords, [0.0, 0.75]);
    // Generated from the counter-clockwise winding, then inverted.
    for vertex in &data.vertices {
        assert_vec3_approx(normal(vertex), -Vector3::unit_z());
    }
}

#[test]
fn should_keep_and_invert_obj_normals() {
    let mesh = tobj::Mesh {
        positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        normals: vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
        ..Default::default()
    };
    let models = [tobj::Model::new(mesh, "plate".to_string())];

    let meshes = load_meshes(&models, "plate.obj");

    let (_, data, material) = &meshes[0];
    assert_eq!(*material, 0);
    for vertex in &data.vertices {
        assert_eq!(vertex.normal, [-1.0, 0.0, 0.0]);
        assert_eq!(vertex.tex_coords, [0.0, 1.0]);
    }
}
