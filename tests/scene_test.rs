mod common;

use std::path::Path;

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};
use common::test_utils::assert_mat4_approx;
use flow_lectures::{
    data_structures::{
        material::Material,
        model::resolve_texture_path,
        skybox::strip_translation,
    },
    scene::{ObjectUniform, normal_matrix},
};

#[test]
fn should_ignore_translation_in_normal_matrix() {
    let model = Matrix4::from_translation(Vector3::new(3.0, -2.0, 7.0));

    let normals = normal_matrix(model);

    assert_eq!(normals.x.truncate(), Vector3::unit_x());
    assert_eq!(normals.y.truncate(), Vector3::unit_y());
    assert_eq!(normals.z.truncate(), Vector3::unit_z());
}

#[test]
fn should_invert_scale_in_normal_matrix() {
    let model = Matrix4::from_nonuniform_scale(2.0, 4.0, 0.5);

    assert_mat4_approx(
        normal_matrix(model),
        Matrix4::from_nonuniform_scale(0.5, 0.25, 2.0),
    );
}

#[test]
fn should_fall_back_to_model_when_singular() {
    let model = Matrix4::from_nonuniform_scale(1.0, 1.0, 0.0);

    assert_eq!(normal_matrix(model), model);
}

#[test]
fn should_pack_object_uniform() {
    let model = Matrix4::from_translation(Vector3::new(0.0, 2.0, -2.5));

    let uniform = ObjectUniform::new(model, Material::shiny());

    let expected: [[f32; 4]; 4] = model.into();
    assert_eq!(uniform.model, expected);
    assert_eq!(uniform.specular_intensity, 1.0);
    assert_eq!(uniform.shininess, 32.0);
    assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
}

#[test]
fn should_strip_view_translation() {
    let view = Matrix4::look_at_rh(
        cgmath::Point3::new(3.0, 4.0, 5.0),
        cgmath::Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
    );

    let sky_view = strip_translation(view);

    assert_eq!(sky_view.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(sky_view.x.truncate(), view.x.truncate());
    assert_eq!(sky_view.y.truncate(), view.y.truncate());
    assert_eq!(sky_view.z.truncate(), view.z.truncate());
    assert!(sky_view.is_invertible());
}

#[test]
fn should_resolve_exported_texture_paths() {
    let textures = Path::new("assets/textures");

    assert_eq!(
        resolve_texture_path(textures, "C:\\Users\\artist\\Hull.PNG"),
        Some(textures.join("Hull.png"))
    );
    assert_eq!(
        resolve_texture_path(textures, "maps/uh60/body.Tga"),
        Some(textures.join("body.tga"))
    );
    assert_eq!(
        resolve_texture_path(textures, "noext"),
        Some(textures.join("noext"))
    );
}

#[test]
fn should_reject_empty_texture_names() {
    let textures = Path::new("assets/textures");

    assert_eq!(resolve_texture_path(textures, ""), None);
    assert_eq!(resolve_texture_path(textures, "maps/"), None);
}
