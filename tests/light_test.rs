mod common;

use cgmath::{Matrix4, SquareMatrix, Vector3};
use common::test_utils::{assert_approx, assert_vec3_approx, to_ndc};
use flow_lectures::data_structures::light::{
    DirectionalLight, Light, LightsUniform, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS, PointLight, SpotLight,
};

fn point_at(position: [f32; 3]) -> PointLight {
    PointLight::new(
        512,
        (0.1, 100.0),
        Light::new([0.0, 0.0, 1.0], 0.1, 0.1),
        position,
        (0.1, 0.2, 0.3),
    )
}

fn sun() -> DirectionalLight {
    DirectionalLight::new(
        (1024, 1024),
        Light::new([1.0, 0.5, 0.3], 0.1, 0.6),
        [-8.0, -10.0, 14.0],
    )
}

#[test]
fn should_attenuate_quadratically() {
    let light = point_at([4.0, 0.0, 0.0]);

    assert_approx(light.attenuation(0.0), 0.3);
    assert_approx(light.attenuation(2.0), 0.1 * 4.0 + 0.2 * 2.0 + 0.3);
}

#[test]
fn should_project_each_cube_direction_to_its_face_center() {
    let light = point_at([1.0, 2.0, 3.0]);
    let directions = [
        Vector3::unit_x(),
        -Vector3::unit_x(),
        Vector3::unit_y(),
        -Vector3::unit_y(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
    ];

    for (transform, direction) in light.light_transforms().into_iter().zip(directions) {
        let ndc = to_ndc(transform, light.position + direction * 5.0);
        assert_approx(ndc.x, 0.0);
        assert_approx(ndc.y, 0.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} outside 0..1", ndc.z);
    }
}

#[test]
fn should_center_directional_shadow_on_origin() {
    let ndc = to_ndc(sun().light_transform(), Vector3::new(0.0, 0.0, 0.0));

    assert_approx(ndc.x, 0.0);
    assert_approx(ndc.y, 0.0);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn should_handle_light_straight_down() {
    let light = DirectionalLight::new((16, 16), Light::default(), [0.0, -1.0, 0.0]);

    let transform = light.light_transform();

    assert!(transform.is_invertible());
    let m: [[f32; 4]; 4] = transform.into();
    assert!(m.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn should_store_spot_edge_as_cosine() {
    let spot = SpotLight::new(point_at([0.0, 3.0, -5.0]), [0.0, -2.0, 0.0], 20.0);

    assert_approx(spot.edge(), 20.0);
    assert_approx(spot.proc_edge(), 20f32.to_radians().cos());
    assert_vec3_approx(spot.direction(), -Vector3::unit_y());
}

#[test]
fn should_follow_the_camera() {
    let mut spot = SpotLight::new(point_at([0.0, 3.0, -5.0]), [0.0, -1.0, 0.0], 20.0);

    spot.set([-3.0, 2.0, 3.0], [0.0, 0.0, -4.0]);

    assert_vec3_approx(spot.point.position, Vector3::new(-3.0, 2.0, 3.0));
    assert_vec3_approx(spot.direction(), -Vector3::unit_z());
}

#[test]
fn should_pack_lights_for_the_shader() {
    let points = [point_at([4.0, 0.0, 0.0]), point_at([-4.0, 2.0, 0.0])];
    let spots = [SpotLight::new(point_at([0.0, 3.0, -5.0]), [0.0, -1.0, 0.0], 20.0)];

    let uniform = LightsUniform::pack(&sun(), &points, &spots);

    assert_eq!(uniform.point_count, 2);
    assert_eq!(uniform.spot_count, 1);
    assert_eq!(uniform.point_lights[1].position, [-4.0, 2.0, 0.0]);
    assert_eq!(uniform.point_lights[0].far_plane, 100.0);
    assert_approx(uniform.spot_lights[0].edge, 20f32.to_radians().cos());
    assert_eq!(uniform.directional.direction, [-8.0, -10.0, 14.0]);
    assert_eq!(
        Matrix4::from(uniform.directional_transform),
        sun().light_transform()
    );
}

#[test]
fn should_drop_lights_beyond_the_limits() {
    let points: Vec<_> = (0..MAX_POINT_LIGHTS + 2)
        .map(|i| point_at([i as f32, 0.0, 0.0]))
        .collect();
    let spots: Vec<_> = (0..MAX_SPOT_LIGHTS + 1)
        .map(|i| SpotLight::new(point_at([0.0, i as f32, 0.0]), [0.0, -1.0, 0.0], 10.0))
        .collect();

    let uniform = LightsUniform::pack(&sun(), &points, &spots);

    assert_eq!(uniform.point_count as usize, MAX_POINT_LIGHTS);
    assert_eq!(uniform.spot_count as usize, MAX_SPOT_LIGHTS);
    assert_eq!(
        uniform.point_lights[MAX_POINT_LIGHTS - 1].position,
        [(MAX_POINT_LIGHTS - 1) as f32, 0.0, 0.0]
    );
}

#[test]
fn should_keep_uniform_sizes_16_byte_aligned() {
    assert_eq!(std::mem::size_of::<LightsUniform>() % 16, 0);
}
