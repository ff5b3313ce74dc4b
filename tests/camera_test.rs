mod common;

use cgmath::{InnerSpace, Vector3};
use common::test_utils::{assert_approx, assert_vec3_approx, to_ndc};
use flow_lectures::{
    camera::{Camera, PITCH_LIMIT, Projection},
    config::CameraConfig,
    input::Keys,
};
use winit::keyboard::KeyCode;

fn lecture_camera() -> Camera {
    Camera::from_config(&CameraConfig::default())
}

#[test]
fn should_derive_orientation_from_yaw_and_pitch() {
    let camera = lecture_camera();
    let half_sqrt3 = 3f32.sqrt() / 2.0;

    assert_vec3_approx(camera.front(), Vector3::new(0.5, 0.0, -half_sqrt3));
    assert_vec3_approx(camera.right(), Vector3::new(half_sqrt3, 0.0, 0.5));
    assert_vec3_approx(camera.up(), Vector3::unit_y());
}

#[test]
fn should_move_along_front_with_w() {
    let mut camera = lecture_camera();
    let start = camera.position();
    let front = camera.front();

    camera.handle_keys(&Keys::from([KeyCode::KeyW]));
    camera.update(0.5);

    assert_vec3_approx(camera.position(), start + front * 5.0 * 0.5);
}

#[test]
fn should_let_later_keys_win() {
    let mut camera = lecture_camera();
    let start = camera.position();
    let right = camera.right();

    camera.handle_keys(&Keys::from([KeyCode::KeyW, KeyCode::KeyD, KeyCode::KeyA]));
    camera.update(1.0);

    assert_vec3_approx(camera.position(), start - right * 5.0);
}

#[test]
fn should_forget_velocity_after_update() {
    let mut camera = lecture_camera();
    camera.handle_keys(&Keys::from([KeyCode::KeyS]));
    camera.update(1.0);
    let moved = camera.position();

    camera.update(1.0);

    assert_vec3_approx(camera.position(), moved);
}

#[test]
fn should_turn_with_mouse() {
    let mut camera = lecture_camera();

    camera.handle_mouse(1.0, 0.5);
    camera.update(1.0);

    assert_approx(camera.yaw(), -60.0 + 20.0);
    assert_approx(camera.pitch(), -10.0);
    assert_approx(camera.front().magnitude(), 1.0);
}

#[test]
fn should_clamp_pitch() {
    let mut camera = lecture_camera();

    camera.handle_mouse(0.0, -100.0);
    camera.update(1.0);
    assert_approx(camera.pitch(), PITCH_LIMIT);

    camera.handle_mouse(0.0, 1000.0);
    camera.update(1.0);
    assert_approx(camera.pitch(), -PITCH_LIMIT);
}

#[test]
fn should_look_at_the_point_in_front() {
    let camera = lecture_camera();
    let projection = Projection::new(1024, 768, cgmath::Deg(60.0), 0.1, 100.0);
    let target = camera.position() + camera.front() * 10.0;

    let ndc = to_ndc(projection.calc_matrix() * camera.view_matrix(), target);

    assert_approx(ndc.x, 0.0);
    assert_approx(ndc.y, 0.0);
    assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} outside 0..1", ndc.z);
}

#[test]
fn should_keep_aspect_on_zero_resize() {
    let mut projection = Projection::new(800, 400, cgmath::Deg(45.0), 0.1, 100.0);
    assert_approx(projection.aspect(), 2.0);

    projection.resize(0, 0);
    assert_approx(projection.aspect(), 2.0);

    projection.resize(300, 300);
    assert_approx(projection.aspect(), 1.0);
}
