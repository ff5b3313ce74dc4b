use flow_lectures::input::{Input, Keys, Mouse};
use winit::{event::ElementState, keyboard::KeyCode};

#[test]
fn should_not_report_the_first_cursor_position() {
    let mut mouse = Mouse::default();

    mouse.moved_to(400.0, 300.0);

    assert_eq!(mouse.take_x_change(), 0.0);
    assert_eq!(mouse.take_y_change(), 0.0);
}

#[test]
fn should_accumulate_movement_until_read() {
    let mut mouse = Mouse::default();
    mouse.moved_to(10.0, 10.0);
    mouse.moved_to(15.0, 12.0);
    mouse.moved_to(20.0, 20.0);

    assert_eq!(mouse.take_x_change(), 10.0);
    assert_eq!(mouse.take_y_change(), 10.0);
    assert_eq!(mouse.take_x_change(), 0.0);
    assert_eq!(mouse.take_y_change(), 0.0);

    mouse.moved_to(18.0, 25.0);
    assert_eq!(mouse.take_x_change(), -2.0);
    assert_eq!(mouse.take_y_change(), 5.0);
}

#[test]
fn should_track_held_keys() {
    let mut keys = Keys::new();

    keys.press(KeyCode::KeyW);
    keys.press(KeyCode::KeyA);
    keys.release(KeyCode::KeyW);

    assert!(!keys.is_pressed(KeyCode::KeyW));
    assert!(keys.is_pressed(KeyCode::KeyA));
}

#[test]
fn should_close_on_escape() {
    let mut input = Input::new();

    input.handle_key(KeyCode::KeyW, ElementState::Pressed);
    assert!(!input.should_close());
    assert!(input.keys.is_pressed(KeyCode::KeyW));

    input.handle_key(KeyCode::Escape, ElementState::Pressed);
    assert!(input.should_close());
}

#[test]
fn should_close_on_close_request() {
    let mut input = Input::new();

    input.handle_window_event(&winit::event::WindowEvent::CloseRequested);

    assert!(input.should_close());
}
