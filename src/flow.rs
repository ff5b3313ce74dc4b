//! Lecture lifecycle and the application event loop.
//!
//! A lecture is one small rendering program. [`run`] opens the window,
//! builds the [`Context`], constructs the lecture and then drives it from
//! winit's event loop.
//!
//! # Lifecycle
//!
//! 1. the constructor is called once with the fresh context
//! 2. `on_init()` is called once right after
//! 3. `on_window_event()` is called for every window event
//! 4. each frame the camera consumes the input, `on_update()` runs, the
//!    camera uniform is uploaded and `on_render()` records the frame
//!
//! Closing the window or pressing Escape ends the loop.

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{config::LectureConfig, context::Context, render::render_frame};

/// One rendering program driven by [`run`].
pub trait Lecture {
    /// Called once after construction. This is the place to adjust the
    /// context, e.g. the camera, before the first frame.
    fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every window event after the context's input state has
    /// seen it.
    fn on_window_event(&mut self, ctx: &mut Context, event: &WindowEvent) {
        let _ = (ctx, event);
    }

    /// Called every frame with the time since the previous frame, after the
    /// camera has moved.
    fn on_update(&mut self, ctx: &mut Context, dt: Duration);

    /// Records this frame's passes into `encoder`, drawing to `view`.
    fn on_render(&mut self, ctx: &Context, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView);
}

struct AppState<L> {
    ctx: Context,
    lecture: L,
}

impl<L: Lecture> AppState<L> {
    fn update(&mut self, dt: Duration) {
        let ctx = &mut self.ctx;
        ctx.camera.camera.handle_keys(&ctx.input.keys);
        let x_change = ctx.input.mouse.take_x_change();
        let y_change = ctx.input.mouse.take_y_change();
        ctx.camera.camera.handle_mouse(x_change, y_change);
        ctx.camera.camera.update(dt.as_secs_f32());

        self.lecture.on_update(ctx, dt);

        ctx.camera.write_to_buffer(&ctx.queue);
    }
}

pub struct App<L, C> {
    config: LectureConfig,
    constructor: Option<C>,
    state: Option<AppState<L>>,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl<L, C> App<L, C>
where
    L: Lecture,
    C: FnOnce(&mut Context) -> anyhow::Result<L>,
{
    fn new(config: LectureConfig, constructor: C) -> Self {
        Self {
            config,
            constructor: Some(constructor),
            state: None,
            last_time: Instant::now(),
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop, constructor: C) -> anyhow::Result<AppState<L>> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let mut ctx = futures::executor::block_on(Context::new(window, &self.config))?;
        let mut lecture = constructor(&mut ctx)?;
        lecture.on_init(&mut ctx)?;
        log::info!("Initialized {:?}", window_config.title);

        Ok(AppState { ctx, lecture })
    }
}

impl<L, C> ApplicationHandler for App<L, C>
where
    L: Lecture,
    C: FnOnce(&mut Context) -> anyhow::Result<L>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructor) = self.constructor.take() else {
            return;
        };
        match self.init(event_loop, constructor) {
            Ok(state) => {
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start the lecture: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.input.handle_window_event(&event);
        state.lecture.on_window_event(&mut state.ctx, &event);
        if state.ctx.input.should_close() {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                state.update(dt);

                let lecture = &mut state.lecture;
                match render_frame(&state.ctx, |ctx, encoder, view| {
                    lecture.on_render(ctx, encoder, view)
                }) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Opens a window and runs the lecture built by `constructor` until the
/// window is closed. Errors from context creation or lecture setup are
/// logged and returned.
pub fn run<L, C>(config: LectureConfig, constructor: C) -> anyhow::Result<()>
where
    L: Lecture,
    C: FnOnce(&mut Context) -> anyhow::Result<L>,
{
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, constructor);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
