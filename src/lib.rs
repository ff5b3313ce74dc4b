//! flow-lectures
//!
//! Small real-time rendering lectures on top of a handful of thin GPU
//! resource wrappers. Every lecture follows the same recipe: open a window,
//! compile the pipelines, upload meshes and textures, then each frame move
//! the camera and the lights, render the shadow maps, draw the scene and
//! present.
//!
//! High-level modules
//! - `animation`: per-frame oscillators and spinners of the early lectures
//! - `camera`: fly camera, projection and their uniform
//! - `config`: TOML lecture configuration
//! - `context`: window, surface, device, queue and shared layouts
//! - `data_structures`: meshes, textures, materials, lights, shadow maps,
//!   models and the skybox
//! - `flow`: the `Lecture` trait and the event loop
//! - `input`: keyboard and mouse state for the camera
//! - `pipelines`: lit, flat, shadow and skybox pipelines
//! - `render`: frame acquisition and the shadow + main pass renderer
//! - `resources`: loading textures and OBJ models from the asset directory
//! - `scene`: objects, their per-object uniforms and the scene's lights
//! - `shader`: WGSL compilation with errors reported as values
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit;
pub use winit::event::WindowEvent;
