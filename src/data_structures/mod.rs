//! Lecture data structures: meshes, textures, lights, shadow maps, models.
//!
//! - `mesh` holds vertex layout, CPU mesh data, normal averaging and GPU meshes
//! - `texture` is the GPU texture wrapper and creation utilities
//! - `material` holds specular parameters
//! - `light` has directional, point and spot lights and their GPU packing
//! - `shadow_map` holds depth maps rendered from a light's view
//! - `model` holds imported multi-mesh models
//! - `skybox` is the cube-mapped background

pub mod light;
pub mod material;
pub mod mesh;
pub mod model;
pub mod shadow_map;
pub mod skybox;
pub mod texture;
