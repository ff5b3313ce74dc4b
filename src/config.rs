//! Lecture configuration.
//!
//! Every lecture starts from [`LectureConfig::default`], which carries the
//! values of the final skybox lecture. A TOML file can override any subset:
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//! title = "Shadows"
//!
//! [camera]
//! position = [0.0, 4.0, 8.0]
//! yaw = -90.0
//!
//! [projection]
//! fovy_degrees = 45.0
//!
//! [shadows]
//! directional_size = 2048
//!
//! [assets]
//! root = "assets"
//! ```
//!
//! Missing sections and fields fall back to their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file [`crate::flow::run`] loads.
pub const CONFIG_ENV: &str = "FLOW_LECTURES_CONFIG";
/// File tried when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "lecture.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LectureConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub shadows: ShadowConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "flow-lectures".to_string(),
        }
    }
}

/// Start state of the fly camera. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub pitch: f32,
    pub yaw: f32,
    pub movement_speed: f32,
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-3.0, 2.0, 3.0],
            world_up: [0.0, 1.0, 0.0],
            pitch: 0.0,
            yaw: -60.0,
            movement_speed: 5.0,
            rotation_speed: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Depth map resolutions in texels (square maps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub directional_size: u32,
    pub omnidirectional_size: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            directional_size: 1024,
            omnidirectional_size: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

impl AssetConfig {
    /// Resolve a path relative to the asset root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

impl LectureConfig {
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid lecture config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read lecture config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("cannot parse lecture config {}", path.display()))
    }

    /// Like [`from_file`](Self::from_file) but never fails: a missing file is
    /// silent, a broken one is logged, and both yield the defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e:#}; falling back to the default configuration");
                Self::default()
            }
        }
    }

    /// Config selected by [`CONFIG_ENV`] or [`DEFAULT_CONFIG_FILE`].
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_file_or_default(path)
    }

    /// Same config with a different window title.
    pub fn titled(mut self, title: &str) -> Self {
        self.window.title = title.to_string();
        self
    }
}
