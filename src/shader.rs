//! WGSL shader modules with compile errors surfaced as `anyhow` errors.
//!
//! wgpu reports invalid shader source through the device's error handler,
//! which panics by default. Compiling under a validation error scope turns
//! that into a regular error carrying the shader's label.

use std::path::Path;

use crate::resources::texture::load_string;

#[derive(Debug)]
pub struct Shader {
    label: String,
    module: wgpu::ShaderModule,
}

impl Shader {
    pub fn from_wgsl(device: &wgpu::Device, label: &str, source: &str) -> anyhow::Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(error) = futures::executor::block_on(device.pop_error_scope()) {
            return Err(anyhow::Error::new(error).context(format!("Error compiling shader {label}")));
        }
        log::info!("Compiled shader {label}");

        Ok(Self {
            label: label.to_string(),
            module,
        })
    }

    pub fn from_file(device: &wgpu::Device, path: &Path) -> anyhow::Result<Self> {
        let source = futures::executor::block_on(load_string(path))?;
        Self::from_wgsl(device, &path.to_string_lossy(), &source)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}
