//! Imported models: several meshes sharing a list of textures.

use std::path::{Path, PathBuf};

use crate::data_structures::{mesh::Mesh, texture::BoundTexture};

/// A model as a set of meshes and the textures they reference.
///
/// Mesh `i` is drawn with `textures[mesh_to_texture[i]]`. When that index is
/// out of range the mesh is drawn with whatever texture is currently bound.
#[derive(Debug)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub mesh_to_texture: Vec<usize>,
    pub textures: Vec<BoundTexture>,
}

impl Model {
    /// A model that draws nothing. Stands in for models that failed to load.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            meshes: Vec::new(),
            mesh_to_texture: Vec::new(),
            textures: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Draws every mesh. `texture_group` is the bind group index the
    /// current pipeline expects textures at; depth-only passes pass `None`.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, texture_group: Option<u32>) {
        for (i, mesh) in self.meshes.iter().enumerate() {
            if let Some(group) = texture_group {
                let texture = self
                    .mesh_to_texture
                    .get(i)
                    .and_then(|&t| self.textures.get(t));
                if let Some(texture) = texture {
                    render_pass.set_bind_group(group, &texture.bind_group, &[]);
                }
            }
            mesh.draw(render_pass);
        }
    }
}

/// Where a material's diffuse texture lives.
///
/// Exporters often write absolute or Windows paths into material files, so
/// only the file name after the last `\` or `/` is kept, its extension is
/// lowercased, and it is looked up under `textures_dir`.
pub fn resolve_texture_path(textures_dir: &Path, material_texture: &str) -> Option<PathBuf> {
    let file_name = material_texture
        .rsplit(['\\', '/'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())?;

    let file_name = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{}", ext.to_lowercase()),
        _ => file_name.to_string(),
    };
    Some(textures_dir.join(file_name))
}
