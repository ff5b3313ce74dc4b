use crate::{
    config::AssetConfig,
    data_structures::{
        mesh::Mesh,
        model::{self, Model},
        texture::{BoundTexture, PixelFormat, Texture},
    },
    resources::texture::{load_string, load_texture, load_texture_or_plain},
};

/**
 * This module contains all logic for loading meshes, textures and models from
 * the asset directory.
 *
 * Layout under the asset root:
 *  - `models/` OBJ files and their MTL files
 *  - `textures/` 2D textures, including `plain.png`
 *  - `textures/skybox/` cube map faces
 */
pub mod mesh;
pub mod texture;

pub const MODELS_DIR: &str = "models";
pub const TEXTURES_DIR: &str = "textures";
pub const SKYBOX_DIR: &str = "skybox";
/// Texture used for materials that name no texture or a missing one.
pub const PLAIN_TEXTURE: &str = "plain.png";

pub async fn load_model_obj(
    file_name: &str,
    assets: &AssetConfig,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<Model> {
    let models_dir = assets.path(MODELS_DIR);
    let obj_text = load_string(&models_dir.join(file_name)).await?;

    let (models, obj_materials) = tobj::futures::load_obj_buf(
        obj_text.as_bytes(),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let path = models_dir.join(p);
            async move {
                match load_string(&path).await {
                    Ok(mat_text) => tobj::futures::load_mtl_buf(mat_text.as_bytes()).await,
                    Err(e) => {
                        log::error!("{e:#}");
                        Err(tobj::LoadError::OpenFileFailed)
                    }
                }
            }
        },
    )
    .await?;

    let obj_materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("Materials of {file_name} could not be loaded: {e}");
        Vec::new()
    });

    let mut textures = Vec::with_capacity(obj_materials.len());
    for material in &obj_materials {
        let texture = load_material_texture(material, assets, device, queue).await;
        textures.push(BoundTexture::new(device, layout, texture));
    }

    let mut meshes = Vec::new();
    let mut mesh_to_texture = Vec::new();
    for (name, data, material) in mesh::load_meshes(&models, file_name) {
        meshes.push(Mesh::new(device, &name, &data));
        mesh_to_texture.push(material);
    }
    log::info!(
        "Loaded {file_name}: {} meshes, {} textures",
        meshes.len(),
        textures.len()
    );

    Ok(Model {
        name: file_name.to_string(),
        meshes,
        mesh_to_texture,
        textures,
    })
}

/// Like [`load_model_obj`] but degrades to an empty model on failure.
pub async fn load_model_obj_or_empty(
    file_name: &str,
    assets: &AssetConfig,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> Model {
    match load_model_obj(file_name, assets, device, queue, layout).await {
        Ok(model) => model,
        Err(e) => {
            log::error!("Failed to load the model {file_name}: {e:#}");
            Model::empty(file_name)
        }
    }
}

/// A material's diffuse texture, then `plain.png`, then the built-in plain
/// texture.
async fn load_material_texture(
    material: &tobj::Material,
    assets: &AssetConfig,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Texture {
    let textures_dir = assets.path(TEXTURES_DIR);
    let resolved = material
        .diffuse_texture
        .as_deref()
        .and_then(|name| model::resolve_texture_path(&textures_dir, name));
    if let Some(path) = resolved {
        match load_texture(&path, PixelFormat::Rgb, device, queue).await {
            Ok(texture) => return texture,
            Err(e) => log::error!("{e:#}"),
        }
    }
    load_texture_or_plain(&textures_dir.join(PLAIN_TEXTURE), PixelFormat::Rgba, device, queue).await
}
