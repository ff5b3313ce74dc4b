use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

/// Lecture assets (textures, skybox faces, OBJ models) are read at runtime
/// relative to the asset root. Mirror them next to the build output so a
/// binary started from `target/` finds the same files.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets = manifest_dir.join("assets");
    if !assets.exists() {
        return Ok(());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy_items(&[assets], out_dir, &options)
        .map_err(|e| anyhow!("copying lecture assets failed: {e}"))?;

    Ok(())
}
