use std::path::{Path, PathBuf};
use log::debug;

/// Extensions purged from the preview folder on every custom-path run.
pub const PREVIEW_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

pub fn ensure_output_directory(dir_path: &Path) -> std::io::Result<PathBuf> {
    if !dir_path.exists() {
        debug!("Output directory '{}' does not exist, attempting to create it.", dir_path.display());
        std::fs::create_dir_all(dir_path)?;
    } else if !dir_path.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Output path '{}' exists but is not a directory.", dir_path.display()),
        ));
    }
    Ok(dir_path.to_path_buf())
}

pub fn has_preview_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            PREVIEW_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
