//! PNG output and integer scaling for exported frames

use image::imageops::FilterType;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save(path)?;
    Ok(())
}

/// Scale an image by an integer factor using nearest-neighbor interpolation.
///
/// Nearest-neighbor keeps pixel edges crisp, which is what sprite export
/// wants. A factor of 1 returns a plain copy.
pub fn scale_image(image: &RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image.clone();
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(
        image,
        w * factor as u32,
        h * factor as u32,
        FilterType::Nearest,
    )
}
