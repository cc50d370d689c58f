use std::path::Path;

use anyhow::{Context, Result};
use pk_core::frame::FrameBuffer;

/// Extensions image reconnues.
pub const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// True if `path` has a recognised image extension.
///
/// # Example
/// ```
/// use pk_source::image::is_image_path;
/// use std::path::Path;
/// assert!(is_image_path(Path::new("sprites/25.PNG")));
/// assert!(!is_image_path(Path::new("page-1.json")));
/// ```
#[must_use]
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTS.contains(&e.to_ascii_lowercase().as_str()))
}

fn into_frame(img: &image::DynamicImage) -> FrameBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

/// Charge une image depuis le disque en RGBA.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use pk_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("sprites/1.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    Ok(into_frame(&img))
}

/// Décode une image en mémoire (format deviné depuis les octets).
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer> {
    let img = image::load_from_memory(bytes).context("Image illisible")?;
    Ok(into_frame(&img))
}
