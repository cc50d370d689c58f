pub mod ansi;
pub mod compositor;
pub mod error;
pub mod halfblock;
pub mod quantize;
/// Sprite-to-glyph rendering engine for pokeglyph.
///
/// Downscales an RGBA image, then packs two pixel rows per terminal row with
/// the upper half-block glyph.
pub mod rasterize;

use pk_core::frame::{FrameBuffer, GlyphGrid};
use pk_core::traits::ColorQuantizer;

pub use compositor::SpriteRenderer;
pub use error::RenderError;

/// Rasterize then pack `image` into at most `width × height` cells.
///
/// # Errors
/// Returns an error if `width` or `height` is zero or the image is empty.
///
/// # Example
/// ```
/// use pk_core::frame::FrameBuffer;
/// use pk_glyph::quantize::TrueColor;
///
/// let sprite = FrameBuffer::filled(96, 96, (120, 200, 80, 255));
/// let grid = pk_glyph::render(&sprite, 40, 20, &TrueColor).unwrap();
/// assert!(grid.height <= 20);
/// assert!(grid.width <= 40);
/// ```
pub fn render<Q: ColorQuantizer + ?Sized>(
    image: &FrameBuffer,
    width: u16,
    height: u16,
    quantizer: &Q,
) -> Result<GlyphGrid, RenderError> {
    let small = rasterize::rasterize(image, width, height)?;
    Ok(halfblock::pack(&small, width, quantizer))
}

/// Same as [`render`], encoded as newline-terminated ANSI rows.
///
/// # Errors
/// Returns an error if `width` or `height` is zero or the image is empty.
pub fn render_to_string<Q: ColorQuantizer + ?Sized>(
    image: &FrameBuffer,
    width: u16,
    height: u16,
    quantizer: &Q,
) -> Result<String, RenderError> {
    render(image, width, height, quantizer).map(|grid| ansi::to_ansi_string(&grid))
}
