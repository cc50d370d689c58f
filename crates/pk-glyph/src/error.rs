use thiserror::Error;

/// Errors originating from the glyph renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Requested cell dimensions contain a zero.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width in cells.
        width: u16,
        /// Height in cells.
        height: u16,
    },

    /// Source image has no pixel.
    #[error("Image source vide ({width}×{height})")]
    EmptyImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// fast_image_resize refused the buffers or the operation.
    #[error("Redimensionnement échoué : {0}")]
    Resize(String),
}
