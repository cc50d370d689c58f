use pk_core::config::ColorDepth;
use pk_core::frame::{FrameBuffer, GlyphGrid};
use pk_core::traits::ColorQuantizer;

use crate::error::RenderError;
use crate::halfblock;
use crate::quantize::quantizer_for;
use crate::rasterize::Rasterizer;

/// SpriteRenderer enchaîne rasterisation et packing demi-bloc.
///
/// Holds a reusable [`Rasterizer`] and the quantizer matching the configured
/// color depth. Output depends only on the arguments of each call.
///
/// # Example
/// ```
/// use pk_core::config::ColorDepth;
/// use pk_core::frame::FrameBuffer;
/// use pk_glyph::compositor::SpriteRenderer;
///
/// let mut renderer = SpriteRenderer::new(ColorDepth::Ansi256);
/// let sprite = FrameBuffer::filled(8, 8, (255, 0, 0, 255));
/// let grid = renderer.render(&sprite, 8, 6).unwrap();
/// assert_eq!(grid.height, 4);
/// ```
pub struct SpriteRenderer {
    rasterizer: Rasterizer,
    quantizer: Box<dyn ColorQuantizer>,
    depth: ColorDepth,
}

impl SpriteRenderer {
    /// Create a renderer for the given color depth.
    #[must_use]
    pub fn new(depth: ColorDepth) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            quantizer: quantizer_for(depth),
            depth,
        }
    }

    /// Swap the quantizer if the color depth has changed.
    pub fn update_if_needed(&mut self, depth: ColorDepth) {
        if self.depth != depth {
            log::debug!("Quantizer : {:?} → {depth:?}", self.depth);
            self.quantizer = quantizer_for(depth);
            self.depth = depth;
        }
    }

    /// Current color depth.
    #[must_use]
    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Name of the active quantizer backend.
    #[must_use]
    pub fn quantizer_name(&self) -> &'static str {
        self.quantizer.name()
    }

    /// Render `image` into at most `width × height` cells.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or the image is empty.
    pub fn render(
        &mut self,
        image: &FrameBuffer,
        width: u16,
        height: u16,
    ) -> Result<GlyphGrid, RenderError> {
        let small = self.rasterizer.rasterize(image, width, height)?;
        Ok(halfblock::pack(&small, width, self.quantizer.as_ref()))
    }

    /// Render to newline-terminated ANSI rows.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or the image is empty.
    pub fn render_to_string(
        &mut self,
        image: &FrameBuffer,
        width: u16,
        height: u16,
    ) -> Result<String, RenderError> {
        self.render(image, width, height)
            .map(|grid| crate::ansi::to_ansi_string(&grid))
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new(ColorDepth::default())
    }
}
