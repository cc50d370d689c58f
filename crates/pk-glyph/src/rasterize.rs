use std::borrow::Cow;

use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use pk_core::frame::FrameBuffer;

use crate::error::RenderError;

/// Pixel rows kept free for the card header.
pub const MARGIN_ROWS: u32 = 4;

/// Pixel bounding box for a `width × height` cell area.
///
/// Two pixel rows per cell row, minus [`MARGIN_ROWS`]; never below one row.
///
/// # Example
/// ```
/// use pk_glyph::rasterize::pixel_box;
/// assert_eq!(pixel_box(40, 20), (40, 36));
/// assert_eq!(pixel_box(4, 4), (4, 4));
/// assert_eq!(pixel_box(8, 1), (8, 1));
/// ```
#[must_use]
pub fn pixel_box(width: u16, height: u16) -> (u32, u32) {
    let max_h = (u32::from(height) * 2).saturating_sub(MARGIN_ROWS).max(1);
    (u32::from(width), max_h)
}

/// Thumbnail size of a `src_w × src_h` image inside `max_w × max_h`.
///
/// `None` when the image already fits (never enlarged). Width is fitted
/// first, then height, with integer truncation and a 1 pixel floor.
///
/// # Example
/// ```
/// use pk_glyph::rasterize::thumbnail_size;
/// assert_eq!(thumbnail_size(96, 96, 40, 36), Some((36, 36)));
/// assert_eq!(thumbnail_size(20, 10, 40, 36), None);
/// assert_eq!(thumbnail_size(300, 20, 40, 36), Some((40, 2)));
/// ```
#[must_use]
pub fn thumbnail_size(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> Option<(u32, u32)> {
    if max_w >= src_w && max_h >= src_h {
        return None;
    }

    let (mut new_w, mut new_h) = (u64::from(src_w), u64::from(src_h));
    let (max_w, max_h) = (u64::from(max_w), u64::from(max_h));

    if new_w > max_w {
        new_h = (new_h * max_w / new_w).max(1);
        new_w = max_w;
    }
    if new_h > max_h {
        new_w = (new_w * max_h / new_h).max(1);
        new_h = max_h;
    }

    Some((new_w as u32, new_h as u32))
}

/// Réducteur réutilisable wrappant fast_image_resize (Lanczos3).
///
/// # Example
/// ```
/// use pk_glyph::rasterize::Rasterizer;
/// use pk_core::frame::FrameBuffer;
///
/// let mut r = Rasterizer::new();
/// let src = FrameBuffer::filled(96, 96, (0, 0, 255, 255));
/// let small = r.rasterize(&src, 40, 20).unwrap();
/// assert_eq!((small.width, small.height), (36, 36));
/// ```
pub struct Rasterizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (fast_image_resize wants `&mut` on it).
    src_buf: Vec<u8>,
}

impl Rasterizer {
    /// Create a new rasterizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            src_buf: Vec::new(),
        }
    }

    /// Shrink `src` to fit a `width × height` cell area.
    ///
    /// Images already inside the pixel box are borrowed unchanged.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero, the image is empty, or the
    /// resize backend fails.
    pub fn rasterize<'a>(
        &mut self,
        src: &'a FrameBuffer,
        width: u16,
        height: u16,
    ) -> Result<Cow<'a, FrameBuffer>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if src.is_empty() {
            return Err(RenderError::EmptyImage {
                width: src.width,
                height: src.height,
            });
        }

        let (max_w, max_h) = pixel_box(width, height);
        let Some((dst_w, dst_h)) = thumbnail_size(src.width, src.height, max_w, max_h) else {
            return Ok(Cow::Borrowed(src));
        };

        log::trace!(
            "Rasterize {}×{} → {dst_w}×{dst_h} (boîte {max_w}×{max_h})",
            src.width,
            src.height
        );

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| RenderError::Resize(e.to_string()))?;
        let mut dst_image = Image::new(dst_w, dst_h, PixelType::U8x4);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| RenderError::Resize(e.to_string()))?;

        Ok(Cow::Owned(FrameBuffer {
            data: dst_image.into_vec(),
            width: dst_w,
            height: dst_h,
        }))
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Same as [`Rasterizer::rasterize`].
pub fn rasterize(
    src: &FrameBuffer,
    width: u16,
    height: u16,
) -> Result<Cow<'_, FrameBuffer>, RenderError> {
    Rasterizer::new().rasterize(src, width, height)
}
