use pk_core::error::QuantizeError;
use pk_core::frame::{FrameBuffer, GlyphCell, GlyphGrid};
use pk_core::traits::ColorQuantizer;

/// Number of padding cells placed before a row of `image_width` pixels.
///
/// A counter starts at `image_width` and steps by 2 while it stays below
/// `width`; one blank cell per step, i.e. `ceil((width - image_width) / 2)`.
///
/// # Example
/// ```
/// use pk_glyph::halfblock::pad_cells;
/// assert_eq!(pad_cells(1, 10), 5);
/// assert_eq!(pad_cells(36, 40), 2);
/// assert_eq!(pad_cells(37, 40), 2);
/// assert_eq!(pad_cells(40, 40), 0);
/// assert_eq!(pad_cells(50, 40), 0);
/// ```
#[must_use]
pub fn pad_cells(image_width: u32, width: u16) -> u32 {
    let width = u32::from(width);
    if image_width >= width {
        0
    } else {
        (width - image_width).div_ceil(2)
    }
}

/// Pack an image into half-block cells (▀).
///
/// Each terminal cell covers 2 vertical pixels: the top pixel's color goes
/// to fg, the bottom pixel's color to bg. An odd last pixel row is dropped.
/// A transparent half keeps the terminal default (`▀` or `▄` with no bg);
/// a cell with no quantizable pixel is left blank.
///
/// # Example
/// ```
/// use pk_core::frame::FrameBuffer;
/// use pk_glyph::halfblock::pack;
/// use pk_glyph::quantize::TrueColor;
///
/// let frame = FrameBuffer::filled(4, 5, (0, 128, 0, 255));
/// let grid = pack(&frame, 8, &TrueColor);
/// assert_eq!(grid.height, 2);
/// assert_eq!(grid.width, 2 + 4);
/// ```
pub fn pack<Q: ColorQuantizer + ?Sized>(
    image: &FrameBuffer,
    width: u16,
    quantizer: &Q,
) -> GlyphGrid {
    let pad = pad_cells(image.width, width);
    let cols = (pad + image.width).min(u32::from(u16::MAX)) as u16;
    let rows = (image.height / 2).min(u32::from(u16::MAX)) as u16;
    let mut grid = GlyphGrid::new(cols, rows);
    let mut blanked = 0usize;

    for cy in 0..rows {
        let y = u32::from(cy) * 2;
        for x in 0..image.width {
            let cx = pad + x;
            if cx >= u32::from(cols) {
                break;
            }
            let cell = pack_cell(image, x, y, quantizer);
            if !cell.is_styled() {
                blanked += 1;
            }
            grid.set(cx as u16, cy, cell);
        }
    }

    if blanked > 0 {
        log::trace!(
            "{blanked} cellule(s) sans couleur ({}), {}×{} px",
            quantizer.name(),
            image.width,
            image.height
        );
    }

    grid
}

/// One cell from pixels `(x, y)` and `(x, y + 1)`. Caller guarantees both exist.
#[inline]
fn pack_cell<Q: ColorQuantizer + ?Sized>(
    image: &FrameBuffer,
    x: u32,
    y: u32,
    quantizer: &Q,
) -> GlyphCell {
    let (tr, tg, tb, ta) = image.pixel(x, y);
    let (br, bg, bb, ba) = image.pixel(x, y + 1);

    match (
        quantizer.quantize(tr, tg, tb, ta),
        quantizer.quantize(br, bg, bb, ba),
    ) {
        (Ok(fg), Ok(bg)) => GlyphCell::half_block(fg, bg),
        (Ok(top), Err(QuantizeError::Transparent)) => GlyphCell::upper(top),
        (Err(QuantizeError::Transparent), Ok(bottom)) => GlyphCell::lower(bottom),
        _ => GlyphCell::BLANK,
    }
}
