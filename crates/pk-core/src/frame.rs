use crate::color::TermColor;
use crate::error::CoreError;

/// Glyphe demi-bloc supérieur : fg = pixel du haut, bg = pixel du bas.
pub const HALF_BLOCK: char = '▀';

/// Glyphe demi-bloc inférieur, pour une cellule dont seul le pixel du bas est visible.
pub const LOWER_HALF_BLOCK: char = '▄';

/// Buffer de pixels immuable une fois construit.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel, alpha non
/// prémultiplié.
///
/// # Example
/// ```
/// use pk_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferSize`] if `data` is not `width * height * 4` bytes long.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::FrameBuffer;
    /// assert!(FrameBuffer::from_rgba(1, 1, vec![1, 2, 3, 4]).is_ok());
    /// assert!(FrameBuffer::from_rgba(2, 1, vec![1, 2, 3, 4]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::BufferSize {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer rempli d'une seule couleur.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 3, (255, 0, 0, 255));
    /// assert_eq!(fb.pixel(1, 2), (255, 0, 0, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: (u8, u8, u8, u8)) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
        }
        fb
    }

    /// True when either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// Hors bornes : pixel transparent.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(px) => (px[0], px[1], px[2], px[3]),
            None => (0, 0, 0, 0),
        }
    }

    /// Écrit le pixel (x, y). Ignoré hors bornes.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
    }
}

/// Single cell of a rendered sprite.
///
/// # Example
/// ```
/// use pk_core::frame::GlyphCell;
/// let cell = GlyphCell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(!cell.is_styled());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Foreground color. `None` = terminal default.
    pub fg: Option<TermColor>,
    /// Background color. `None` = terminal default.
    pub bg: Option<TermColor>,
}

impl GlyphCell {
    /// Blank cell used for padding and unrenderable pixels.
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: None,
        bg: None,
    };

    /// Half-block cell: upper pixel in `fg`, lower pixel in `bg`.
    #[must_use]
    pub fn half_block(fg: TermColor, bg: TermColor) -> Self {
        Self {
            ch: HALF_BLOCK,
            fg: Some(fg),
            bg: Some(bg),
        }
    }

    /// Only the upper pixel is visible; the lower half keeps the terminal background.
    ///
    /// # Example
    /// ```
    /// use pk_core::color::TermColor;
    /// use pk_core::frame::{GlyphCell, HALF_BLOCK};
    /// let cell = GlyphCell::upper(TermColor::Rgb(255, 0, 0));
    /// assert_eq!(cell.ch, HALF_BLOCK);
    /// assert!(cell.bg.is_none());
    /// ```
    #[must_use]
    pub fn upper(fg: TermColor) -> Self {
        Self {
            ch: HALF_BLOCK,
            fg: Some(fg),
            bg: None,
        }
    }

    /// Only the lower pixel is visible, drawn with `▄`.
    #[must_use]
    pub fn lower(fg: TermColor) -> Self {
        Self {
            ch: LOWER_HALF_BLOCK,
            fg: Some(fg),
            bg: None,
        }
    }

    /// True if the cell carries any color.
    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.fg.is_some() || self.bg.is_some()
    }
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Grille de sortie du rendu. Toutes les lignes ont la même largeur.
///
/// # Example
/// ```
/// use pk_core::color::TermColor;
/// use pk_core::frame::{GlyphCell, GlyphGrid};
/// let mut grid = GlyphGrid::new(8, 2);
/// let red = TermColor::Rgb(255, 0, 0);
/// grid.set(0, 0, GlyphCell::half_block(red, red));
/// assert_eq!(grid.get(0, 0).fg, Some(red));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<GlyphCell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl GlyphGrid {
    /// Crée une grille de cellules vides.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::GlyphGrid;
    /// let grid = GlyphGrid::new(80, 24);
    /// assert_eq!(grid.cells.len(), 80 * 24);
    /// ```
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![GlyphCell::BLANK; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: GlyphCell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &GlyphCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows, top to bottom.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::GlyphGrid;
    /// let grid = GlyphGrid::new(3, 2);
    /// assert_eq!(grid.rows().count(), 2);
    /// assert!(grid.rows().all(|row| row.len() == 3));
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = &[GlyphCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// True when the grid holds no cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_roundtrip_through_set() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.set_pixel(2, 1, (10, 20, 30, 40));
        assert_eq!(fb.pixel(2, 1), (10, 20, 30, 40));
        assert_eq!(fb.pixel(1, 2), (0, 0, 0, 0));
    }

    #[test]
    fn set_pixel_out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(5, 5, (1, 1, 1, 1));
        assert!(fb.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = GlyphGrid::new(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn zero_sized_frame_is_empty() {
        assert!(FrameBuffer::new(0, 4).is_empty());
        assert!(!FrameBuffer::new(1, 1).is_empty());
    }
}
