use std::fmt::{self, Write};

use crossterm::Command;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use pk_core::color::TermColor;
use pk_core::frame::GlyphGrid;

/// Terminal color as a crossterm color.
///
/// Indices 0–15 map to the named ANSI colors, so they follow the terminal theme.
///
/// # Example
/// ```
/// use crossterm::style::Color;
/// use pk_core::color::TermColor;
/// use pk_glyph::ansi::to_crossterm;
/// assert_eq!(to_crossterm(TermColor::Rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
/// assert_eq!(to_crossterm(TermColor::Indexed(9)), Color::Red);
/// assert_eq!(to_crossterm(TermColor::Indexed(196)), Color::AnsiValue(196));
/// ```
#[must_use]
pub fn to_crossterm(color: TermColor) -> Color {
    match color {
        TermColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
        TermColor::Indexed(i) => match i {
            0 => Color::Black,
            1 => Color::DarkRed,
            2 => Color::DarkGreen,
            3 => Color::DarkYellow,
            4 => Color::DarkBlue,
            5 => Color::DarkMagenta,
            6 => Color::DarkCyan,
            7 => Color::Grey,
            8 => Color::DarkGrey,
            9 => Color::Red,
            10 => Color::Green,
            11 => Color::Yellow,
            12 => Color::Blue,
            13 => Color::Magenta,
            14 => Color::Cyan,
            15 => Color::White,
            _ => Color::AnsiValue(i),
        },
    }
}

/// Écrit la grille en séquences SGR, une ligne terminée par `\n` par rangée.
///
/// Colors are reset after every styled cell; blank cells are written bare.
///
/// # Errors
/// Propagates errors from the underlying writer.
pub fn write_ansi<W: Write>(out: &mut W, grid: &GlyphGrid) -> fmt::Result {
    if grid.width == 0 {
        for _ in 0..grid.height {
            out.write_char('\n')?;
        }
        return Ok(());
    }

    for row in grid.rows() {
        for cell in row {
            if let Some(fg) = cell.fg {
                SetForegroundColor(to_crossterm(fg)).write_ansi(out)?;
            }
            if let Some(bg) = cell.bg {
                SetBackgroundColor(to_crossterm(bg)).write_ansi(out)?;
            }
            out.write_char(cell.ch)?;
            if cell.is_styled() {
                ResetColor.write_ansi(out)?;
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// Grille encodée en une seule `String`.
///
/// # Example
/// ```
/// use pk_core::frame::GlyphGrid;
/// use pk_glyph::ansi::to_ansi_string;
/// let grid = GlyphGrid::new(3, 2);
/// assert_eq!(to_ansi_string(&grid), "   \n   \n");
/// ```
#[must_use]
pub fn to_ansi_string(grid: &GlyphGrid) -> String {
    let mut out = String::with_capacity(grid.cells.len() * 24 + usize::from(grid.height));
    // Writing into a String cannot fail.
    let _ = write_ansi(&mut out, grid);
    out
}

/// `Display` adapter over a grid.
///
/// # Example
/// ```
/// use pk_core::frame::GlyphGrid;
/// use pk_glyph::ansi::Ansi;
/// let grid = GlyphGrid::new(1, 1);
/// assert_eq!(Ansi(&grid).to_string(), " \n");
/// ```
pub struct Ansi<'a>(pub &'a GlyphGrid);

impl fmt::Display for Ansi<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ansi(f, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::frame::GlyphCell;

    #[test]
    fn styled_cell_sequence() {
        let mut grid = GlyphGrid::new(1, 1);
        grid.set(
            0,
            0,
            GlyphCell::half_block(TermColor::Rgb(255, 0, 0), TermColor::Indexed(21)),
        );
        let s = to_ansi_string(&grid);
        assert_eq!(s, "\x1b[38;2;255;0;0m\x1b[48;5;21m▀\x1b[0m\n");
    }

    #[test]
    fn padding_is_plain_spaces() {
        let mut grid = GlyphGrid::new(3, 1);
        grid.set(
            2,
            0,
            GlyphCell::half_block(TermColor::Indexed(9), TermColor::Indexed(1)),
        );
        let s = to_ansi_string(&grid);
        assert!(s.starts_with("  \x1b["));
        assert!(s.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn display_matches_string() {
        let mut grid = GlyphGrid::new(2, 2);
        grid.set(1, 1, GlyphCell::half_block(TermColor::Rgb(1, 1, 1), TermColor::Rgb(2, 2, 2)));
        assert_eq!(Ansi(&grid).to_string(), to_ansi_string(&grid));
    }
}
