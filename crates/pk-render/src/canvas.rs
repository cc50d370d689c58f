use pk_core::color::TermColor;
use pk_core::frame::GlyphGrid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::card::Card;

/// Terminal color as a ratatui color.
///
/// # Example
/// ```
/// use pk_core::color::TermColor;
/// use pk_render::canvas::to_ratatui;
/// use ratatui::style::Color;
/// assert_eq!(to_ratatui(TermColor::Indexed(42)), Color::Indexed(42));
/// ```
#[must_use]
pub fn to_ratatui(color: TermColor) -> Color {
    match color {
        TermColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
        TermColor::Indexed(i) => Color::Indexed(i),
    }
}

/// Écrit directement une `GlyphGrid` dans un `ratatui::Buffer`.
///
/// Pas de widget intermédiaire. Cells outside `area` are clipped; blank
/// cells keep the terminal default colors.
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &GlyphGrid) {
    for cy in 0..grid.height.min(area.height) {
        for cx in 0..grid.width.min(area.width) {
            let cell = grid.get(cx, cy);
            if let Some(buf_cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                buf_cell.set_char(cell.ch);
                buf_cell.set_fg(cell.fg.map_or(Color::Reset, to_ratatui));
                buf_cell.set_bg(cell.bg.map_or(Color::Reset, to_ratatui));
            }
        }
    }
}

/// Draw a card: header on the first line, sprite below.
pub fn render_card(buf: &mut Buffer, area: Rect, card: &Card, header_style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_stringn(
        area.x,
        area.y,
        &card.header,
        usize::from(area.width),
        header_style,
    );
    let sprite_area = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    render_grid(buf, sprite_area, &card.grid);
}
