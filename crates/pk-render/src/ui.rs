use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::canvas;
use crate::card::{Card, title_case};

/// Largeur de la liste des noms (bordure incluse).
pub const LIST_WIDTH: u16 = 24;

/// Hauteur de la barre de statut.
pub const STATUS_HEIGHT: u16 = 1;

/// Frames du spinner de chargement.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What the sprite panel shows.
#[derive(Clone, Copy, Debug)]
pub enum SpriteView<'a> {
    /// A rendered card.
    Card(&'a Card),
    /// The source could not provide the image.
    Unavailable {
        /// Record name.
        name: &'a str,
    },
    /// Nothing selected (empty page).
    Empty,
}

/// Everything the browser screen needs for one draw.
#[derive(Clone, Copy, Debug)]
pub struct BrowserView<'a> {
    /// Names on the current page.
    pub names: &'a [String],
    /// Selected index into `names`.
    pub selected: usize,
    /// Sprite panel content.
    pub sprite: SpriteView<'a>,
    /// Position in the dex, e.g. `21–40 / 151`.
    pub page_label: &'a str,
    /// `front` or `back`.
    pub side_label: &'a str,
    /// Last error, shown in the status bar.
    pub status: Option<&'a str>,
    /// A page load is in flight.
    pub loading: bool,
    /// Animation tick for the spinner.
    pub tick: usize,
    /// Help overlay visible.
    pub show_help: bool,
}

/// Split the screen into (list, sprite panel, status bar).
fn split(area: Rect) -> (Rect, Rect, Rect) {
    let [body, status] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(STATUS_HEIGHT)]).areas(area);
    let [list, main] =
        Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Min(4)]).areas(body);
    (list, main, status)
}

fn sprite_block(side_label: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" Sprite ({side_label}) "))
}

/// Zone disponible pour une carte (header + sprite) sur un écran `area`.
///
/// # Example
/// ```
/// use pk_render::ui::{LIST_WIDTH, sprite_area};
/// use ratatui::layout::Rect;
/// let inner = sprite_area(Rect::new(0, 0, 80, 24));
/// assert_eq!(inner.width, 80 - LIST_WIDTH - 2);
/// assert_eq!(inner.height, 24 - 1 - 2);
/// ```
#[must_use]
pub fn sprite_area(area: Rect) -> Rect {
    let (_, main, _) = split(area);
    sprite_block("").inner(main)
}

/// Draw the full browser: name list + sprite card + status bar.
pub fn draw(frame: &mut Frame, view: &BrowserView) {
    let area = frame.area();
    let (list_area, main_area, status_area) = split(area);

    draw_list(frame, list_area, view);

    let block = sprite_block(view.side_label);
    let inner = block.inner(main_area);
    frame.render_widget(block, main_area);
    draw_sprite(frame, inner, view);

    draw_status(frame, status_area, view);

    if view.show_help {
        draw_help_overlay(frame, area);
    }
}

fn draw_list(frame: &mut Frame, area: Rect, view: &BrowserView) {
    let items: Vec<ListItem> = view
        .names
        .iter()
        .map(|n| ListItem::new(title_case(n)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.page_label)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !view.names.is_empty() {
        state.select(Some(view.selected.min(view.names.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_sprite(frame: &mut Frame, area: Rect, view: &BrowserView) {
    match view.sprite {
        SpriteView::Card(card) => {
            let style = Style::default().add_modifier(Modifier::BOLD);
            canvas::render_card(frame.buffer_mut(), area, card, style);
        }
        SpriteView::Unavailable { name } => {
            let text = vec![
                Line::from(Span::styled(
                    title_case(name),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Image indisponible",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text), area);
        }
        SpriteView::Empty => {
            let msg = if view.loading { "" } else { "Aucun Pokémon" };
            frame.render_widget(
                Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, view: &BrowserView) {
    let mut spans = Vec::with_capacity(3);
    if view.loading {
        spans.push(Span::styled(
            format!("{} Chargement… ", SPINNER[view.tick % SPINNER.len()]),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(err) = view.status {
        spans.push(Span::styled(
            format!("{err} "),
            Style::default().fg(Color::Red),
        ));
    }
    spans.push(Span::styled(
        "? = aide",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay with all keybindings.
fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            " pokeglyph — Controls ",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(" q/Esc    Quit"),
        Line::from(" ↑/k ↓/j  Select"),
        Line::from(" ←/h      Previous page"),
        Line::from(" →/l      Next page"),
        Line::from(" b/Space  Front/back sprite"),
        Line::from(" r        Reload page"),
        Line::from(" Wheel    Select (if enabled)"),
        Line::from(" ?        Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_width = 34u16.min(area.width);
    let help_height = (help_text.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(help_width) / 2;
    let y = area.y + area.height.saturating_sub(help_height) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(help, help_area);
}
