use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use pk_core::config::{ColorDepth, Config};
use pk_core::dex::Side;
use pk_glyph::SpriteRenderer;
use pk_render::Card;
use pk_render::ui::{self, BrowserView, SpriteView};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::nav::Navigator;
use crate::pipeline::{LoadResponse, Loader, SpritePair};

/// Période de rafraîchissement (spinner, reload config, resize).
const TICK: Duration = Duration::from_millis(80);

/// Application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Navigation normale.
    Running,
    /// Overlay d'aide affiché (touche ?).
    Help,
    /// Fermeture au prochain tour de boucle.
    Quitting,
}

/// Everything that decides what the cached card looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CardKey {
    index: usize,
    side: Side,
    width: u16,
    height: u16,
    depth: ColorDepth,
}

/// Main application struct holding all state.
pub struct App {
    pub state: AppState,
    /// Config courante (hot-reload via arc-swap).
    pub config: Arc<ArcSwap<Config>>,
    loader: Loader,
    nav: Navigator,
    names: Vec<String>,
    sprites: Vec<SpritePair>,
    renderer: SpriteRenderer,
    card: Option<(CardKey, Option<Card>)>,
    loading: bool,
    status: Option<String>,
    tick: usize,
}

impl App {
    /// Create the app and request the first page.
    #[must_use]
    pub fn new(config: Arc<ArcSwap<Config>>, mut loader: Loader, side: Side) -> Self {
        let depth = config.load().render.color_depth;
        loader.request(None);
        Self {
            state: AppState::Running,
            config,
            loader,
            nav: Navigator::new(side),
            names: Vec::new(),
            sprites: Vec::new(),
            renderer: SpriteRenderer::new(depth),
            card: None,
            loading: true,
            status: None,
            tick: 0,
        }
    }

    /// Main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            if self.state == AppState::Quitting {
                break;
            }

            // === Événements (bloquant au plus un tick) ===
            if event::poll(TICK)? {
                self.handle_event(&event::read()?);
                while event::poll(Duration::ZERO)? {
                    self.handle_event(&event::read()?);
                }
            }

            // === Réponses du worker ===
            while let Some(resp) = self.loader.try_recv() {
                self.apply(resp);
            }

            self.tick = self.tick.wrapping_add(1);

            // === Rendu ===
            let (w, h) = crossterm::terminal::size()?;
            self.refresh_card(Rect::new(0, 0, w, h));

            let page_label = self.nav.page_label();
            let side_label = side_label(self.nav.side());
            let view = self.view(&page_label, side_label);
            terminal.draw(|frame| ui::draw(frame, &view))?;
        }
        Ok(())
    }

    fn view<'a>(&'a self, page_label: &'a str, side_label: &'a str) -> BrowserView<'a> {
        BrowserView {
            names: &self.names,
            selected: self.nav.selected(),
            sprite: self.sprite_view(),
            page_label,
            side_label,
            status: self.status.as_deref(),
            loading: self.loading,
            tick: self.tick,
            show_help: self.state == AppState::Help,
        }
    }

    fn sprite_view(&self) -> SpriteView<'_> {
        let Some(pokemon) = self.nav.selected_pokemon() else {
            return SpriteView::Empty;
        };
        match &self.card {
            Some((_, Some(card))) => SpriteView::Card(card),
            _ => SpriteView::Unavailable {
                name: &pokemon.name,
            },
        }
    }

    /// Apply a worker response.
    pub fn apply(&mut self, resp: LoadResponse) {
        match resp {
            LoadResponse::PageLoaded {
                reference,
                page,
                sprites,
                ..
            } => {
                self.nav.set_page(reference, page);
                self.names = self.nav.names();
                self.sprites = sprites;
                self.card = None;
                self.status = None;
            }
            LoadResponse::LoadFailed { message, .. } => {
                self.status = Some(message);
            }
        }
        self.loading = false;
    }

    /// Re-render the selected sprite if anything it depends on changed.
    fn refresh_card(&mut self, screen: Rect) {
        let config = self.config.load();
        self.renderer.update_if_needed(config.render.color_depth);

        let inner = ui::sprite_area(screen);
        let width = inner.width.min(config.render.max_width);
        // Une ligne pour le header.
        let height = inner.height.saturating_sub(1).min(config.render.max_height);
        drop(config);

        let key = CardKey {
            index: self.nav.selected(),
            side: self.nav.side(),
            width,
            height,
            depth: self.renderer.depth(),
        };
        if self.card.as_ref().is_some_and(|(k, _)| *k == key) {
            return;
        }

        let card = self.render_selected(width, height);
        self.card = Some((key, card));
    }

    fn render_selected(&mut self, width: u16, height: u16) -> Option<Card> {
        let pokemon = self.nav.selected_pokemon()?;
        let frame = self
            .sprites
            .get(self.nav.selected())?
            .get(self.nav.side())?;
        if width == 0 || height == 0 {
            return None;
        }
        match self.renderer.render(frame, width, height) {
            Ok(grid) => Some(Card::for_pokemon(pokemon, grid)),
            Err(e) => {
                log::warn!("Rendu de {} impossible : {e}", pokemon.name);
                None
            }
        }
    }

    fn request(&mut self, page: Option<String>) {
        self.loader.request(page);
        self.loading = true;
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Mouse(MouseEvent { kind, .. }) => self.handle_mouse(kind),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.state == AppState::Help {
            match code {
                KeyCode::Char('?') | KeyCode::Esc => self.state = AppState::Running,
                KeyCode::Char('q') => self.state = AppState::Quitting,
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(prev) = self.nav.previous_page().map(String::from) {
                    self.request(Some(prev));
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(next) = self.nav.next_page().map(String::from) {
                    self.request(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.nav.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.nav.select_next();
            }
            KeyCode::Char('b' | ' ') => self.nav.toggle_side(),
            KeyCode::Char('r') => {
                let current = self.nav.reference().map(String::from);
                self.request(current);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, kind: MouseEventKind) {
        if !self.config.load().settings.enable_mousewheel {
            return;
        }
        match kind {
            MouseEventKind::ScrollDown => {
                self.nav.select_next();
            }
            MouseEventKind::ScrollUp => {
                self.nav.select_previous();
            }
            _ => {}
        }
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Front => "front",
        Side::Back => "back",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::spawn_loader;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use pk_core::dex::{DexPage, Pokemon, Sprites};
    use pk_core::error::SourceError;
    use pk_core::frame::FrameBuffer;
    use pk_core::traits::DexSource;

    struct TwoPages;

    impl DexSource for TwoPages {
        fn fetch_page(&self, reference: Option<&str>) -> Result<DexPage, SourceError> {
            let (ids, next, previous) = match reference {
                None => ([1, 2], Some("p2".to_string()), None),
                Some("p2") => ([3, 4], None, Some("p1".to_string())),
                Some(r) => {
                    return Err(SourceError::PageNotFound {
                        reference: r.into(),
                    });
                }
            };
            Ok(DexPage {
                count: 4,
                next,
                previous,
                results: ids
                    .iter()
                    .map(|&id| Pokemon {
                        id,
                        name: format!("mon-{id}"),
                        sprites: Sprites {
                            front_default: Some("red".into()),
                            back_default: (id % 2 == 0).then(|| "blue".into()),
                        },
                        ..Pokemon::default()
                    })
                    .collect(),
            })
        }

        fn load_sprite(&self, reference: &str) -> Result<FrameBuffer, SourceError> {
            match reference {
                "red" => Ok(FrameBuffer::filled(8, 8, (255, 0, 0, 255))),
                "blue" => Ok(FrameBuffer::filled(8, 8, (0, 0, 255, 255))),
                _ => Err(SourceError::SpriteUnavailable {
                    reference: reference.into(),
                }),
            }
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn loaded_app() -> App {
        let config = Arc::new(ArcSwap::from_pointee(Config::default()));
        let loader = spawn_loader(TwoPages).unwrap();
        let mut app = App::new(config, loader, Side::Front);
        wait(&mut app);
        app
    }

    fn wait(app: &mut App) {
        let resp = app
            .loader
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        app.apply(resp);
    }

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn first_page_renders_a_card() {
        let mut app = loaded_app();
        assert!(!app.loading);
        assert_eq!(app.names, vec!["mon-1", "mon-2"]);

        app.refresh_card(SCREEN);
        let SpriteView::Card(card) = app.sprite_view() else {
            panic!("expected a card");
        };
        assert!(card.header.starts_with("Mon-1"));
        assert!(card.grid.cells.iter().any(|c| c.is_styled()));
    }

    #[test]
    fn missing_back_sprite_shows_placeholder() {
        let mut app = loaded_app();
        app.handle_event(&key(KeyCode::Char('b')));
        app.refresh_card(SCREEN);
        assert!(matches!(
            app.sprite_view(),
            SpriteView::Unavailable { name: "mon-1" }
        ));

        app.handle_event(&key(KeyCode::Down));
        app.refresh_card(SCREEN);
        assert!(matches!(app.sprite_view(), SpriteView::Card(_)));
    }

    #[test]
    fn paging_requests_next_and_previous() {
        let mut app = loaded_app();
        app.handle_event(&key(KeyCode::Left));
        assert!(!app.loading);

        app.handle_event(&key(KeyCode::Char('l')));
        assert!(app.loading);
        wait(&mut app);
        assert_eq!(app.names, vec!["mon-3", "mon-4"]);
        assert_eq!(app.nav.page_label(), "#3–#4 / 4");

        app.handle_event(&key(KeyCode::Char('h')));
        wait(&mut app);
        assert!(app.status.is_some());
        assert_eq!(app.names, vec!["mon-3", "mon-4"]);
    }

    #[test]
    fn card_follows_color_depth_reload() {
        let mut app = loaded_app();
        app.refresh_card(SCREEN);
        let before = app.card.as_ref().map(|(k, _)| k.depth);

        let mut cfg = (**app.config.load()).clone();
        cfg.render.color_depth = ColorDepth::Ansi16;
        app.config.store(Arc::new(cfg));
        app.refresh_card(SCREEN);

        assert_eq!(before, Some(ColorDepth::TrueColor));
        assert_eq!(app.card.as_ref().map(|(k, _)| k.depth), Some(ColorDepth::Ansi16));
    }

    #[test]
    fn card_respects_max_dimensions() {
        let mut app = loaded_app();
        let mut cfg = (**app.config.load()).clone();
        cfg.render.max_width = 10;
        cfg.render.max_height = 6;
        app.config.store(Arc::new(cfg));
        app.refresh_card(SCREEN);

        let SpriteView::Card(card) = app.sprite_view() else {
            panic!("expected a card");
        };
        assert!(card.width() <= 10);
        assert!(card.height() <= 7);
    }

    #[test]
    fn help_and_quit_keys() {
        let mut app = loaded_app();
        app.handle_event(&key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Help);
        app.handle_event(&key(KeyCode::Down));
        assert_eq!(app.nav.selected(), 0);
        app.handle_event(&key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Running);
        app.handle_event(&key(KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn wheel_obeys_setting() {
        let mut app = loaded_app();
        app.handle_event(&wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.nav.selected(), 1);

        let mut cfg = (**app.config.load()).clone();
        cfg.settings.enable_mousewheel = false;
        app.config.store(Arc::new(cfg));
        app.handle_event(&wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.nav.selected(), 1);
    }
}
