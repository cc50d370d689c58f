use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::Parser;
use pk_core::config::{Config, ConfigOrigin};
use pk_core::dex::Side;
use pk_core::traits::DexSource;

pub mod app;
pub mod cli;
pub mod hotreload;
pub mod nav;
pub mod pipeline;

/// Dimensions par défaut du mode `--image`.
const DEFAULT_WIDTH: u16 = 40;
const DEFAULT_HEIGHT: u16 = 20;

/// Fichier de log quand `enable_logging` est actif.
const LOG_FILE: &str = "debug.log";

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();
    cli.validate()?;

    // 2. Charger la config (avant le logger : enable_logging en dépend)
    let config_path = cli.config.clone().or_else(pk_core::config::default_config_path);
    let (mut config, origin) = resolve_config(config_path.as_deref())?;

    // 3. Initialiser le logging, puis rapporter le chargement de la config
    init_logging(&cli, &config)?;
    report_config(config_path.as_deref(), origin);

    // 4. Appliquer les overrides CLI
    if let Some(depth) = cli.color_depth {
        config.render.color_depth = depth;
    }
    if cli.back {
        config.render.show_back = true;
    }

    if let Some(ref path) = cli.image {
        return render_image(path, &cli, &config);
    }

    let Some(ref dex) = cli.dex else {
        anyhow::bail!("Aucune source spécifiée. Utilisez --dex ou --image.");
    };
    if pk_source::http::is_url(dex) {
        log::info!("Dex distant : {dex}");
        run_browser(pk_source::HttpDex::new(dex), config, config_path.as_deref())
    } else {
        let source = pk_source::LocalDex::open(Path::new(dex))
            .with_context(|| format!("Dex illisible : {dex}"))?;
        run_browser(source, config, config_path.as_deref())
    }
}

/// Logs vers `debug.log` si demandé ; sinon stderr, coupé en mode TUI.
fn init_logging(cli: &cli::Cli, config: &Config) -> Result<()> {
    let level = cli.log_level;
    let mut builder = env_logger::Builder::new();
    if config.settings.enable_logging {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_FILE)
            .with_context(|| format!("Impossible d'ouvrir {LOG_FILE}"))?;
        builder
            .filter_level(level)
            .target(env_logger::Target::Pipe(Box::new(file)));
    } else if cli.dex.is_some() {
        builder.filter_level(log::LevelFilter::Off);
    } else {
        builder.filter_level(level);
    }
    builder.init();
    Ok(())
}

/// Resolve config: explicit or home file, created with defaults when missing.
/// `None` origin means no file at all.
fn resolve_config(path: Option<&Path>) -> Result<(Config, Option<ConfigOrigin>)> {
    match path {
        Some(path) => {
            let (config, origin) = pk_core::config::load_or_create(path)?;
            Ok((config, Some(origin)))
        }
        None => Ok((Config::default(), None)),
    }
}

fn report_config(path: Option<&Path>, origin: Option<ConfigOrigin>) {
    match (path, origin) {
        (Some(path), Some(ConfigOrigin::Created)) => {
            log::info!("Config par défaut créée : {}", path.display());
        }
        (Some(path), Some(ConfigOrigin::Loaded)) => {
            log::info!("Config chargée : {}", path.display());
        }
        _ => log::warn!("Aucun répertoire personnel connu. Utilisation des défauts."),
    }
}

/// Mode `--image` : une carte ANSI sur stdout.
fn render_image(path: &Path, cli: &cli::Cli, config: &Config) -> Result<()> {
    let frame = pk_source::image::load_image(path)?;
    let width = cli.width.unwrap_or(DEFAULT_WIDTH);
    let height = cli.height.unwrap_or(DEFAULT_HEIGHT);

    let mut renderer = pk_glyph::SpriteRenderer::new(config.render.color_depth);
    let grid = renderer
        .render(&frame, width, height)
        .with_context(|| format!("Rendu impossible : {}", path.display()))?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let card = pk_render::Card::new(&name, None, grid);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(card.to_ansi().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Mode `--dex` : navigateur interactif.
fn run_browser<S: DexSource>(source: S, config: Config, config_path: Option<&Path>) -> Result<()> {
    let loader = pipeline::spawn_loader(source)?;

    let side = if config.render.show_back {
        Side::Back
    } else {
        Side::Front
    };
    let mouse = config.settings.enable_mousewheel;
    let config = Arc::new(ArcSwap::from_pointee(config));

    // Hot-reload config (thread interne notify)
    let _watcher = match config_path {
        Some(path) => Some(hotreload::spawn_config_watcher(path, &config)?),
        None => None,
    };

    let mut app_instance = app::App::new(config, loader, side);

    let terminal = ratatui::init();
    if mouse {
        crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
    }

    let result = app_instance.run(terminal);

    // Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    if mouse {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    }
    ratatui::restore();

    result
}
