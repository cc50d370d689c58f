use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use pk_core::config::ColorDepth;

/// pokeglyph — Pokedex de terminal en demi-blocs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dex à parcourir : dossier local (pages JSON ou images) ou URL de la
    /// première page.
    #[arg(long, value_name = "DIR|URL")]
    pub dex: Option<String>,

    /// Rendre une seule image sur stdout puis quitter.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Largeur du rendu en cellules (mode --image). Défaut : 40.
    #[arg(long)]
    pub width: Option<u16>,

    /// Hauteur du rendu en lignes (mode --image). Défaut : 20.
    #[arg(long)]
    pub height: Option<u16>,

    /// Profondeur de couleur : truecolor, 256, 16.
    #[arg(long)]
    pub color_depth: Option<ColorDepth>,

    /// Démarrer sur les sprites de dos.
    #[arg(long, default_value_t = false)]
    pub back: bool,

    /// Fichier de configuration TOML. Défaut : ~/.pokeglyph.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Validate that exactly one mode is selected.
    ///
    /// # Errors
    /// Returns an error if neither or both of `--dex` and `--image` are given,
    /// or if a dimension is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.dex, &self.image) {
            (None, None) => anyhow::bail!("Aucune source spécifiée. Utilisez --dex ou --image."),
            (Some(_), Some(_)) => {
                anyhow::bail!("Un seul mode à la fois : --dex OU --image.")
            }
            _ => {}
        }
        if self.width == Some(0) || self.height == Some(0) {
            anyhow::bail!("--width et --height doivent être ≥ 1.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pokeglyph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn dex_mode_is_valid() {
        let cli = parse(&["--dex", "dex", "--back"]);
        assert!(cli.validate().is_ok());
        assert!(cli.back);
        assert_eq!(cli.log_level, LevelFilter::Warn);
    }

    #[test]
    fn dex_accepts_a_url() {
        let cli = parse(&["--dex", "https://pokeapi.co/api/v2/pokemon"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.dex.as_deref(), Some("https://pokeapi.co/api/v2/pokemon"));
    }

    #[test]
    fn bad_log_level_is_a_usage_error() {
        let args = ["pokeglyph", "--image", "i.png", "--log-level", "loud"];
        assert!(Cli::try_parse_from(args).is_err());
        let cli = parse(&["--image", "i.png", "--log-level", "DEBUG"]);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn color_depth_is_parsed_up_front() {
        let cli = parse(&["--image", "i.png", "--color-depth", "256"]);
        assert_eq!(cli.color_depth, Some(ColorDepth::Ansi256));
        let args = ["pokeglyph", "--image", "i.png", "--color-depth", "sepia"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn image_mode_takes_dimensions() {
        let cli = parse(&["--image", "mew.png", "--width", "30", "--height", "12"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.width, Some(30));
        assert_eq!(cli.height, Some(12));
    }

    #[test]
    fn exactly_one_mode_required() {
        assert!(parse(&[]).validate().is_err());
        assert!(parse(&["--dex", "d", "--image", "i.png"]).validate().is_err());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(parse(&["--image", "i.png", "--width", "0"]).validate().is_err());
    }
}
