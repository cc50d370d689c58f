use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Nom du fichier de configuration dans le répertoire personnel.
pub const CONFIG_FILE_NAME: &str = ".pokeglyph.toml";

/// Configuration complète, hot-rechargeable.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use pk_core::config::Config;
/// let config = Config::default();
/// assert!(!config.settings.enable_logging);
/// assert!(config.settings.enable_mousewheel);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Comportement de l'application.
    pub settings: Settings,
    /// Paramètres du rendu des sprites.
    pub render: RenderSettings,
}

/// `[settings]` section.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    /// Écrire les logs dans `debug.log`.
    pub enable_logging: bool,
    /// Capturer la souris pour la molette.
    pub enable_mousewheel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_logging: false,
            enable_mousewheel: true,
        }
    }
}

/// `[render]` section.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderSettings {
    /// Profondeur de couleur du terminal.
    pub color_depth: ColorDepth,
    /// Afficher le sprite de dos au démarrage.
    pub show_back: bool,
    /// Largeur maximale d'une carte, en cellules.
    pub max_width: u16,
    /// Hauteur maximale d'une carte, en lignes.
    pub max_height: u16,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            color_depth: ColorDepth::TrueColor,
            show_back: false,
            max_width: 64,
            max_height: 32,
        }
    }
}

/// Terminal color capability.
///
/// # Example
/// ```
/// use pk_core::config::ColorDepth;
/// let depth: ColorDepth = "256".parse().unwrap();
/// assert_eq!(depth, ColorDepth::Ansi256);
/// assert_eq!(ColorDepth::default(), ColorDepth::TrueColor);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ColorDepth {
    /// 24-bit RGB.
    #[default]
    TrueColor,
    /// xterm 256-color palette.
    Ansi256,
    /// The 16 classic ANSI colors.
    Ansi16,
}

impl FromStr for ColorDepth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Ok(Self::TrueColor),
            "ansi256" | "256" => Ok(Self::Ansi256),
            "ansi16" | "16" => Ok(Self::Ansi16),
            other => Err(CoreError::Config(format!(
                "profondeur de couleur inconnue '{other}' (truecolor, 256, 16)"
            ))),
        }
    }
}

impl Config {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.render.max_width = self.render.max_width.clamp(1, 512);
        self.render.max_height = self.render.max_height.clamp(3, 256);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    settings: Option<SettingsSection>,
    render: Option<RenderSection>,
}

#[derive(Deserialize)]
struct SettingsSection {
    enable_logging: Option<bool>,
    enable_mousewheel: Option<bool>,
}

#[derive(Deserialize)]
struct RenderSection {
    color_depth: Option<ColorDepth>,
    show_back: Option<bool>,
    max_width: Option<u16>,
    max_height: Option<u16>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use pk_core::config::{parse_config, ColorDepth};
/// let config = parse_config("[render]\ncolor_depth = \"Ansi16\"\n").unwrap();
/// assert_eq!(config.render.color_depth, ColorDepth::Ansi16);
/// assert!(config.settings.enable_mousewheel);
/// ```
pub fn parse_config(content: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = Config::default();

    if let Some(s) = file.settings {
        if let Some(v) = s.enable_logging {
            config.settings.enable_logging = v;
        }
        if let Some(v) = s.enable_mousewheel {
            config.settings.enable_mousewheel = v;
        }
    }

    if let Some(r) = file.render {
        if let Some(v) = r.color_depth {
            config.render.color_depth = v;
        }
        if let Some(v) = r.show_back {
            config.render.show_back = v;
        }
        if let Some(v) = r.max_width {
            config.render.max_width = v;
        }
        if let Some(v) = r.max_height {
            config.render.max_height = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

/// Écrit la configuration par défaut dans `path`.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_default(path: &Path) -> Result<()> {
    let content =
        toml::to_string_pretty(&Config::default()).context("Sérialisation de la config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

/// Provenance of a config returned by [`load_or_create`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Le fichier existait.
    Loaded,
    /// Le fichier manquait et vient d'être écrit avec les défauts.
    Created,
}

/// Charge la config, en la créant avec les défauts si elle n'existe pas encore.
///
/// Nothing is logged here: the caller reports the origin once its logger is up.
///
/// # Errors
/// Returns an error if the file cannot be created, read or parsed.
pub fn load_or_create(path: &Path) -> Result<(Config, ConfigOrigin)> {
    let origin = if path.exists() {
        ConfigOrigin::Loaded
    } else {
        write_default(path)?;
        ConfigOrigin::Created
    };
    Ok((load_config(path)?, origin))
}

/// `~/.pokeglyph.toml`, or `None` when no home directory is known.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let config = parse_config(
            "[settings]\nenable_logging = true\n\n[render]\nshow_back = true\nmax_width = 0\n",
        )
        .unwrap();
        assert!(config.settings.enable_logging);
        assert!(config.settings.enable_mousewheel);
        assert!(config.render.show_back);
        assert_eq!(config.render.max_width, 1);
        assert_eq!(config.render.color_depth, ColorDepth::TrueColor);
    }

    #[test]
    fn unknown_depth_is_rejected() {
        assert!(parse_config("[render]\ncolor_depth = \"Sepia\"\n").is_err());
        assert!("sepia".parse::<ColorDepth>().is_err());
    }

    #[test]
    fn load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let (first, origin) = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first, Config::default());
        assert_eq!(origin, ConfigOrigin::Created);

        std::fs::write(&path, "[render]\ncolor_depth = \"Ansi256\"\n").unwrap();
        let (second, origin) = load_or_create(&path).unwrap();
        assert_eq!(second.render.color_depth, ColorDepth::Ansi256);
        assert_eq!(origin, ConfigOrigin::Loaded);
    }

    #[test]
    fn default_roundtrips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&text).unwrap(), Config::default());
    }
}
