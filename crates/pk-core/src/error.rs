use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match its declared dimensions.
    #[error("Buffer de pixels incohérent : {len} octets pour {width}×{height}")]
    BufferSize {
        /// Actual byte length.
        len: usize,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
}

/// A pixel that has no representable terminal color.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeError {
    /// Alpha is zero: the pixel carries no color at all. The packer leaves
    /// that half of the cell at the terminal default.
    #[error("Pixel entièrement transparent")]
    Transparent,
}

/// Errors surfaced by a Pokedex data source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The requested page reference does not resolve to anything.
    #[error("Page introuvable : {reference}")]
    PageNotFound {
        /// Page reference as given by the caller.
        reference: String,
    },

    /// The page exists but could not be parsed.
    #[error("Page illisible {reference} : {reason}")]
    MalformedPage {
        /// Page reference.
        reference: String,
        /// Parser message.
        reason: String,
    },

    /// The sprite could not be fetched or decoded. Callers render a
    /// placeholder instead of invoking the glyph renderer.
    #[error("Sprite indisponible : {reference}")]
    SpriteUnavailable {
        /// Sprite reference.
        reference: String,
    },

    /// The remote server could not be reached or answered with an error status.
    #[error("Requête échouée {reference} : {reason}")]
    Http {
        /// Requested URL.
        reference: String,
        /// Status or transport message.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// True when the error only concerns a sprite image.
    #[must_use]
    pub fn is_sprite_unavailable(&self) -> bool {
        matches!(self, Self::SpriteUnavailable { .. })
    }
}
