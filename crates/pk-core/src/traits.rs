use crate::color::TermColor;
use crate::dex::DexPage;
use crate::error::{QuantizeError, SourceError};
use crate::frame::FrameBuffer;

/// Convertit un pixel RGBA en couleur terminal discrète.
///
/// Implémenté par : `TrueColor`, `Ansi256`, `Ansi16` (crate `pk-glyph`).
/// Le packer demi-bloc ne connaît que ce trait.
///
/// # Example
/// ```
/// use pk_core::traits::ColorQuantizer;
/// use pk_core::color::TermColor;
/// use pk_core::error::QuantizeError;
///
/// struct Gray;
/// impl ColorQuantizer for Gray {
///     fn quantize(&self, r: u8, g: u8, b: u8, a: u8) -> Result<TermColor, QuantizeError> {
///         if a == 0 {
///             return Err(QuantizeError::Transparent);
///         }
///         let v = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
///         Ok(TermColor::Rgb(v, v, v))
///     }
///     fn name(&self) -> &'static str { "gray" }
/// }
/// assert_eq!(Gray.quantize(30, 60, 90, 255).unwrap(), TermColor::Rgb(60, 60, 60));
/// ```
pub trait ColorQuantizer: Send + Sync {
    /// Nearest representable color for a straight-alpha RGBA sample.
    ///
    /// CONTRAT : déterministe, sans effet de bord.
    ///
    /// # Errors
    /// Returns an error when the sample has no color to represent.
    fn quantize(&self, r: u8, g: u8, b: u8, a: u8) -> Result<TermColor, QuantizeError>;

    /// Nom lisible pour le debug/UI.
    fn name(&self) -> &'static str;
}

/// Fournit des pages de Pokémon et leurs sprites.
///
/// # Example
/// ```
/// use pk_core::traits::DexSource;
/// use pk_core::dex::DexPage;
/// use pk_core::error::SourceError;
/// use pk_core::frame::FrameBuffer;
///
/// struct Empty;
/// impl DexSource for Empty {
///     fn fetch_page(&self, _reference: Option<&str>) -> Result<DexPage, SourceError> {
///         Ok(DexPage::default())
///     }
///     fn load_sprite(&self, reference: &str) -> Result<FrameBuffer, SourceError> {
///         Err(SourceError::SpriteUnavailable { reference: reference.into() })
///     }
/// }
/// assert!(Empty.fetch_page(None).unwrap().results.is_empty());
/// ```
pub trait DexSource: Send + 'static {
    /// Charge une page. `None` = première page.
    ///
    /// # Errors
    /// Returns an error if the page does not exist or cannot be parsed.
    fn fetch_page(&self, reference: Option<&str>) -> Result<DexPage, SourceError>;

    /// Charge et décode un sprite.
    ///
    /// # Errors
    /// Returns [`SourceError::SpriteUnavailable`] if the image cannot be produced.
    fn load_sprite(&self, reference: &str) -> Result<FrameBuffer, SourceError>;
}
