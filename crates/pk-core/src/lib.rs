//! Shared types, traits, and configuration for pokeglyph.
//!
//! This crate holds everything the rendering core, the data source and the
//! terminal front-end agree on: pixel buffers, glyph grids, terminal colors,
//! Pokedex records and the user configuration.

pub mod color;
pub mod config;
pub mod dex;
pub mod error;
pub mod frame;
pub mod traits;

pub use color::TermColor;
pub use config::{ColorDepth, Config};
pub use dex::{DexPage, Pokemon, Side};
pub use error::{CoreError, QuantizeError, SourceError};
pub use frame::{FrameBuffer, GlyphCell, GlyphGrid};

/// Re-exports pour accès par chemin sémantique.
pub mod grid {
    pub use crate::frame::{GlyphCell, GlyphGrid, HALF_BLOCK, LOWER_HALF_BLOCK};
}
