/// TUI rendering module for pokeglyph.
///
/// Provides card composition (header + sprite), direct buffer drawing of
/// glyph grids, and the browser layout.
pub mod canvas;
pub mod card;
pub mod ui;

pub use card::Card;
