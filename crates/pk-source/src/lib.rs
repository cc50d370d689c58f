//! Data sources for pokeglyph: sprite decoding and Pokedex pages, from a
//! local folder or over HTTP.

pub mod http;
pub mod image;
pub mod local;

pub use http::HttpDex;
pub use local::LocalDex;
