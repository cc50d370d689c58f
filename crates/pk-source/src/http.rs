use std::io::Read;
use std::time::Duration;

use pk_core::dex::DexPage;
use pk_core::error::SourceError;
use pk_core::frame::FrameBuffer;
use pk_core::traits::DexSource;

use crate::image::decode_image;

/// Taille maximale d'un corps de réponse (page ou sprite).
pub const MAX_BODY_BYTES: u64 = 8 * 1024 * 1024;

/// Timeout par défaut des requêtes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// True for an `http://` or `https://` reference.
///
/// # Example
/// ```
/// use pk_source::http::is_url;
/// assert!(is_url("https://pokeapi.co/api/v2/pokemon"));
/// assert!(!is_url("dex/index.json"));
/// ```
#[must_use]
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Resolve `reference` against the URL of the first page.
///
/// Absolute URLs are kept, `/path` is taken from the origin, anything else
/// is relative to the directory of `base`.
///
/// # Example
/// ```
/// use pk_source::http::join_url;
/// let base = "https://dex.example/api/pages/1.json";
/// assert_eq!(join_url(base, "2.json"), "https://dex.example/api/pages/2.json");
/// assert_eq!(join_url(base, "/img/1.png"), "https://dex.example/img/1.png");
/// assert_eq!(join_url(base, "http://cdn.example/1.png"), "http://cdn.example/1.png");
/// ```
#[must_use]
pub fn join_url(base: &str, reference: &str) -> String {
    if is_url(reference) {
        return reference.to_string();
    }
    let host_start = base.find("://").map_or(0, |i| i + 3);
    if let Some(path) = reference.strip_prefix('/') {
        let origin_end = base[host_start..]
            .find('/')
            .map_or(base.len(), |i| host_start + i);
        return format!("{}/{path}", &base[..origin_end]);
    }
    match base[host_start..].rfind('/') {
        Some(i) => format!("{}{reference}", &base[..=host_start + i]),
        None => format!("{base}/{reference}"),
    }
}

/// GET-only transport. Implemented over `ureq` and by in-memory stubs.
pub trait Transport: Send + Sync + 'static {
    /// Fetch the body at `url`.
    ///
    /// # Errors
    /// Returns [`SourceError::Http`] on a network failure or an error status.
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Blocking HTTP client.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("pokeglyph/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let http_err = |reason: String| SourceError::Http {
            reference: url.to_string(),
            reason,
        };
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(http_err(format!("HTTP {code}"))),
            Err(ureq::Error::Transport(t)) => return Err(http_err(t.to_string())),
        };
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut body)?;
        log::debug!("GET {url} : {} octets", body.len());
        Ok(body)
    }
}

/// Source Pokedex distante : pages JSON au format PokeAPI, sprites en PNG.
///
/// `next`/`previous` and sprite references may be absolute URLs or relative
/// to the first page.
///
/// # Example
/// ```no_run
/// use pk_core::traits::DexSource;
/// use pk_source::HttpDex;
///
/// let dex = HttpDex::new("https://dex.example/api/pokemon.json");
/// let page = dex.fetch_page(None).unwrap();
/// println!("{} Pokémon", page.count);
/// ```
pub struct HttpDex<T: Transport = UreqTransport> {
    first: String,
    transport: T,
}

impl HttpDex<UreqTransport> {
    /// Source over the real network, starting at `first_page`.
    #[must_use]
    pub fn new(first_page: &str) -> Self {
        Self::with_transport(first_page, UreqTransport::default())
    }
}

impl<T: Transport> HttpDex<T> {
    #[must_use]
    pub fn with_transport(first_page: &str, transport: T) -> Self {
        Self {
            first: first_page.to_string(),
            transport,
        }
    }

    /// URL of the first page.
    #[must_use]
    pub fn first_page(&self) -> &str {
        &self.first
    }
}

impl<T: Transport> DexSource for HttpDex<T> {
    fn fetch_page(&self, reference: Option<&str>) -> Result<DexPage, SourceError> {
        let url = join_url(&self.first, reference.unwrap_or(&self.first));
        let body = self.transport.get(&url)?;
        serde_json::from_slice(&body).map_err(|e| SourceError::MalformedPage {
            reference: url,
            reason: e.to_string(),
        })
    }

    fn load_sprite(&self, reference: &str) -> Result<FrameBuffer, SourceError> {
        let url = join_url(&self.first, reference);
        let unavailable = || SourceError::SpriteUnavailable {
            reference: url.clone(),
        };
        let body = self.transport.get(&url).map_err(|e| {
            log::warn!("Sprite indisponible {url} : {e}");
            unavailable()
        })?;
        match decode_image(&body) {
            Ok(frame) if !frame.is_empty() => Ok(frame),
            Ok(_) => {
                log::warn!("Sprite vide : {url}");
                Err(unavailable())
            }
            Err(e) => {
                log::warn!("Sprite illisible {url} : {e:#}");
                Err(unavailable())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::io::Cursor;

    const BASE: &str = "https://dex.example/api/pokemon.json";

    struct Canned(HashMap<String, Vec<u8>>);

    impl Transport for Canned {
        fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.0.get(url).cloned().ok_or_else(|| SourceError::Http {
                reference: url.to_string(),
                reason: "HTTP 404".into(),
            })
        }
    }

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([30, 200, 90, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    const FIRST: &str = r#"{
        "count": 2,
        "next": "https://dex.example/api/pokemon-2.json",
        "previous": null,
        "results": [{
            "id": 1,
            "name": "bulbasaur",
            "sprites": {
                "front_default": "https://raw.example/sprites/1.png",
                "back_default": "https://raw.example/sprites/back/1.png"
            },
            "stats": [{ "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "https://dex.example/stat/1" } }]
        }]
    }"#;

    const SECOND: &str = r#"{
        "count": 2,
        "next": null,
        "previous": "pokemon.json",
        "results": [{ "id": 2, "name": "ivysaur", "sprites": { "front_default": "/sprites/2.png" } }]
    }"#;

    fn dex() -> HttpDex<Canned> {
        let mut bodies = HashMap::new();
        bodies.insert(BASE.to_string(), FIRST.as_bytes().to_vec());
        bodies.insert(
            "https://dex.example/api/pokemon-2.json".to_string(),
            SECOND.as_bytes().to_vec(),
        );
        bodies.insert("https://raw.example/sprites/1.png".to_string(), png(4, 6));
        bodies.insert("https://dex.example/sprites/2.png".to_string(), png(2, 2));
        bodies.insert(
            "https://dex.example/api/broken.json".to_string(),
            b"{ nope".to_vec(),
        );
        HttpDex::with_transport(BASE, Canned(bodies))
    }

    #[test]
    fn walks_remote_pages() {
        let dex = dex();
        let first = dex.fetch_page(None).unwrap();
        assert_eq!(first.results[0].hp(), Some(45));

        let second = dex.fetch_page(first.next.as_deref()).unwrap();
        assert_eq!(second.results[0].name, "ivysaur");

        let back = dex.fetch_page(second.previous.as_deref()).unwrap();
        assert_eq!(back, first);
    }

    #[test]
    fn sprite_urls_are_downloaded_and_decoded() {
        let dex = dex();
        let page = dex.fetch_page(None).unwrap();
        let url = page.results[0].sprites.front_default.clone().unwrap();
        let frame = dex.load_sprite(&url).unwrap();
        assert_eq!((frame.width, frame.height), (4, 6));

        let relative = dex.load_sprite("/sprites/2.png").unwrap();
        assert_eq!(relative.width, 2);
    }

    #[test]
    fn missing_sprite_is_unavailable() {
        let dex = dex();
        let err = dex
            .load_sprite("https://raw.example/sprites/back/1.png")
            .unwrap_err();
        assert!(err.is_sprite_unavailable());
    }

    #[test]
    fn page_errors_are_distinguished() {
        let dex = dex();
        assert!(matches!(
            dex.fetch_page(Some("broken.json")),
            Err(SourceError::MalformedPage { .. })
        ));
        assert!(matches!(
            dex.fetch_page(Some("https://dex.example/none.json")),
            Err(SourceError::Http { .. })
        ));
    }

    #[test]
    fn url_joining() {
        assert_eq!(join_url("https://a.example", "x.json"), "https://a.example/x.json");
        assert_eq!(join_url("https://a.example/p/q", "/r"), "https://a.example/r");
        assert_eq!(join_url(BASE, BASE), BASE);
    }
}
