use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Result;
use pk_core::dex::{DexPage, Pokemon, Side};
use pk_core::error::SourceError;
use pk_core::frame::FrameBuffer;
use pk_core::traits::DexSource;

/// Demande de chargement d'une page.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Numéro de la demande ; seule la plus récente compte.
    pub generation: u64,
    /// Page reference, `None` = first page.
    pub page: Option<String>,
}

/// Decoded sprites of one record. `None` = unavailable.
#[derive(Clone, Debug, Default)]
pub struct SpritePair {
    pub front: Option<Arc<FrameBuffer>>,
    pub back: Option<Arc<FrameBuffer>>,
}

impl SpritePair {
    #[must_use]
    pub fn get(&self, side: Side) -> Option<&Arc<FrameBuffer>> {
        match side {
            Side::Front => self.front.as_ref(),
            Side::Back => self.back.as_ref(),
        }
    }
}

/// Réponse du worker.
#[derive(Debug)]
pub enum LoadResponse {
    PageLoaded {
        generation: u64,
        reference: Option<String>,
        page: DexPage,
        sprites: Vec<SpritePair>,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },
}

impl LoadResponse {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::PageLoaded { generation, .. } | Self::LoadFailed { generation, .. } => {
                *generation
            }
        }
    }
}

/// Handle on the loader thread. Dropping it stops the thread.
pub struct Loader {
    request_tx: Option<flume::Sender<LoadRequest>>,
    response_rx: flume::Receiver<LoadResponse>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Loader {
    /// Queue a page load. Returns its generation.
    pub fn request(&mut self, page: Option<String>) -> u64 {
        self.generation += 1;
        let req = LoadRequest {
            generation: self.generation,
            page,
        };
        if let Some(tx) = &self.request_tx
            && tx.send(req).is_err()
        {
            log::warn!("Worker de chargement arrêté");
        }
        self.generation
    }

    /// Non-blocking poll for a response to the latest request.
    /// Stale responses are discarded.
    pub fn try_recv(&self) -> Option<LoadResponse> {
        while let Ok(resp) = self.response_rx.try_recv() {
            if resp.generation() == self.generation {
                return Some(resp);
            }
            log::debug!("Réponse périmée ignorée (gen {})", resp.generation());
        }
        None
    }

    /// Blocking receive of the latest response, for non-interactive use.
    #[must_use]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<LoadResponse> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let resp = self.response_rx.recv_deadline(deadline).ok()?;
            if resp.generation() == self.generation {
                return Some(resp);
            }
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.request_tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("Le worker de chargement a paniqué");
        }
    }
}

/// Start the loader thread over `source`.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_loader<S: DexSource>(source: S) -> Result<Loader> {
    let (request_tx, request_rx) = flume::unbounded::<LoadRequest>();
    let (response_tx, response_rx) = flume::unbounded();

    let handle = std::thread::Builder::new()
        .name("dex-loader".into())
        .spawn(move || {
            while let Ok(mut req) = request_rx.recv() {
                // Ne traiter que la demande la plus récente.
                while let Ok(newer) = request_rx.try_recv() {
                    req = newer;
                }
                let resp = match load_page(&source, req.page.as_deref()) {
                    Ok((page, sprites)) => LoadResponse::PageLoaded {
                        generation: req.generation,
                        reference: req.page,
                        page,
                        sprites,
                    },
                    Err(e) => {
                        log::warn!("Chargement de page échoué : {e}");
                        LoadResponse::LoadFailed {
                            generation: req.generation,
                            message: e.to_string(),
                        }
                    }
                };
                if response_tx.send(resp).is_err() {
                    break;
                }
            }
            log::debug!("Worker de chargement terminé");
        })?;

    Ok(Loader {
        request_tx: Some(request_tx),
        response_rx,
        handle: Some(handle),
        generation: 0,
    })
}

/// Fetch a page and decode both sprites of every record.
///
/// # Errors
/// Returns an error only if the page itself cannot be fetched.
pub fn load_page<S: DexSource + ?Sized>(
    source: &S,
    reference: Option<&str>,
) -> Result<(DexPage, Vec<SpritePair>), SourceError> {
    let page = source.fetch_page(reference)?;
    let sprites = page
        .results
        .iter()
        .map(|p| SpritePair {
            front: load_side(source, p, Side::Front),
            back: load_side(source, p, Side::Back),
        })
        .collect();
    log::info!(
        "Page {} chargée : {} Pokémon",
        reference.unwrap_or("initiale"),
        page.results.len()
    );
    Ok((page, sprites))
}

fn load_side<S: DexSource + ?Sized>(
    source: &S,
    pokemon: &Pokemon,
    side: Side,
) -> Option<Arc<FrameBuffer>> {
    let reference = pokemon.sprite(side)?;
    match source.load_sprite(reference) {
        Ok(frame) => Some(Arc::new(frame)),
        Err(e) if e.is_sprite_unavailable() => {
            log::debug!("{} ({side:?}) : {e}", pokemon.name);
            None
        }
        Err(e) => {
            log::warn!("{} ({side:?}) : {e}", pokemon.name);
            None
        }
    }
}
