use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use pk_core::config::{Config, load_config};

/// Surveille le fichier de config et publie chaque version valide dans l'ArcSwap.
///
/// Retourne le Watcher (doit rester vivant tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(
    config_path: &Path,
    config: &Arc<ArcSwap<Config>>,
) -> Result<impl Watcher + use<>> {
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        {
            reload_into(&path, &config);
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Recharge `path` dans `config`. Une config invalide laisse l'ancienne en place.
pub fn reload_into(path: &Path, config: &ArcSwap<Config>) {
    match load_config(path) {
        Ok(new_config) => {
            if **config.load() != new_config {
                config.store(Arc::new(new_config));
                log::info!("Config rechargée depuis {}", path.display());
            }
        }
        Err(e) => log::warn!("Erreur de rechargement config : {e:#}"),
    }
}
