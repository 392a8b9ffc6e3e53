use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use hv_core::config::ViewConfig;
use notify::{Event, EventKind, RecursiveMode, Watcher};

/// Surveille le fichier config et publie chaque version valide dans l'ArcSwap.
///
/// `overrides` is applied to every reloaded configuration, so command-line
/// flags keep winning over the file. Returns the watcher, which must stay
/// alive as long as reloading is wanted.
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher<F>(
    config_path: &Path,
    config: &Arc<ArcSwap<ViewConfig>>,
    overrides: F,
) -> Result<impl Watcher + use<F>>
where
    F: Fn(&mut ViewConfig) + Send + 'static,
{
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_))
        {
            match hv_core::config::load_config(&path) {
                Ok(mut new_config) => {
                    overrides(&mut new_config);
                    config.store(Arc::new(new_config));
                    log::info!("Config rechargée depuis {}", path.display());
                }
                Err(e) => {
                    // On garde l'ancienne config.
                    log::warn!("Erreur de rechargement config : {e:#}");
                }
            }
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
