//! Background task that fetches release catalogs and builds the program
//! collection without blocking the UI thread.

use std::sync::mpsc;
use std::thread;

use anyhow::Result;

use crate::collection::ProgramCollection;
use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::fetch::{CatalogFetcher, GithubFetcher};
use crate::icons::IconResolver;

/// Build the collection described by `config`. Install toggles are forwarded to `install_tx`.
pub fn build_collection(
    config: &PanelConfig,
    install_tx: mpsc::Sender<String>,
    fetcher: &dyn CatalogFetcher,
) -> Result<ProgramCollection, PanelError> {
    ProgramCollection::builder()
        .toggle_programs(config.toggle_programs.iter().cloned())
        .release_programs(config.release_programs.clone())
        .installed(config.installed_set())
        .icons(IconResolver::new(config.icons_dir.clone()))
        .on_install(move |name| {
            if install_tx.send(name.to_string()).is_err() {
                tracing::warn!("install request for {} dropped, UI is gone", name);
            }
        })
        .build(fetcher)
}

/// Spawn a background task that sends the finished collection (or the failure) to `build_tx`.
pub fn spawn_build_collection(
    config: PanelConfig,
    install_tx: mpsc::Sender<String>,
    build_tx: mpsc::Sender<Result<ProgramCollection>>,
) {
    thread::spawn(move || {
        let result = GithubFetcher::new(config.fetch_timeout()).and_then(|fetcher| {
            build_collection(&config, install_tx, &fetcher).map_err(anyhow::Error::from)
        });
        if let Err(e) = &result {
            tracing::error!("loading programs failed: {:#}", e);
        }
        let _ = build_tx.send(result);
    });
}
