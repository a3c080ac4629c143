mod catalog;
mod collection;
mod config;
mod dialog;
mod error;
mod fetch;
mod icons;
mod types;
mod ui;
mod window;

use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{PanelConfig, default_config_path};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // optional first argument overrides the config location
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let (config, startup_error) = match PanelConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            tracing::error!("{:#}", e);
            (PanelConfig::default(), Some(format!("{:#}", e)))
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Program Panel",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ui::ProgramPanelApp::new(config, startup_error)))
        }),
    )
}
