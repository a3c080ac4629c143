//! Egui-based UI for the program panel.
//!
//! This module defines the panel state, the eframe App implementation,
//! and applies the actions collected from the panels to the program collection.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use eframe::{App, egui};

use crate::collection::ProgramCollection;
use crate::config::PanelConfig;
use crate::dialog::MessageDialog;

pub mod panels;
pub mod release_window;
pub mod tasks;

/// User interaction collected while rendering and applied after the frame's widgets are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    ToggleInstall(String),
    Choose(String),
    ToggleRelease(String, usize),
    Hide(String),
    CloseRequest(String),
}

/// UI state owned by the eframe app.
pub struct PanelState {
    pub collection: Option<ProgramCollection>,
    pub loading: bool,
    pub build_rx: mpsc::Receiver<Result<ProgramCollection>>,
    pub install_rx: mpsc::Receiver<String>,

    // install toggles not yet carried out, in activation order
    pub pending_installs: Vec<String>,

    // status log
    pub status_msgs: Vec<String>,
    pub dialog: MessageDialog,
}

impl PanelState {
    pub fn new(
        build_rx: mpsc::Receiver<Result<ProgramCollection>>,
        install_rx: mpsc::Receiver<String>,
    ) -> Self {
        Self {
            collection: None,
            loading: true,
            build_rx,
            install_rx,
            pending_installs: Vec::new(),
            status_msgs: Vec::new(),
            dialog: MessageDialog::default(),
        }
    }

    /// Pull the finished collection and queued install requests (non-blocking).
    pub fn poll(&mut self) {
        if let Ok(result) = self.build_rx.try_recv() {
            self.loading = false;
            match result {
                Ok(collection) => {
                    self.status_msgs.push("Programs loaded".into());
                    self.collection = Some(collection);
                }
                Err(e) => {
                    tracing::error!("building program collection failed: {:#}", e);
                    self.status_msgs.push(format!("Error: {:#}", e));
                    self.dialog.notify("Could not load programs", format!("{:#}", e));
                }
            }
        }

        while let Ok(program) = self.install_rx.try_recv() {
            if let Some(pos) = self.pending_installs.iter().position(|p| *p == program) {
                self.pending_installs.remove(pos);
            } else {
                self.pending_installs.push(program);
            }
        }
    }

    pub fn apply(&mut self, action: UiAction) {
        let Some(collection) = self.collection.as_mut() else {
            return;
        };
        let res = match &action {
            UiAction::ToggleInstall(name) => collection.activate_toggle(name).map(|_| ()),
            UiAction::Choose(name) => collection.activate_choose(name),
            UiAction::ToggleRelease(name, idx) => collection.toggle_release(name, *idx),
            UiAction::Hide(name) => collection.hide_window(name),
            UiAction::CloseRequest(name) => collection.request_close(name),
        };
        if let Err(e) = res {
            tracing::warn!("{:?} failed: {}", action, e);
            self.status_msgs.push(format!("Error: {}", e));
        }
    }
}

/// Main eframe application that renders and controls the UI.
pub struct ProgramPanelApp {
    pub state: PanelState,
}

impl ProgramPanelApp {
    /// Start loading the configured programs in the background.
    pub fn new(config: PanelConfig, startup_error: Option<String>) -> Self {
        let (build_tx, build_rx) = mpsc::channel();
        let (install_tx, install_rx) = mpsc::channel();
        let mut state = PanelState::new(build_rx, install_rx);
        if let Some(err) = startup_error {
            state.dialog.notify("Configuration error", err);
        }
        tasks::spawn_build_collection(config, install_tx, build_tx);
        Self { state }
    }
}

impl App for ProgramPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        let mut actions = Vec::new();
        panels::top::show(ctx);
        panels::bottom::show(ctx, &self.state);
        panels::central::show(ctx, &self.state, &mut actions);
        if let Some(collection) = &self.state.collection {
            release_window::show_all(ctx, collection, &mut actions);
        }
        self.state.dialog.show(ctx);

        for action in actions {
            self.state.apply(action);
        }

        if self.state.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::CatalogFetcher;
    use crate::types::{Prerelease, RawRelease};

    struct OneRelease;

    impl CatalogFetcher for OneRelease {
        fn fetch(&self, _api_link: &str, _program: &str) -> Result<Vec<RawRelease>> {
            Ok(vec![RawRelease::new("v1", Prerelease::Flag(false))])
        }
    }

    fn loaded_state() -> PanelState {
        let (build_tx, build_rx) = mpsc::channel();
        let (install_tx, install_rx) = mpsc::channel();
        let collection = ProgramCollection::builder()
            .toggle_programs(["steam"])
            .release_programs([("proton-ge", "link")])
            .on_install(move |name| {
                let _ = install_tx.send(name.to_string());
            })
            .build(&OneRelease)
            .unwrap();
        build_tx.send(Ok(collection)).unwrap();
        let mut state = PanelState::new(build_rx, install_rx);
        state.poll();
        state
    }

    #[test]
    fn install_toggles_queue_and_unqueue() {
        let mut state = loaded_state();
        assert!(!state.loading);

        state.apply(UiAction::ToggleInstall("steam".into()));
        state.poll();
        assert_eq!(state.pending_installs, vec!["steam".to_string()]);

        state.apply(UiAction::ToggleInstall("steam".into()));
        state.poll();
        assert!(state.pending_installs.is_empty());
    }

    #[test]
    fn window_actions_reach_the_collection() {
        let mut state = loaded_state();
        state.apply(UiAction::Choose("proton-ge".into()));
        state.apply(UiAction::ToggleRelease("proton-ge".into(), 0));
        state.apply(UiAction::CloseRequest("proton-ge".into()));

        let c = state.collection.as_ref().unwrap();
        assert!(!c.window("proton-ge").unwrap().is_visible());
        assert_eq!(c.catalog("proton-ge").unwrap().selected_tags(), vec!["v1"]);
    }

    #[test]
    fn failed_build_opens_dialog() {
        let (build_tx, build_rx) = mpsc::channel();
        let (_install_tx, install_rx) = mpsc::channel();
        build_tx.send(Err(anyhow::anyhow!("rate limited"))).unwrap();
        let mut state = PanelState::new(build_rx, install_rx);
        state.poll();
        assert!(!state.loading);
        assert!(state.collection.is_none());
        assert!(state.dialog.open);
    }

    #[test]
    fn errors_from_actions_are_logged_to_status() {
        let mut state = loaded_state();
        state.apply(UiAction::Choose("steam".into()));
        assert!(state.status_msgs.last().unwrap().starts_with("Error:"));
    }
}
