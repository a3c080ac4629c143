use crate::ui::PanelState;
use eframe::egui;
use egui::Color32;

/// One line summary of queued install toggles and selected releases.
pub fn summary(state: &PanelState) -> String {
    let programs = state
        .collection
        .as_ref()
        .map(|c| c.entries().count())
        .unwrap_or(0);
    let queued = if state.pending_installs.is_empty() {
        "none".to_string()
    } else {
        state.pending_installs.join(", ")
    };

    let mut selections = Vec::new();
    if let Some(c) = &state.collection {
        for (name, catalog) in c.catalogs() {
            let tags = catalog.selected_tags();
            if !tags.is_empty() {
                selections.push(format!("{} ({})", name, tags.join(", ")));
            }
        }
    }
    let selected = if selections.is_empty() {
        "none".to_string()
    } else {
        selections.join("; ")
    };

    format!(
        "Programs: {}  •  Queued: {}  •  Releases: {}",
        programs, queued, selected
    )
}

/// Render the bottom status bar.
pub fn show(ctx: &egui::Context, state: &PanelState) {
    egui::TopBottomPanel::bottom("bottom_status")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.set_height(32.0);
                ui.label(
                    egui::RichText::new(summary(state))
                        .color(Color32::from_rgb(110, 112, 124))
                        .monospace(),
                );
                if let Some(msg) = state.status_msgs.last() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(msg);
                    });
                }
            });
        });
}
