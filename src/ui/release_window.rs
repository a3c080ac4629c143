//! Release selection windows, one per choose-release program.

use eframe::egui;

use crate::catalog::ReleaseCatalog;
use crate::collection::ProgramCollection;
use crate::ui::UiAction;

/// Render every visible selection window.
pub fn show_all(ctx: &egui::Context, collection: &ProgramCollection, actions: &mut Vec<UiAction>) {
    for window in collection.windows().values() {
        if !window.is_visible() {
            continue;
        }
        if let Some(catalog) = collection.catalog(window.program_name()) {
            show(ctx, catalog, actions);
        }
    }
}

fn show(ctx: &egui::Context, catalog: &ReleaseCatalog, actions: &mut Vec<UiAction>) {
    let name = catalog.program_name();
    // the title bar close button only hides, see UiAction::CloseRequest
    let mut open = true;
    egui::Window::new(format!("{} releases", name))
        .id(egui::Id::new(("release_window", name)))
        .open(&mut open)
        .collapsible(false)
        .default_size([250.0, 300.0])
        .show(ctx, |ui| {
            ui.label(format!("{} version management.", name));
            ui.add_space(10.0);

            let max_height = (ui.available_height() - 40.0).max(80.0);
            egui::ScrollArea::vertical()
                .id_salt(("release_scroll", name))
                .max_height(max_height)
                .show(ui, |ui| {
                    if catalog.is_empty() {
                        ui.label("No releases to choose from.");
                        return;
                    }
                    egui::Grid::new(("release_grid", name))
                        .striped(true)
                        .show(ui, |ui| {
                            ui.label("");
                            ui.strong("Release");
                            ui.strong("Prerelease ?");
                            ui.end_row();

                            for (i, entry) in catalog.entries().iter().enumerate() {
                                let mut checked = entry.selected;
                                if ui.checkbox(&mut checked, "").clicked() {
                                    actions.push(UiAction::ToggleRelease(name.to_string(), i));
                                }
                                ui.label(&entry.tag);
                                ui.label(entry.prerelease.to_string());
                                ui.end_row();
                            }
                        });
                });

            ui.add_space(5.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Hide").clicked() {
                    actions.push(UiAction::Hide(name.to_string()));
                }
            });
        });

    if !open {
        actions.push(UiAction::CloseRequest(name.to_string()));
    }
}
