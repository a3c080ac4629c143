use crate::collection::ProgramEntry;
use crate::types::{Control, IconRef};
use crate::ui::{PanelState, UiAction};
use eframe::egui;
use egui::{Sense, vec2};

/// Programs per grid row.
const COLUMNS: usize = 3;

/// Render the central panel with the program grid.
pub fn show(ctx: &egui::Context, state: &PanelState, actions: &mut Vec<UiAction>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(collection) = &state.collection else {
            ui.centered_and_justified(|ui| {
                if state.loading {
                    ui.spinner();
                } else {
                    ui.label("No programs available.");
                }
            });
            return;
        };

        if collection.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No programs configured.");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("program_grid")
                .spacing([24.0, 16.0])
                .show(ui, |ui| {
                    for (i, entry) in collection.entries().enumerate() {
                        program_cell(ui, entry, actions);
                        if (i + 1) % COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    });
}

fn program_cell(ui: &mut egui::Ui, entry: &ProgramEntry, actions: &mut Vec<UiAction>) {
    ui.vertical(|ui| {
        icon(ui, &entry.icon);
        ui.label(egui::RichText::new(&entry.name).strong());
        match entry.control {
            Control::Toggle(toggle) => {
                let resp = ui.add_enabled(
                    toggle.interactive,
                    egui::Button::selectable(toggle.active, "Install"),
                );
                if resp.clicked() {
                    actions.push(UiAction::ToggleInstall(entry.name.clone()));
                }
            }
            Control::Choose => {
                if ui.button("Choose").clicked() {
                    actions.push(UiAction::Choose(entry.name.clone()));
                }
            }
        }
    });
}

fn icon(ui: &mut egui::Ui, icon: &IconRef) {
    match icon {
        IconRef::File(path) => {
            let size = crate::icons::ICON_SIZE;
            ui.add(
                egui::Image::new(format!("file://{}", path.display()))
                    .fit_to_exact_size(vec2(size, size)),
            );
        }
        IconRef::Placeholder { size } => {
            ui.allocate_exact_size(vec2(*size, *size), Sense::hover());
        }
    }
}
