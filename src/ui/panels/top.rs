use eframe::egui;

/// Render the top header panel.
pub fn show(ctx: &egui::Context) {
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(format!("Program Panel v{}", env!("CARGO_PKG_VERSION")));
        });
        ui.add_space(6.0);
    });
}
