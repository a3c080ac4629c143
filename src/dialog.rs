//! Modal notification dialog with a single OK action.

use eframe::egui;

#[derive(Default)]
pub struct MessageDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
}

impl MessageDialog {
    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut ok_clicked = false;
        let response = egui::Modal::new(egui::Id::new("message_dialog")).show(ctx, |ui| {
            ui.set_min_width(120.0);
            ui.heading(&self.title);
            ui.add_space(6.0);
            ui.add(egui::Label::new(&self.message).wrap());
            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ok_clicked = true;
                }
            });
        });

        // Escape or a click on the backdrop acknowledges like OK
        if ok_clicked || response.should_close() {
            self.close();
        }
    }
}
