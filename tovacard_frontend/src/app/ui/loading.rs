use eframe::egui::{self, RichText};

use super::super::TovacardApp;

impl TovacardApp {
    pub(crate) fn render_loading_view(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.add(egui::Spinner::new().size(48.0));
            ui.add_space(16.0);
            ui.label(RichText::new("Creating your greeting card...").size(18.0));
            if let Some(started) = self.pending.generation_started {
                ui.label(RichText::new(format!("{}s", started.elapsed().as_secs())).weak());
            }
        });
    }
}
