use eframe::egui::{self, RichText};

use super::super::TovacardApp;

const RESULT_WIDTH: f32 = 560.0;

impl TovacardApp {
    pub(crate) fn render_result_view(&mut self, ui: &mut egui::Ui) {
        let mut download = false;
        let mut restart = false;

        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            match (&self.result_preview, self.session.generated()) {
                (Some(texture), _) => {
                    ui.add(egui::Image::from_texture(texture).max_width(RESULT_WIDTH).shrink_to_fit());
                }
                (None, Some(image)) => {
                    ui.label(format!("Card ready ({}, {} bytes) but it cannot be previewed", image.mime_type, image.bytes.len()));
                }
                (None, None) => {
                    ui.label(RichText::new("No card yet").weak());
                }
            }
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if self.pending.saving_card {
                    ui.spinner();
                    ui.label("Saving...");
                } else if ui.button("💾 Download card").clicked() {
                    download = true;
                }
                if ui.button("↺ Start over").clicked() {
                    restart = true;
                }
            });
        });

        if download {
            self.spawn_save_card();
        }
        if restart {
            self.start_over();
        }
    }
}
