use eframe::egui::{self, Color32, RichText};
use tovacard_core::styles::FrameStyle;

use super::super::TovacardApp;

const PREVIEW_WIDTH: f32 = 360.0;

impl TovacardApp {
    pub(crate) fn render_upload_view(&mut self, ui: &mut egui::Ui) {
        let mut pick = false;
        let mut generate = false;

        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label("1. Choose a photo");
            ui.add_space(6.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(PREVIEW_WIDTH);
                if let Some(texture) = &self.upload_preview {
                    ui.add(egui::Image::from_texture(texture).max_width(PREVIEW_WIDTH).shrink_to_fit());
                } else if let Some(image) = self.session.uploaded() {
                    ui.label(format!("Photo loaded ({}, no preview)", image.mime_type));
                } else {
                    ui.add_space(40.0);
                    ui.label(RichText::new("Drop a photo here").weak().italics());
                    ui.add_space(40.0);
                }
            });

            ui.add_space(6.0);
            if self.pending.reading_file {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Reading photo...");
                });
            } else if ui.button("📂 Choose photo…").clicked() {
                pick = true;
            }

            ui.add_space(16.0);
            ui.label("2. Pick a frame style");
            ui.add_space(6.0);
            self.render_style_picker(ui);

            ui.add_space(16.0);
            let button = egui::Button::new(RichText::new("✨ Create card").size(18.0));
            let response = ui.add_enabled(self.session.can_generate() && !self.pending.reading_file, button);
            if response.clicked() {
                generate = true;
            }
            if !self.session.can_generate() {
                ui.colored_label(Color32::GRAY, "Select a photo and a style to continue");
            }
        });

        if pick {
            self.spawn_pick_image();
        }
        if generate {
            self.spawn_generate();
        }
    }

    fn render_style_picker(&mut self, ui: &mut egui::Ui) {
        let selected = self.session.style().map(str::to_owned);
        let mut clicked = None;

        egui::Grid::new("frame_styles")
            .num_columns(3)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for (index, style) in FrameStyle::ALL.into_iter().enumerate() {
                    let is_selected = selected.as_deref() == Some(style.key());
                    let text = RichText::new(format!("{} {}", style.icon(), style.label())).size(16.0);
                    if ui.selectable_label(is_selected, text).clicked() {
                        clicked = Some(style);
                    }
                    if index % 3 == 2 {
                        ui.end_row();
                    }
                }
            });

        if let Some(style) = clicked {
            self.session.set_style(style.key());
        }
    }
}
