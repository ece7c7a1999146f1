use eframe::egui::{self, Align2, Color32, Context, RichText};

use super::super::TovacardApp;

impl TovacardApp {
    /// Blocking notification: everything behind it is disabled until
    /// dismissed.
    pub(crate) fn render_error_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.error_dialog.clone() else {
            return;
        };
        let mut dismissed = false;

        egui::Area::new(egui::Id::new("error_dialog_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, Color32::from_black_alpha(120));
            });

        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(RichText::new(&dialog.message).color(Color32::LIGHT_RED));
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.error_dialog = None;
        }
    }
}
