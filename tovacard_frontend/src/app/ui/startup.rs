use eframe::egui::{self, Color32, Context, RichText};
use tovacard_core::CardError;

/// Shown in place of the app when startup fails; offers nothing but the
/// error and a way out.
pub struct StartupErrorApp {
    error: CardError,
}

impl StartupErrorApp {
    pub fn new(error: CardError) -> Self {
        Self { error }
    }
}

impl eframe::App for StartupErrorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading(RichText::new(self.error.title()).color(Color32::LIGHT_RED));
                ui.add_space(12.0);
                ui.label(self.error.to_string());
                ui.add_space(24.0);
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}
