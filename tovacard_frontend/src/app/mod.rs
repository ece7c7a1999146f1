use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use eframe::egui::{self, Context, TextureHandle};
use log::info;
use tovacard_core::session::{CardSession, ViewState};
use tovacard_core::CardServices;

mod messages;
mod state;
mod tasks;
mod ui;

pub use ui::startup::StartupErrorApp;

use messages::AppMessage;
use state::{ErrorDialog, PendingWork};

pub struct TovacardApp {
    services: CardServices,
    runtime: tokio::runtime::Runtime,
    ctx: Context,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    session: CardSession,
    pending: PendingWork,
    upload_preview: Option<TextureHandle>,
    result_preview: Option<TextureHandle>,
    error_dialog: Option<ErrorDialog>,
    info_banner: Option<String>,
}

impl TovacardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, services: CardServices, runtime: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::channel();
        info!("caption font: {}", services.caption_font.source());
        Self {
            services,
            runtime,
            ctx: cc.egui_ctx.clone(),
            tx,
            rx,
            session: CardSession::new(),
            pending: PendingWork::default(),
            upload_preview: None,
            result_preview: None,
            error_dialog: None,
            info_banner: None,
        }
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn busy(&self) -> bool {
        self.session.is_generating() || self.pending.reading_file
    }

    pub(crate) fn spawn_pick_image(&mut self) {
        if self.busy() {
            return;
        }
        self.pending.reading_file = true;
        tasks::pick_image(self.tx.clone(), self.ctx.clone(), self.services.output_dir.clone());
    }

    pub(crate) fn spawn_generate(&mut self) {
        let Some(job) = self.session.begin_generation() else {
            return;
        };
        info!("generating card with style '{}'", job.style);
        self.result_preview = None;
        self.pending.generation_started = Some(Instant::now());
        tasks::generate_card(
            self.runtime.handle(),
            self.services.pipeline.clone(),
            job,
            self.tx.clone(),
            self.ctx.clone(),
        );
    }

    pub(crate) fn spawn_save_card(&mut self) {
        if self.pending.saving_card {
            return;
        }
        let Some(generated) = self.session.generated() else {
            return;
        };
        self.pending.saving_card = true;
        tasks::save_card(
            self.tx.clone(),
            self.ctx.clone(),
            generated.bytes.clone(),
            self.services.caption_font.clone(),
            self.services.output_dir.clone(),
        );
    }

    pub(crate) fn start_over(&mut self) {
        self.session.reset();
        self.upload_preview = None;
        self.result_preview = None;
        self.info_banner = None;
    }

    /// Only the upload view accepts dropped photos; the first usable file wins.
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() || self.session.view() != ViewState::Upload || self.busy() {
            return;
        }
        for file in dropped {
            if let Some(path) = file.path {
                self.pending.reading_file = true;
                tasks::load_dropped_path(self.tx.clone(), self.ctx.clone(), path);
                return;
            }
            if let Some(bytes) = file.bytes {
                self.pending.reading_file = true;
                tasks::load_dropped_bytes(self.tx.clone(), self.ctx.clone(), file.name, bytes.to_vec(), file.mime);
                return;
            }
        }
    }
}

impl eframe::App for TovacardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("🍎 Shana Tova Card Maker");
            });
            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.session.view() {
                ViewState::Upload => self.render_upload_view(ui),
                ViewState::Loading => self.render_loading_view(ui),
                ViewState::Result => self.render_result_view(ui),
            });
        });

        self.render_error_dialog(ctx);

        if self.session.is_generating() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
