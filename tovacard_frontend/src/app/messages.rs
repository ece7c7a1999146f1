use std::path::PathBuf;

use log::{error, info, warn};
use tovacard_core::media::{GeneratedImage, UploadedImage};
use tovacard_core::CardError;

use super::state::LoadedImage;
use super::TovacardApp;

pub enum AppMessage {
    PickCancelled,
    ImageRead(Result<(UploadedImage, Option<LoadedImage>), CardError>),
    Generated {
        result: Result<GeneratedImage, CardError>,
        preview: Option<LoadedImage>,
    },
    /// `Ok(None)` when the save dialog was dismissed.
    CardSaved(Result<Option<PathBuf>, CardError>),
}

impl AppMessage {
    pub fn name(&self) -> &'static str {
        match self {
            AppMessage::PickCancelled => "PickCancelled",
            AppMessage::ImageRead(_) => "ImageRead",
            AppMessage::Generated { .. } => "Generated",
            AppMessage::CardSaved(_) => "CardSaved",
        }
    }
}

pub(super) fn process_messages(app: &mut TovacardApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::PickCancelled => {
                app.pending.reading_file = false;
            }
            AppMessage::ImageRead(result) => {
                app.pending.reading_file = false;
                match result {
                    Ok((image, preview)) => {
                        info!("photo loaded ({}, {} bytes)", image.mime_type, image.bytes.len());
                        app.session.set_image(image);
                        app.upload_preview = preview.map(|p| p.to_texture(&app.ctx, "upload_preview"));
                    }
                    Err(err) => app.report(err),
                }
            }
            AppMessage::Generated { result, preview } => {
                app.pending.generation_started = None;
                match app.session.complete_generation(result) {
                    Ok(()) => {
                        app.result_preview = preview.map(|p| p.to_texture(&app.ctx, "result_preview"));
                    }
                    Err(err) => {
                        app.result_preview = None;
                        app.report(err);
                    }
                }
            }
            AppMessage::CardSaved(result) => {
                app.pending.saving_card = false;
                match result {
                    Ok(Some(path)) => {
                        info!("card saved to {}", path.display());
                        app.info_banner = Some(format!("Card saved to {}", path.display()));
                    }
                    Ok(None) => info!("save cancelled"),
                    Err(err) => app.report(err),
                }
            }
        }
    }
}

impl TovacardApp {
    /// Logs the failure and queues a blocking dialog for it.
    pub(super) fn report(&mut self, err: CardError) {
        if err.is_fatal() {
            error!("{err}");
        } else {
            warn!("{err}");
        }
        self.error_dialog = Some(super::state::ErrorDialog {
            title: err.title().to_string(),
            message: err.to_string(),
        });
    }
}
