use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use eframe::egui::Context;
use log::error;
use tovacard_core::composer::{self, CARD_FILE_NAME};
use tovacard_core::fonts::CaptionFont;
use tovacard_core::media::{detect_mime, UploadedImage};
use tovacard_core::pipeline::GenerationPipeline;
use tovacard_core::session::GenerationJob;
use tovacard_core::CardError;

use super::messages::AppMessage;
use super::state::LoadedImage;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "heic", "heif"];

fn send(tx: &Sender<AppMessage>, ctx: &Context, message: AppMessage) {
    let name = message.name();
    if tx.send(message).is_err() {
        error!("failed to send {name} message");
    }
    ctx.request_repaint();
}

/// Opens the native file picker and reads the chosen photo.
pub fn pick_image(tx: Sender<AppMessage>, ctx: Context, start_dir: PathBuf) {
    thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a photo")
            .set_directory(&start_dir)
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();
        match picked {
            Some(path) => read_image(&tx, &ctx, path),
            None => send(&tx, &ctx, AppMessage::PickCancelled),
        }
    });
}

/// Reads a file that was dropped onto the window.
pub fn load_dropped_path(tx: Sender<AppMessage>, ctx: Context, path: PathBuf) {
    thread::spawn(move || read_image(&tx, &ctx, path));
}

/// Accepts dropped bytes directly (platforms that hand over contents
/// instead of a path).
pub fn load_dropped_bytes(tx: Sender<AppMessage>, ctx: Context, name: String, bytes: Vec<u8>, mime: String) {
    thread::spawn(move || {
        let mime = if mime.is_empty() {
            detect_mime(&bytes, std::path::Path::new(&name))
        } else {
            mime
        };
        let image = UploadedImage::from_bytes(bytes, mime);
        let preview = LoadedImage::decode(&image.bytes).ok();
        send(&tx, &ctx, AppMessage::ImageRead(Ok((image, preview))));
    });
}

fn read_image(tx: &Sender<AppMessage>, ctx: &Context, path: PathBuf) {
    let result = UploadedImage::from_path(&path).map(|image| {
        let preview = match LoadedImage::decode(&image.bytes) {
            Ok(preview) => Some(preview),
            Err(err) => {
                log::warn!("no preview for {}: {}", path.display(), err);
                None
            }
        };
        (image, preview)
    });
    send(tx, ctx, AppMessage::ImageRead(result));
}

/// Runs one generation on the async runtime.
pub fn generate_card(
    runtime: &tokio::runtime::Handle,
    pipeline: GenerationPipeline,
    job: GenerationJob,
    tx: Sender<AppMessage>,
    ctx: Context,
) {
    runtime.spawn(async move {
        let result = pipeline.generate(&job.image, &job.style).await;
        let preview = match &result {
            Ok(image) => LoadedImage::decode(&image.bytes)
                .map_err(|err| log::warn!("generated image has no preview: {err}"))
                .ok(),
            Err(_) => None,
        };
        send(&tx, &ctx, AppMessage::Generated { result, preview });
    });
}

/// Composes the card, asks where to save it and writes the PNG.
pub fn save_card(
    tx: Sender<AppMessage>,
    ctx: Context,
    image_bytes: Vec<u8>,
    font: Arc<CaptionFont>,
    start_dir: PathBuf,
) {
    thread::spawn(move || {
        let result = (|| -> Result<Option<PathBuf>, CardError> {
            let card = composer::compose_card(&image_bytes, &font)?;
            let Some(path) = rfd::FileDialog::new()
                .set_title("Save greeting card")
                .set_directory(&start_dir)
                .set_file_name(CARD_FILE_NAME)
                .add_filter("PNG image", &["png"])
                .save_file()
            else {
                return Ok(None);
            };
            composer::save_card(&path, &card)?;
            Ok(Some(path))
        })();
        send(&tx, &ctx, AppMessage::CardSaved(result));
    });
}
