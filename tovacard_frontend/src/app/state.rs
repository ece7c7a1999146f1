use std::time::Instant;

use eframe::egui::{self, ColorImage, Context, TextureHandle};
use image::imageops::FilterType;

/// Largest edge of an on-screen preview; the full-size bytes stay in the
/// session.
pub const PREVIEW_MAX_EDGE: u32 = 1024;

/// Decoded RGBA pixels ready to become a texture on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let img = image::load_from_memory(bytes).map_err(|e| format!("Image decode error: {}", e))?;
        let img = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
            img.resize(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE, FilterType::Triangle)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        Ok(Self {
            size: [img.width() as usize, img.height() as usize],
            pixels: rgba.into_raw(),
        })
    }

    pub fn to_texture(&self, ctx: &Context, name: &str) -> TextureHandle {
        let color_image = ColorImage::from_rgba_unmultiplied(self.size, &self.pixels);
        ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
    }
}

/// Blocking notification shown over the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

/// Background work the UI is waiting on, beyond the session's own view.
#[derive(Debug, Default)]
pub struct PendingWork {
    pub reading_file: bool,
    pub saving_card: bool,
    pub generation_started: Option<Instant>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([9, 8, 7, 255])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn small_images_keep_their_size() {
        let loaded = LoadedImage::decode(&png(40, 30)).unwrap();
        assert_eq!(loaded.size, [40, 30]);
        assert_eq!(loaded.pixels.len(), 40 * 30 * 4);
        assert_eq!(&loaded.pixels[..4], &[9, 8, 7, 255]);
    }

    #[test]
    fn large_images_are_downscaled_preserving_aspect() {
        let loaded = LoadedImage::decode(&png(2048, 1024)).unwrap();
        assert_eq!(loaded.size, [1024, 512]);
    }

    #[test]
    fn junk_bytes_report_decode_error() {
        let err = LoadedImage::decode(b"nope").unwrap_err();
        assert!(err.starts_with("Image decode error"));
    }
}
