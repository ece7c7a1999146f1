use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::CardError;
use crate::fonts::CaptionFont;

pub const CAPTION_TEXT: &str = "שנה טובה";
pub const CAPTION_COLOR: Rgba<u8> = Rgba([0xc0, 0x39, 0x2b, 0xff]);
pub const CARD_FILE_NAME: &str = "shana-tova-card.png";

const MIN_FONT_SIZE: f32 = 40.0;
const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Geometry of the saved card: the source image on top, the caption band
/// underneath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    pub font_size: f32,
    pub band_height: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl CaptionLayout {
    pub fn for_image(width: u32, height: u32) -> Self {
        let font_size = (width as f32 / 12.0).max(MIN_FONT_SIZE);
        let band_height = font_size * 1.5;
        Self {
            font_size,
            band_height,
            canvas_width: width,
            canvas_height: (height as f32 + band_height).floor() as u32,
        }
    }

    /// Centre of the caption band in canvas coordinates.
    pub fn caption_center(&self, image_height: u32) -> (f32, f32) {
        (
            self.canvas_width as f32 / 2.0,
            image_height as f32 + self.band_height / 2.0,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ComposedCard {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes the generated image and lays it out on a card with the greeting
/// underneath, returning PNG bytes. Deterministic for a given input and font.
pub fn compose_card(image_bytes: &[u8], font: &CaptionFont) -> Result<ComposedCard, CardError> {
    let source = image::load_from_memory(image_bytes)
        .map_err(|err| CardError::ImageLoadFailed(err.to_string()))?
        .to_rgba8();
    let canvas = compose_canvas(&source, font);
    let (width, height) = canvas.dimensions();

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| CardError::ExportFailed(format!("PNG encoding failed: {err}")))?;
    tracing::info!(width, height, size = png.len(), "card composed");

    Ok(ComposedCard { png, width, height })
}

pub fn compose_canvas(source: &RgbaImage, font: &CaptionFont) -> RgbaImage {
    let (width, height) = source.dimensions();
    let layout = CaptionLayout::for_image(width, height);

    let mut canvas = ImageBuffer::from_pixel(layout.canvas_width, layout.canvas_height, BACKGROUND);
    imageops::overlay(&mut canvas, source, 0, 0);

    let (cx, cy) = layout.caption_center(height);
    draw_text_centered(&mut canvas, font.font(), layout.font_size, cx, cy, CAPTION_COLOR, CAPTION_TEXT);
    canvas
}

pub fn save_card(path: &Path, card: &ComposedCard) -> Result<(), CardError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| CardError::ExportFailed(format!("{}: {err}", parent.display())))?;
    }
    fs::write(path, &card.png).map_err(|err| CardError::ExportFailed(format!("{}: {err}", path.display())))?;
    tracing::info!(path = %path.display(), "card saved");
    Ok(())
}

/// The layout engine places glyphs left to right, so right-to-left text is
/// reversed into visual order first. No shaping or mixed-direction support.
fn visual_order(text: &str) -> String {
    let is_rtl = |ch: char| ('\u{0590}'..='\u{05FF}').contains(&ch) || ('\u{FB1D}'..='\u{FB4F}').contains(&ch);
    if text.chars().any(is_rtl) {
        text.chars().rev().collect()
    } else {
        text.to_string()
    }
}

fn text_width(font: &Font<'static>, px: f32, text: &str) -> f32 {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    font.layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

fn draw_text_centered(
    img: &mut RgbaImage,
    font: &Font<'static>,
    px: f32,
    cx: f32,
    cy: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let text = visual_order(text);
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let width = text_width(font, px, &text);
    let height = (v_metrics.ascent - v_metrics.descent).max(1.0);
    let origin_x = cx - width / 2.0;
    let baseline_y = cy - height / 2.0 + v_metrics.ascent;

    for glyph in font.layout(&text, scale, point(origin_x, baseline_y)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                return;
            }
            if coverage <= 0.0 {
                return;
            }
            let dst = img.get_pixel_mut(px as u32, py as u32);
            let alpha = coverage.min(1.0);
            let inv = 1.0 - alpha;
            for channel in 0..3 {
                dst.0[channel] = (color.0[channel] as f32 * alpha + dst.0[channel] as f32 * inv).round() as u8;
            }
            dst.0[3] = 255;
        });
    }
}
