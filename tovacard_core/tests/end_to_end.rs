use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use tovacard_core::composer::{compose_card, save_card, CaptionLayout, CAPTION_COLOR, CARD_FILE_NAME};
use tovacard_core::fonts::CaptionFont;
use tovacard_core::gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, ImageService, Part,
};
use tovacard_core::media::UploadedImage;
use tovacard_core::pipeline::GenerationPipeline;
use tovacard_core::session::{CardSession, ViewState};
use tovacard_core::CardError;

struct MockService {
    parts: Vec<Part>,
}

#[async_trait]
impl ImageService for MockService {
    async fn generate_content(&self, _request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: self.parts.clone(),
                }),
                finish_reason: Some("STOP".into()),
            }],
            prompt_feedback: None,
        })
    }
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 200]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([250, 200, 0, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn upload_generate_and_save_card() {
    let dir = tempfile::tempdir().unwrap();
    let upload_path = dir.path().join("family.jpg");
    std::fs::write(&upload_path, jpeg(500, 500)).unwrap();

    let generated_png = png(1200, 800);
    let pipeline = GenerationPipeline::new(Arc::new(MockService {
        parts: vec![Part::inline("image/png", BASE64.encode(&generated_png))],
    }));

    let mut session = CardSession::new();
    session.set_image(UploadedImage::from_path(&upload_path).unwrap());
    assert_eq!(session.uploaded().unwrap().mime_type, "image/jpeg");
    session.set_style("festive");
    assert!(session.can_generate());

    session.generate_with(&pipeline).await.unwrap();
    assert_eq!(session.view(), ViewState::Result);
    let generated = session.generated().unwrap();
    assert_eq!(generated.bytes, generated_png);
    assert_eq!(generated.mime_type, "image/png");

    let card = compose_card(&generated.bytes, &CaptionFont::bundled().unwrap()).unwrap();
    let layout = CaptionLayout::for_image(1200, 800);
    assert_eq!((card.width, card.height), (1200, layout.canvas_height));
    assert_eq!(card.height, 950);

    let out = dir.path().join(CARD_FILE_NAME);
    save_card(&out, &card).unwrap();
    let saved = image::open(&out).unwrap();
    assert_eq!((saved.width(), saved.height()), (1200, 950));
    let saved = saved.to_rgba8();
    let inked = saved.enumerate_pixels().filter(|(_, y, pixel)| *y >= 800 && **pixel == CAPTION_COLOR).count();
    assert!(inked > 0, "saved card has no greeting");

    session.reset();
    assert_eq!(session.view(), ViewState::Upload);
    assert!(!session.can_generate());
}

#[tokio::test]
async fn text_only_reply_never_leaves_session_loading() {
    let pipeline = GenerationPipeline::new(Arc::new(MockService {
        parts: vec![Part::text("Sorry, I can't help with that.")],
    }));

    let mut session = CardSession::new();
    session.set_image(UploadedImage::from_bytes(jpeg(32, 32), "image/jpeg"));
    session.set_style("nostalgic");

    let err = session.generate_with(&pipeline).await.unwrap_err();
    assert!(matches!(err, CardError::GenerationFailed(_)));
    assert_eq!(session.view(), ViewState::Upload);
    assert!(session.generated().is_none());
    assert!(session.uploaded().is_some());
}

#[tokio::test]
async fn generate_without_selection_is_refused() {
    let pipeline = GenerationPipeline::new(Arc::new(MockService { parts: Vec::new() }));
    let mut session = CardSession::new();
    session.set_image(UploadedImage::from_bytes(jpeg(8, 8), "image/jpeg"));

    assert!(session.generate_with(&pipeline).await.is_err());
    assert_eq!(session.view(), ViewState::Upload);
}
