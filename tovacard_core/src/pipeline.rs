use std::sync::Arc;

use crate::error::CardError;
use crate::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageService, Modality, Part,
};
use crate::media::{GeneratedImage, UploadedImage};
use crate::styles::FrameStyle;

/// Turns an uploaded photo and a style key into a generated card image.
/// One request per call, no retries; any failure is terminal for the attempt.
#[derive(Clone)]
pub struct GenerationPipeline {
    service: Arc<dyn ImageService>,
}

impl GenerationPipeline {
    pub fn new(service: Arc<dyn ImageService>) -> Self {
        Self { service }
    }

    pub async fn generate(&self, image: &UploadedImage, style_key: &str) -> Result<GeneratedImage, CardError> {
        let style = FrameStyle::resolve(style_key);
        let request = build_request(image, style);
        tracing::info!(
            style = %style,
            mime = %image.mime_type,
            size = image.bytes.len(),
            "requesting card generation"
        );

        let response = self.service.generate_content(&request).await.map_err(|err| {
            tracing::error!(error = ?err, "image generation request failed");
            CardError::GenerationFailed(format!("{err:#}"))
        })?;

        extract_image(&response)
    }
}

pub fn build_request(image: &UploadedImage, style: FrameStyle) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::inline(image.mime_type.clone(), image.to_base64()),
                Part::text(style.prompt()),
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: vec![Modality::Image, Modality::Text],
        }),
    }
}

/// First inline image wins; text parts are diagnostics only.
pub fn extract_image(response: &GenerateContentResponse) -> Result<GeneratedImage, CardError> {
    let text = response.text();
    if !text.is_empty() {
        tracing::debug!(text = %text, "service returned text");
    }

    if let Some(inline) = response.first_inline_image() {
        let image = GeneratedImage::from_base64(&inline.data, inline.mime_type.clone())?;
        tracing::info!(mime = %image.mime_type, size = image.bytes.len(), "card image generated");
        return Ok(image);
    }

    let reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
        .or_else(|| {
            response
                .candidates
                .iter()
                .find_map(|candidate| candidate.finish_reason.clone())
                .filter(|reason| reason != "STOP")
        });
    tracing::warn!(reason = ?reason, "service returned no image");
    let message = match reason {
        Some(reason) => format!("service returned no image ({reason})"),
        None => "service returned no image".to_string(),
    };
    Err(CardError::GenerationFailed(message))
}
