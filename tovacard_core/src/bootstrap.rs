use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TovacardConfig;
use crate::error::CardError;
use crate::fonts::CaptionFont;
use crate::gemini::GeminiClient;
use crate::pipeline::GenerationPipeline;

/// Long-lived collaborators shared by the UI and its background tasks.
#[derive(Clone)]
pub struct CardServices {
    pub pipeline: GenerationPipeline,
    pub caption_font: Arc<CaptionFont>,
    pub output_dir: PathBuf,
}

/// Builds the services from configuration. A missing API key stops here with
/// [`CardError::InitializationFailed`]. Without a usable configured or system
/// font the bundled one draws the caption.
pub fn initialize(config: &TovacardConfig) -> Result<CardServices, CardError> {
    let api_key = config.require_api_key()?;
    let client = GeminiClient::new(&config.service, api_key)
        .map_err(|err| CardError::InitializationFailed(format!("{err:#}")))?;
    tracing::info!(
        endpoint = %client.endpoint(),
        timeout_secs = config.service.timeout().as_secs(),
        "image generation service configured"
    );

    let caption_font = Arc::new(CaptionFont::discover(config.card.font_path.as_deref())?);

    Ok(CardServices {
        pipeline: GenerationPipeline::new(Arc::new(client)),
        caption_font,
        output_dir: config.card.output_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_initialization() {
        let config = TovacardConfig::default();
        match initialize(&config) {
            Err(CardError::InitializationFailed(message)) => assert!(message.contains("API key")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("initialization should fail without a key"),
        }
    }

    #[test]
    fn configured_key_builds_services() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TovacardConfig::default();
        config.api_key = Some("key".into());
        config.card.output_dir = dir.path().to_path_buf();
        config.card.font_path = Some(dir.path().join("missing.ttf"));

        let services = initialize(&config).unwrap();
        assert_eq!(services.output_dir, dir.path());
        assert!(services.caption_font.covers(crate::composer::CAPTION_TEXT));
    }
}
