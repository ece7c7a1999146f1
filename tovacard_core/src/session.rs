use crate::error::CardError;
use crate::media::{GeneratedImage, UploadedImage};
use crate::pipeline::GenerationPipeline;

/// The three mutually exclusive screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Upload,
    Loading,
    Result,
}

/// Inputs captured when a generation starts.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub image: UploadedImage,
    pub style: String,
}

/// Everything the user has picked so far plus which view is showing.
/// Owned by the UI thread; background work hands results back through
/// [`CardSession::complete_generation`].
#[derive(Debug, Default)]
pub struct CardSession {
    view: ViewState,
    uploaded: Option<UploadedImage>,
    style: Option<String>,
    generated: Option<GeneratedImage>,
}

impl CardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Only the generation transitions and `reset` switch views, which keeps a
    /// generated image present exactly while the result view is shown.
    fn show_view(&mut self, target: ViewState) {
        if self.view != target {
            tracing::debug!(from = ?self.view, to = ?target, "view change");
        }
        self.view = target;
    }

    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        self.generated.as_ref()
    }

    pub fn set_image(&mut self, image: UploadedImage) {
        self.uploaded = Some(image);
    }

    /// Any key is accepted; a blank one clears the selection.
    pub fn set_style(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.style = if key.trim().is_empty() { None } else { Some(key) };
    }

    pub fn clear_style(&mut self) {
        self.style = None;
    }

    pub fn can_generate(&self) -> bool {
        self.uploaded.is_some() && self.style.is_some()
    }

    pub fn is_generating(&self) -> bool {
        self.view == ViewState::Loading
    }

    /// Switches to the loading view and hands out the inputs, or returns
    /// `None` when there is nothing to generate or a job is already running.
    pub fn begin_generation(&mut self) -> Option<GenerationJob> {
        if !self.can_generate() || self.is_generating() {
            return None;
        }
        let job = GenerationJob {
            image: self.uploaded.clone()?,
            style: self.style.clone()?,
        };
        self.generated = None;
        self.show_view(ViewState::Loading);
        Some(job)
    }

    /// Applies the outcome of a generation. Failures return the session to
    /// the upload view and are handed back for the caller to report.
    pub fn complete_generation(&mut self, result: Result<GeneratedImage, CardError>) -> Result<(), CardError> {
        match result {
            Ok(image) => {
                self.generated = Some(image);
                self.show_view(ViewState::Result);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed; back to upload");
                self.generated = None;
                self.show_view(ViewState::Upload);
                Err(err)
            }
        }
    }

    /// Runs a whole generation in place.
    pub async fn generate_with(&mut self, pipeline: &GenerationPipeline) -> Result<(), CardError> {
        let job = self
            .begin_generation()
            .ok_or_else(|| CardError::GenerationFailed("select a photo and a style first".into()))?;
        let result = pipeline.generate(&job.image, &job.style).await;
        self.complete_generation(result)
    }

    pub fn reset(&mut self) {
        self.uploaded = None;
        self.style = None;
        self.generated = None;
        self.show_view(ViewState::Upload);
    }
}
