use thiserror::Error;

/// Failures surfaced to the user. Each variant maps to one recovery path in
/// the UI: generation failures send the user back to the upload view, the
/// rest leave the previous state in place, and initialization failures stop
/// the application from showing anything but the error.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("failed to read the selected file: {0}")]
    FileReadFailed(String),
    #[error("card generation failed: {0}")]
    GenerationFailed(String),
    #[error("failed to load the generated image: {0}")]
    ImageLoadFailed(String),
    #[error("failed to export the card: {0}")]
    ExportFailed(String),
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
}

impl CardError {
    /// Short title for dialogs.
    pub fn title(&self) -> &'static str {
        match self {
            Self::FileReadFailed(_) => "Could not read file",
            Self::GenerationFailed(_) => "Generation failed",
            Self::ImageLoadFailed(_) => "Could not load image",
            Self::ExportFailed(_) => "Could not save card",
            Self::InitializationFailed(_) => "Startup failed",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InitializationFailed(_))
    }
}
