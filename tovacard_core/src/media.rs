use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fs;
use std::path::Path;

use crate::error::CardError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// The photo picked by the user, kept exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl UploadedImage {
    pub fn from_bytes(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Reads a file from disk. No format or size validation happens here;
    /// the service decides what it accepts.
    pub fn from_path(path: &Path) -> Result<Self, CardError> {
        let bytes = fs::read(path)
            .map_err(|err| CardError::FileReadFailed(format!("{}: {err}", path.display())))?;
        let mime_type = detect_mime(&bytes, path);
        tracing::info!(
            path = %path.display(),
            size = bytes.len(),
            mime = %mime_type,
            "image selected"
        );
        Ok(Self { bytes, mime_type })
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

/// Image returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> Result<Self, CardError> {
        let bytes = BASE64
            .decode(data.trim().as_bytes())
            .map_err(|err| CardError::GenerationFailed(format!("invalid inline image data: {err}")))?;
        Ok(Self {
            bytes,
            mime_type: mime_type.into(),
        })
    }
}

/// Magic bytes first, then the extension, then a generic binary type.
pub fn detect_mime(bytes: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let mime = match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => FALLBACK_MIME,
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn from_path_sniffs_content_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::File::create(&path).unwrap().write_all(PNG_MAGIC).unwrap();

        let image = UploadedImage::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, PNG_MAGIC);
    }

    #[test]
    fn unknown_content_falls_back_to_extension() {
        assert_eq!(detect_mime(b"not an image", Path::new("a.WEBP")), "image/webp");
        assert_eq!(detect_mime(b"not an image", Path::new("notes")), FALLBACK_MIME);
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadedImage::from_path(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, CardError::FileReadFailed(_)));
    }

    #[test]
    fn base64_transport_encoding() {
        let image = UploadedImage::from_bytes(b"hello".to_vec(), "image/png");
        assert_eq!(image.to_base64(), "aGVsbG8=");

        let generated = GeneratedImage::from_base64("aGVsbG8=\n", "image/png").unwrap();
        assert_eq!(generated.bytes, b"hello");
        assert!(matches!(
            GeneratedImage::from_base64("***", "image/png"),
            Err(CardError::GenerationFailed(_))
        ));
    }
}
