use rusttype::Font;
use std::fs;
use std::path::{Path, PathBuf};

use crate::composer::CAPTION_TEXT;
use crate::error::CardError;

/// Bold serif faces with Hebrew coverage, in order of preference.
const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/freefont/FreeSerifBold.ttf",
    "/usr/share/fonts/opentype/freefont/FreeSerifBold.otf",
    "/usr/share/fonts/truetype/noto/NotoSerifHebrew-Bold.ttf",
    "/usr/share/fonts/noto/NotoSerifHebrew-Bold.ttf",
    "/usr/share/fonts/truetype/culmus/FrankRuehlCLM-Bold.ttf",
    "/usr/share/fonts/culmus/FrankRuehlCLM-Bold.otf",
    "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
    "C:\\Windows\\Fonts\\timesbd.ttf",
];

/// Shipped with the binary so the greeting can always be drawn.
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");
const BUNDLED_FONT_NAME: &str = "DejaVuSans-Bold.ttf (bundled)";

/// Font used to draw the caption band.
pub struct CaptionFont {
    font: Font<'static>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont").field("source", &self.source()).finish()
    }
}

impl CaptionFont {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path)
            .map_err(|err| anyhow::anyhow!("failed to read font {}: {err}", path.display()))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| anyhow::anyhow!("{} is not a usable font", path.display()))?;
        Ok(Self {
            font,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn bundled() -> Result<Self, CardError> {
        let font = Font::try_from_bytes(BUNDLED_FONT)
            .ok_or_else(|| CardError::InitializationFailed("bundled caption font is corrupt".into()))?;
        Ok(Self { font, path: None })
    }

    /// Tries the configured font first, then well-known system serif faces,
    /// then the bundled font. Fonts lacking glyphs for the caption are skipped.
    pub fn discover(configured: Option<&Path>) -> Result<Self, CardError> {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) if font.covers(CAPTION_TEXT) => return Ok(font),
                Ok(_) => tracing::warn!(path = %path.display(), "configured font lacks caption glyphs"),
                Err(err) => tracing::warn!(error = %err, "configured caption font unavailable"),
            }
        }

        let system = SYSTEM_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|path| path.exists())
            .filter_map(|path| Self::load(path).ok())
            .find(|font| font.covers(CAPTION_TEXT));
        let font = match system {
            Some(font) => font,
            None => Self::bundled()?,
        };
        tracing::info!(source = %font.source(), "using caption font");
        Ok(font)
    }

    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .filter(|ch| !ch.is_whitespace())
            .all(|ch| self.font.glyph(ch).id().0 != 0)
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    /// File the font was loaded from; `None` for the bundled font.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn source(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => BUNDLED_FONT_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_font_covers_the_greeting() {
        let font = CaptionFont::bundled().unwrap();
        assert!(font.covers(CAPTION_TEXT));
        assert!(font.path().is_none());
    }

    #[test]
    fn unusable_configured_font_still_yields_a_caption_font() {
        let dir = tempfile::tempdir().unwrap();
        let junk = dir.path().join("junk.ttf");
        fs::write(&junk, b"not a font").unwrap();

        for configured in [junk, dir.path().join("missing.ttf")] {
            let font = CaptionFont::discover(Some(configured.as_path())).unwrap();
            assert!(font.covers(CAPTION_TEXT));
            assert_ne!(font.path(), Some(configured.as_path()));
        }
    }

    #[test]
    fn configured_font_with_hebrew_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caption.ttf");
        fs::write(&path, BUNDLED_FONT).unwrap();

        let font = CaptionFont::discover(Some(path.as_path())).unwrap();
        assert_eq!(font.path(), Some(path.as_path()));
    }
}
