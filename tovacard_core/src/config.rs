use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CardError;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TovacardConfig {
    /// Secret key for the image generation service
    pub api_key: Option<String>,
    pub service: ServiceConfig,
    pub card: CardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the generateContent API, without the `/models/...` suffix
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// A zero timeout would fail every request, so it falls back to the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Font used for the caption band; system fonts are searched when unset
    pub font_path: Option<PathBuf>,
    /// Directory the save dialog opens in
    pub output_dir: PathBuf,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            output_dir: default_output_dir(),
        }
    }
}

impl TovacardConfig {
    /// Reads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(explicit) = non_empty_var("TOVACARD_CONFIG") {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|dir| dir.join("tovacard").join("config.toml"))
    }

    pub fn apply_env(&mut self) {
        if let Some(key) = non_empty_var("TOVACARD_API_KEY").or_else(|| non_empty_var("GEMINI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty_var("TOVACARD_API_URL") {
            self.service.api_url = url;
        }
        if let Some(model) = non_empty_var("TOVACARD_MODEL") {
            self.service.model = model;
        }
        if let Some(raw) = non_empty_var("TOVACARD_TIMEOUT_SECS") {
            match parse_timeout_secs(&raw) {
                Some(secs) => self.service.timeout_secs = secs,
                None => tracing::warn!(value = %raw, "ignoring TOVACARD_TIMEOUT_SECS; expected a positive number of seconds"),
            }
        }
        if let Some(font) = non_empty_var("TOVACARD_FONT") {
            self.card.font_path = Some(PathBuf::from(font));
        }
        if let Some(dir) = non_empty_var("TOVACARD_OUTPUT_DIR") {
            self.card.output_dir = PathBuf::from(dir);
        }
    }

    /// The API key, or an initialization failure when it is missing.
    pub fn require_api_key(&self) -> Result<&str, CardError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(CardError::InitializationFailed(
                "no API key configured; set GEMINI_API_KEY or api_key in the config file".into(),
            )),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().filter(|secs| *secs > 0)
}

fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = TovacardConfig::from_toml_str("").unwrap();
        assert_eq!(config.service.api_url, DEFAULT_API_URL);
        assert_eq!(config.service.model, DEFAULT_MODEL);
        assert_eq!(config.service.timeout(), Duration::from_secs(120));
        assert!(config.api_key.is_none());
        assert!(config.card.font_path.is_none());
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let config = TovacardConfig::from_toml_str(
            r#"
            api_key = "secret"

            [service]
            model = "custom-image-model"

            [card]
            font_path = "/fonts/serif-bold.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.service.model, "custom-image-model");
        assert_eq!(config.service.api_url, DEFAULT_API_URL);
        assert_eq!(config.card.font_path, Some(PathBuf::from("/fonts/serif-bold.ttf")));
    }

    #[test]
    fn zero_timeout_keeps_the_default() {
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
        assert_eq!(parse_timeout_secs("-5"), None);
        assert_eq!(parse_timeout_secs("45"), Some(45));

        let config = TovacardConfig::from_toml_str("[service]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.service.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn blank_api_key_is_an_initialization_failure() {
        let config = TovacardConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, CardError::InitializationFailed(_)));
        assert!(err.is_fatal());
    }
}
