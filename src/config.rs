//! OCR settings.
//!
//! Loads settings from ocr_config.json next to the executable, then applies
//! environment overrides. Every field is optional; an absent tessdata path
//! means the bundled resources are searched.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Environment variable holding an explicit tessdata directory.
pub const ENV_TESSDATA: &str = "TESSDATA";
/// Environment variable holding the tesseract executable path.
pub const ENV_TESSERACT_EXE: &str = "TESSERACT_EXE";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Directory containing eng.traineddata and fra.traineddata directly.
    #[serde(default)]
    pub tessdata_path: Option<String>,
    /// Tesseract executable; searched on PATH when absent.
    #[serde(default)]
    pub tesseract_path: Option<PathBuf>,
}

impl OcrSettings {
    /// Loads settings from `path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        tracing::debug!("Looking for OCR settings at: {}", path.display());

        if !path.exists() {
            tracing::debug!("{} not found. Using default settings.", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!("OCR settings loaded from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Overrides fields from variables returned by `lookup`. Blank values
    /// are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(tessdata) = non_blank(ENV_TESSDATA) {
            tracing::debug!("{} overrides tessdata path: {}", ENV_TESSDATA, tessdata);
            self.tessdata_path = Some(tessdata);
        }
        if let Some(exe) = non_blank(ENV_TESSERACT_EXE) {
            tracing::debug!("{} overrides tesseract path: {}", ENV_TESSERACT_EXE, exe);
            self.tesseract_path = Some(PathBuf::from(exe));
        }
        self
    }
}

/// Loads settings from the default location with environment overrides.
pub fn load_settings() -> OcrSettings {
    OcrSettings::load_from(&paths::get_config_path())
        .with_overrides(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_config.json");
        fs::write(
            &path,
            r#"{"tessdata_path": "/opt/tessdata", "tesseract_path": "/usr/bin/tesseract"}"#,
        )
        .unwrap();

        let settings = OcrSettings::load_from(&path);
        assert_eq!(settings.tessdata_path.as_deref(), Some("/opt/tessdata"));
        assert_eq!(
            settings.tesseract_path,
            Some(PathBuf::from("/usr/bin/tesseract"))
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(OcrSettings::load_from(&path), OcrSettings::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_config.json");
        fs::write(&path, "{ tessdata_path: ").unwrap();

        assert_eq!(OcrSettings::load_from(&path), OcrSettings::default());
        assert_eq!(
            OcrSettings::load_from(&dir.path().join("absent.json")),
            OcrSettings::default()
        );
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_TESSDATA, "/srv/tessdata"),
            (ENV_TESSERACT_EXE, "  "),
        ]);
        let settings = OcrSettings {
            tessdata_path: Some("/opt/tessdata".to_string()),
            tesseract_path: Some(PathBuf::from("/usr/bin/tesseract")),
        }
        .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.tessdata_path.as_deref(), Some("/srv/tessdata"));
        assert_eq!(
            settings.tesseract_path,
            Some(PathBuf::from("/usr/bin/tesseract"))
        );
    }
}
