// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resolution used to map image pixels to PDF points (pixels per inch).
    pub dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    pub document_title: String,
    /// Re-open the written PDF and check its page count.
    pub verify_output: bool,
    /// Accepted input extensions, compared case-insensitively.
    pub jpeg_extensions: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dpi: 100.0,
            document_title: "Blattwerk Document".into(),
            verify_output: true,
            jpeg_extensions: vec!["jpg".into(), "jpeg".into()],
        }
    }
}

impl AppConfig {
    /// Load the configuration from `path`.
    ///
    /// `Ok(None)` when the file does not exist; an unreadable or malformed
    /// file is an error so the caller can report it before using defaults.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Persist the configuration as pretty JSON inside `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// Whether `ext` (without the dot) is an accepted input extension.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.jpeg_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlattwerkError;

    #[test]
    fn defaults_use_100_dpi() {
        let config = AppConfig::default();
        assert_eq!(config.dpi, 100.0);
        assert!(config.verify_output);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            dpi: 150.0,
            document_title: "Receipts".into(),
            ..AppConfig::default()
        };
        config.save(dir.path()).unwrap();
        let loaded = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, BlattwerkError::Serialization(_)));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "dpi": 72.0 }"#).unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE))
            .unwrap()
            .unwrap();
        assert_eq!(config.dpi, 72.0);
        assert_eq!(config.document_title, "Blattwerk Document");
    }

    #[test]
    fn extension_match_ignores_case() {
        let config = AppConfig::default();
        assert!(config.accepts_extension("JPG"));
        assert!(config.accepts_extension("Jpeg"));
        assert!(!config.accepts_extension("png"));
    }
}
