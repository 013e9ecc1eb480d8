//! Optional YAML settings file.
//!
//! Every key is optional; absent keys keep the built-in defaults and CLI
//! flags override whatever the file sets.

use std::path::{Path, PathBuf};

use imgextract_core::ConfigError;
use serde::Deserialize;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub images_folder: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub extract_fields: Option<Vec<String>>,
    pub model: Option<String>,
    pub max_tokens: Option<i64>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

/// Read and parse a settings file. Unlike `.env`, a missing file is an error
/// because it was asked for explicitly.
pub async fn load_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| settings_error(path, format!("failed to read: {e}")))?;

    // An empty document deserializes as unit, not as an empty map.
    if raw.trim().is_empty() {
        return Ok(FileSettings::default());
    }

    let settings: FileSettings = serde_yaml::from_str(&raw)
        .map_err(|e| settings_error(path, format!("failed to parse YAML: {e}")))?;

    info!(path = %path.display(), "Loaded settings file");
    Ok(settings)
}

fn settings_error(path: &Path, message: String) -> ConfigError {
    ConfigError::SettingsFile {
        path: path.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imgextract.yaml");
        std::fs::write(
            &path,
            "images_folder: scans\nextract_fields: [filename, email]\ntemperature: 0.2\n",
        )
        .unwrap();

        let s = load_settings(&path).await.unwrap();
        assert_eq!(s.images_folder, Some(PathBuf::from("scans")));
        assert_eq!(s.extract_fields, Some(vec!["filename".to_string(), "email".to_string()]));
        assert_eq!(s.temperature, Some(0.2));
        assert!(s.model.is_none());
    }

    #[tokio::test]
    async fn empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_settings(&path).await.unwrap(), FileSettings::default());
    }

    #[tokio::test]
    async fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.yaml");
        std::fs::write(&path, "max_token: 10\n").unwrap();
        let err = load_settings(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::SettingsFile { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(&dir.path().join("nope.yaml")).await.is_err());
    }
}
