//! Application configuration facade.
//!
//! Composes the environment, image folder, and API settings into one unit.
//! `validate` checks them in a fixed order and stops at the first failure:
//! credential, image folder, API settings, then the field list.

use std::fmt;
use std::path::{Path, PathBuf};

use imgextract_core::{ConfigError, FieldList, ImageRef, DEFAULT_FIELDS};

use crate::api::ApiSettings;
use crate::defaults::DEFAULT_OUTPUT_FILE;
use crate::env::EnvConfig;
use crate::images::ImageFolderConfig;
use crate::io::FileSettings;
use crate::redact::mask_secret;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: EnvConfig,
    pub images: ImageFolderConfig,
    pub api: ApiSettings,
    pub output_file: PathBuf,
    pub extract_fields: Vec<String>,
}

impl AppConfig {
    pub fn new(env: EnvConfig) -> Self {
        Self {
            env,
            images: ImageFolderConfig::default(),
            api: ApiSettings::default(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extract_fields: DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_images_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.images.set_folder(folder);
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extract_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_api(mut self, api: ApiSettings) -> Self {
        self.api = api;
        self
    }

    /// Overlay values from a settings file; keys the file omits are untouched.
    pub fn apply_settings(mut self, settings: FileSettings) -> Self {
        if let Some(folder) = settings.images_folder {
            self.images.set_folder(folder);
        }
        if let Some(output) = settings.output_file {
            self.output_file = output;
        }
        if let Some(fields) = settings.extract_fields {
            self.extract_fields = fields;
        }
        if let Some(model) = settings.model {
            self.api.model = model;
        }
        if let Some(max_tokens) = settings.max_tokens {
            self.api.max_tokens = max_tokens;
        }
        if let Some(temperature) = settings.temperature {
            self.api.temperature = temperature;
        }
        if let Some(base_url) = settings.base_url {
            self.api.base_url = base_url;
        }
        self
    }

    /// Run every sub-validation in order and return the resolved run inputs.
    pub fn validate(&self) -> Result<ResolvedConfig, ConfigError> {
        let credential = self.env.credential()?;
        let images = self.images.list_images()?;
        self.api.validate()?;
        let fields = FieldList::new(self.extract_fields.iter().cloned())?;

        Ok(ResolvedConfig {
            credential,
            images,
            api: self.api.clone(),
            fields,
            output_file: self.output_file.clone(),
        })
    }
}

/// Validated inputs for one batch run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    credential: String,
    images: Vec<ImageRef>,
    api: ApiSettings,
    fields: FieldList,
    output_file: PathBuf,
}

impl ResolvedConfig {
    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "api_key={}, model={}, max_tokens={}, temperature={}, images={}, fields=[{}], output_file={}",
            mask_secret(&self.credential),
            self.api.model,
            self.api.max_tokens,
            self.api.temperature,
            self.images.len(),
            self.fields,
            self.output_file.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::API_KEY_VAR;
    use std::collections::HashMap;
    use std::fs;

    fn env_with_key(key: Option<&str>) -> EnvConfig {
        let mut vars = HashMap::new();
        if let Some(k) = key {
            vars.insert(API_KEY_VAR.to_string(), k.to_string());
        }
        EnvConfig::from_vars(vars)
    }

    fn folder_with_image() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test.png"), "x").unwrap();
        dir
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::new(env_with_key(Some("sk-test123")));
        assert_eq!(cfg.output_file, PathBuf::from("extracted_data_gpt_all.csv"));
        assert_eq!(cfg.extract_fields, ["filename", "email", "firstname", "name"]);
        assert_eq!(cfg.images.folder(), Path::new("images"));
    }

    #[test]
    fn validate_success() {
        let dir = folder_with_image();
        let resolved = AppConfig::new(env_with_key(Some("sk-test123456")))
            .with_images_folder(dir.path())
            .with_fields(["email", "name"])
            .validate()
            .unwrap();
        assert_eq!(resolved.credential(), "sk-test123456");
        assert_eq!(resolved.images().len(), 1);
        assert_eq!(resolved.fields().names(), ["email", "name"]);
        let shown = resolved.to_string();
        assert!(shown.contains("***3456"));
        assert!(!shown.contains("sk-test"));
    }

    #[test]
    fn credential_checked_before_folder() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::new(env_with_key(None))
            .with_images_folder(dir.path().join("missing"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::CredentialMissing { .. }));
    }

    #[test]
    fn folder_checked_before_api_settings() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::new(env_with_key(Some("sk-test123")))
            .with_images_folder(dir.path())
            .with_api(ApiSettings::default().with_max_tokens(0))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoImagesFound(_)));
    }

    #[test]
    fn api_settings_checked_before_fields() {
        let dir = folder_with_image();
        let err = AppConfig::new(env_with_key(Some("sk-test123")))
            .with_images_folder(dir.path())
            .with_api(ApiSettings::default().with_temperature(3.0))
            .with_fields(Vec::<String>::new())
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemperature(_)));
    }

    #[test]
    fn duplicate_fields_rejected() {
        let dir = folder_with_image();
        let err = AppConfig::new(env_with_key(Some("sk-test123")))
            .with_images_folder(dir.path())
            .with_fields(["email", "email"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFields(_)));
    }

    #[test]
    fn settings_file_overlays_defaults() {
        let cfg = AppConfig::new(env_with_key(Some("sk-test123"))).apply_settings(FileSettings {
            model: Some("gpt-4o-mini".into()),
            max_tokens: Some(500),
            output_file: Some("out.csv".into()),
            ..Default::default()
        });
        assert_eq!(cfg.api.model, "gpt-4o-mini");
        assert_eq!(cfg.api.max_tokens, 500);
        assert_eq!(cfg.api.temperature, 0.0);
        assert_eq!(cfg.output_file, PathBuf::from("out.csv"));
    }
}
