use std::path::PathBuf;

use thiserror::Error;

/// Setup failures. Any of these aborts the run before the first API call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set. Create a .env file containing {var}=sk-...")]
    CredentialMissing { var: String },

    #[error("{var} is invalid. Check the API key in your environment or .env file")]
    CredentialInvalid { var: String },

    #[error("image folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("no image files found in {} (supported: .png, .jpg, .jpeg, .bmp, .tiff)", .0.display())]
    NoImagesFound(PathBuf),

    #[error("max_tokens must be a positive integer: {0}")]
    InvalidMaxTokens(i64),

    #[error("temperature must be in the range 0.0 to 2.0: {0}")]
    InvalidTemperature(f32),

    #[error("invalid extraction fields: {0}")]
    InvalidFields(String),

    #[error("settings file {}: {message}", .path.display())]
    SettingsFile { path: PathBuf, message: String },
}

/// Per-image failures. The batch records these and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read image {}: {message}", .path.display())]
    ImageRead { path: PathBuf, message: String },

    #[error("vision API call failed ({provider}): {message}")]
    ApiCall { provider: String, message: String },

    #[error("could not parse response for {}: {message}", .path.display())]
    ResponseParse { path: PathBuf, message: String },
}

impl ExtractError {
    /// Short label used in log lines and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::ImageRead { .. } => "image_read",
            ExtractError::ApiCall { .. } => "api_call",
            ExtractError::ResponseParse { .. } => "response_parse",
        }
    }
}
