//! Image folder discovery.

use std::fmt;
use std::path::{Path, PathBuf};

use imgextract_core::{ConfigError, ImageRef};
use tracing::debug;

use crate::defaults::DEFAULT_IMAGES_FOLDER;

/// Extensions accepted by the scanner, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFolderConfig {
    folder: PathBuf,
}

impl ImageFolderConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) {
        self.folder = folder.into();
    }

    /// Fails if the folder is absent or holds no supported images.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.list_images().map(|_| ())
    }

    /// Supported images in the folder, sorted by file name.
    ///
    /// Only direct children are considered; subdirectories are not walked.
    pub fn list_images(&self) -> Result<Vec<ImageRef>, ConfigError> {
        if !self.folder.is_dir() {
            return Err(ConfigError::FolderNotFound(self.folder.clone()));
        }
        let entries = std::fs::read_dir(&self.folder)
            .map_err(|_| ConfigError::FolderNotFound(self.folder.clone()))?;

        let mut images: Vec<ImageRef> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_supported(path))
            .map(ImageRef::new)
            .collect();
        images.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        if images.is_empty() {
            return Err(ConfigError::NoImagesFound(self.folder.clone()));
        }
        debug!(folder = %self.folder.display(), count = images.len(), "Discovered images");
        Ok(images)
    }
}

impl Default for ImageFolderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES_FOLDER)
    }
}

impl fmt::Display for ImageFolderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageFolderConfig(folder_path={})", self.folder.display())
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
