use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Column that is always filled from the source image, never from the model.
pub const FILENAME_FIELD: &str = "filename";

/// Default extraction columns, in CSV order.
pub const DEFAULT_FIELDS: [&str; 4] = [FILENAME_FIELD, "email", "firstname", "name"];

/// One discoverable input image.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: PathBuf,
    /// Lowercased extension without the dot.
    pub extension: String,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self { path, extension }
    }

    /// Final path component, used to tag extraction records.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Ordered list of extraction columns.
///
/// Guaranteed to name at least one model-extracted field, without blank or
/// duplicate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldList(Vec<String>);

impl FieldList {
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(|n| n.into().trim().to_string()).collect();
        if names.is_empty() {
            return Err(ConfigError::InvalidFields("field list is empty".into()));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(ConfigError::InvalidFields("field names cannot be blank".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidFields(format!("duplicate field '{name}'")));
            }
        }
        if names.iter().all(|n| n == FILENAME_FIELD) {
            return Err(ConfigError::InvalidFields(format!(
                "at least one field besides '{FILENAME_FIELD}' is required"
            )));
        }
        Ok(Self(names))
    }

    /// Parse a comma-separated list such as `filename,email,name`.
    pub fn parse_list(s: &str) -> Result<Self, ConfigError> {
        Self::new(s.split(','))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Fields the model is asked for (everything except `filename`).
    pub fn requested(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str).filter(|n| *n != FILENAME_FIELD)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FieldList {
    fn default() -> Self {
        Self(DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Transport-safe image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub base64: String,
}

impl EncodedImage {
    /// `data:` URL suitable for an `image_url` content part.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// One structured row derived from a single entry of a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    filename: String,
    values: Vec<(String, Option<String>)>,
}

impl ExtractionRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            values: Vec::new(),
        }
    }

    /// Set a model-provided field. `filename` is ignored here.
    pub fn with_value(mut self, field: impl Into<String>, value: Option<String>) -> Self {
        let field = field.into();
        if field == FILENAME_FIELD {
            return self;
        }
        match self.values.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.values.push((field, value)),
        }
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Value of a column. `filename` always resolves to the source image.
    pub fn get(&self, field: &str) -> Option<&str> {
        if field == FILENAME_FIELD {
            return Some(&self.filename);
        }
        self.values
            .iter()
            .find(|(k, _)| k == field)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.get("firstname")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.get("name")
    }

    /// Cells in `fields` order; missing values become empty strings.
    pub fn to_row(&self, fields: &FieldList) -> Vec<String> {
        fields
            .names()
            .iter()
            .map(|f| self.get(f).unwrap_or_default().to_string())
            .collect()
    }
}

/// Aggregate outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Records in accumulation order.
    pub records: Vec<ExtractionRecord>,
    pub total_images: usize,
    /// File names of images whose extraction failed.
    pub failed_images: Vec<String>,
    /// File names of images that succeeded but yielded no records.
    pub empty_images: Vec<String>,
}

impl BatchResult {
    pub fn successful_images(&self) -> usize {
        self.total_images.saturating_sub(self.failed_images.len())
    }

    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Percentage of attempted images that did not fail; 0.0 for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total_images == 0 {
            return 0.0;
        }
        self.successful_images() as f64 / self.total_images as f64 * 100.0
    }
}
