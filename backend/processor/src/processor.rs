use std::path::PathBuf;

use anyhow::Result;
use imgextract_core::{BatchResult, ExtractionRecord, FieldList, ImageRef};
use imgextract_logging::redact_sensitive_data;
use imgextract_understanding::Extractor;
use tracing::{error, info, warn};

/// Sample rows logged per image in verbose mode.
const MAX_SAMPLE_RECORDS: usize = 3;

/// Drives the extractor over a batch of images, strictly one at a time.
pub struct DataProcessor {
    extractor: Extractor,
    fields: FieldList,
    output_file: PathBuf,
    verbose: bool,
}

impl DataProcessor {
    pub fn new(extractor: Extractor, fields: FieldList, output_file: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            fields,
            output_file: output_file.into(),
            verbose: true,
        }
    }

    /// Toggle per-image progress lines and sample rows.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Process every image in order.
    ///
    /// A failing image is logged, named in `failed_images`, and skipped; it
    /// never aborts the batch. An image that succeeds with zero rows lands in
    /// `empty_images` instead.
    pub async fn process_images(&self, images: &[ImageRef]) -> BatchResult {
        let total = images.len();
        let mut result = BatchResult {
            total_images: total,
            ..Default::default()
        };

        for (i, image) in images.iter().enumerate() {
            let name = image.file_name();
            if self.verbose {
                info!("Processing ({}/{}): {}", i + 1, total, name);
            }

            match self.extractor.extract_all(image, &self.fields).await {
                Ok(records) if records.is_empty() => {
                    if self.verbose {
                        warn!(file = %name, "No records found");
                    }
                    result.empty_images.push(name);
                }
                Ok(records) => {
                    if self.verbose {
                        info!(file = %name, records = records.len(), "Extracted {} records", records.len());
                        self.log_sample_records(&records);
                    }
                    result.records.extend(records);
                }
                Err(e) => {
                    error!(
                        file = %name,
                        kind = e.kind(),
                        "Error: {}",
                        redact_sensitive_data(&e.to_string())
                    );
                    result.failed_images.push(name);
                }
            }
        }

        result
    }

    fn log_sample_records(&self, records: &[ExtractionRecord]) {
        for (j, record) in records.iter().take(MAX_SAMPLE_RECORDS).enumerate() {
            let shown: Vec<&str> = self
                .fields
                .names()
                .iter()
                .take(2)
                .filter_map(|f| record.get(f))
                .filter(|v| !v.is_empty())
                .collect();
            info!("    {}. {}", j + 1, shown.join(" - "));
        }
        if records.len() > MAX_SAMPLE_RECORDS {
            info!("    ... and {} more", records.len() - MAX_SAMPLE_RECORDS);
        }
    }

    /// Write `records` to the configured output file, replacing it.
    pub fn save_to_csv(&self, records: &[ExtractionRecord]) -> Result<()> {
        crate::csv_sink::save_to_csv(records, &self.fields, &self.output_file)
    }

    pub fn log_summary(&self, result: &BatchResult) {
        crate::summary::log_summary(result, &self.output_file);
    }
}
