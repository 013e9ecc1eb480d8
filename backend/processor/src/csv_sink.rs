//! CSV persistence for extraction records.

use std::path::Path;

use anyhow::{Context, Result};
use imgextract_core::{ExtractionRecord, FieldList};
use tracing::info;

/// Write a header row of `fields`, then one row per record in the given order.
///
/// The destination is truncated first, so every run starts from a clean
/// file. Zero records still produce a header-only file.
pub fn save_to_csv(records: &[ExtractionRecord], fields: &FieldList, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer
        .write_record(fields.names())
        .context("Failed to write CSV header")?;
    for record in records {
        writer
            .write_record(record.to_row(fields))
            .with_context(|| format!("Failed to write CSV row for {}", record.filename()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "Wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_for_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_to_csv(&[], &FieldList::default(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "filename,email,firstname,name\n");
    }

    #[test]
    fn overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale,data\n1,2\n3,4\n").unwrap();

        let record = ExtractionRecord::new("a.png").with_value("email", Some("a@x.io".into()));
        save_to_csv(&[record], &FieldList::default(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "filename,email,firstname,name\na.png,a@x.io,,\n");
    }

    #[test]
    fn quotes_values_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let fields = FieldList::parse_list("filename,name").unwrap();
        let record = ExtractionRecord::new("a.png").with_value("name", Some("Lee, Ann".into()));
        save_to_csv(&[record], &fields, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("a.png,\"Lee, Ann\"\n"));
    }

    #[test]
    fn unwritable_destination_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        assert!(save_to_csv(&[], &FieldList::default(), &path).is_err());
    }
}
