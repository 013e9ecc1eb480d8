//! Batch processing: run the extractor over every image, persist the rows,
//! and report what happened.

pub mod csv_sink;
pub mod processor;
pub mod summary;

pub use csv_sink::save_to_csv;
pub use processor::DataProcessor;
pub use summary::{log_summary, summary_lines};
