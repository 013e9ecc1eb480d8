//! Structured logging for imgextract.
//!
//! Console output plus an optional daily-rolling NDJSON file, and scrubbing
//! of API keys from strings that end up in log lines.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
