//! Built-in defaults used when neither the CLI nor a settings file overrides them.

/// Default vision model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default ceiling on response tokens.
pub const DEFAULT_MAX_TOKENS: i64 = 2000;

/// Deterministic extraction by default.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Accepted temperature range, inclusive on both ends.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_IMAGES_FOLDER: &str = "images";

pub const DEFAULT_OUTPUT_FILE: &str = "extracted_data_gpt_all.csv";

pub const DEFAULT_ENV_FILE: &str = ".env";
