//! `imgextract-config`: run configuration for imgextract.
//!
//! Provides:
//! - Credential lookup over an injected variable map (process env + `.env`)
//! - Image folder discovery with a fixed extension set
//! - Vision API settings with range validation
//! - The `AppConfig` facade that validates everything in order
//! - Optional YAML settings file
//! - Secret masking for display

pub mod api;
pub mod app;
pub mod defaults;
pub mod env;
pub mod images;
pub mod io;
pub mod redact;

pub use api::ApiSettings;
pub use app::{AppConfig, ResolvedConfig};
pub use env::{parse_dotenv, EnvConfig, API_KEY_VAR};
pub use images::{ImageFolderConfig, SUPPORTED_EXTENSIONS};
pub use io::{load_settings, FileSettings};
pub use redact::mask_secret;
