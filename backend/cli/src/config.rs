use std::path::PathBuf;

use clap::Parser;
use imgextract_config::defaults::DEFAULT_ENV_FILE;
use imgextract_config::{load_settings, AppConfig, EnvConfig};
use imgextract_core::ConfigError;

/// Command-line arguments. Flags override the settings file, which overrides
/// built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "imgextract")]
#[command(about = "Extract table rows from images with a vision model and write them to CSV")]
#[command(version)]
pub struct CliArgs {
    /// .env file to read the API key from (missing file is fine)
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Folder containing the images to process
    #[arg(short, long)]
    pub images: Option<PathBuf>,

    /// CSV file to write (overwritten on every run)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated output columns, e.g. filename,email,firstname,name
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Vision model name
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum response tokens per image
    #[arg(long, allow_negative_numbers = true)]
    pub max_tokens: Option<i64>,

    /// Sampling temperature, 0.0 to 2.0
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f32>,

    /// OpenAI-compatible API root
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also write JSON logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Skip per-image progress lines and sample rows
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Resolve the environment once, then layer settings file and flags.
    pub async fn load_app_config(&self) -> Result<AppConfig, ConfigError> {
        let env = EnvConfig::load(&self.env_file).await?;
        let mut config = AppConfig::new(env);
        if let Some(path) = &self.config {
            config = config.apply_settings(load_settings(path).await?);
        }
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(folder) = &self.images {
            config = config.with_images_folder(folder.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output_file(output.clone());
        }
        if let Some(fields) = &self.fields {
            config = config.with_fields(fields.iter().cloned());
        }
        if let Some(model) = &self.model {
            config.api.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.api.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.api.temperature = temperature;
        }
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        config
    }
}
