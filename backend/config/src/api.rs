//! Vision API request settings.

use std::fmt;

use imgextract_core::ConfigError;

use crate::defaults::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, TEMPERATURE_RANGE,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub model: String,
    pub max_tokens: i64,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Max tokens must be positive; temperature must lie in `0.0..=2.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens <= 0 {
            return Err(ConfigError::InvalidMaxTokens(self.max_tokens));
        }
        // NaN fails `contains`, so it is rejected here too.
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }
}

impl fmt::Display for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApiSettings(model={}, max_tokens={}, temperature={}, base_url={})",
            self.model, self.max_tokens, self.temperature, self.base_url
        )
    }
}
