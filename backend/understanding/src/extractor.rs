//! Per-image extraction service.

use std::sync::Arc;

use imgextract_config::ApiSettings;
use imgextract_core::{
    ExtractError, ExtractionRecord, FieldList, ImageRef, VisionProvider, VisionRequest,
};
use imgextract_media::encode_image;
use tracing::debug;

use crate::prompt::build_prompt;
use crate::response::parse_records;

/// Sends one image at a time to a vision provider and parses the reply.
pub struct Extractor {
    provider: Arc<dyn VisionProvider>,
    settings: ApiSettings,
}

impl Extractor {
    pub fn new(provider: Arc<dyn VisionProvider>, settings: ApiSettings) -> Self {
        Self { provider, settings }
    }

    /// Extract every table row in `image` as a record over `fields`.
    ///
    /// Encoding, the API call, and parsing each map to their own
    /// `ExtractError` variant; none of them is retried.
    pub async fn extract_all(
        &self,
        image: &ImageRef,
        fields: &FieldList,
    ) -> Result<Vec<ExtractionRecord>, ExtractError> {
        let encoded = encode_image(&image.path).await?;

        let request = VisionRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(fields),
            image: encoded,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| ExtractError::ApiCall {
                provider: self.provider.name().to_string(),
                message: format!("{e:#}"),
            })?;

        debug!(
            file = %image.file_name(),
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Vision response received"
        );

        parse_records(&response.content, &image.file_name(), fields).map_err(|message| {
            ExtractError::ResponseParse {
                path: image.path.clone(),
                message,
            }
        })
    }
}
