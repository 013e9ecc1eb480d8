use anyhow::Result;
use async_trait::async_trait;

use crate::types::EncodedImage;

/// Trait for vision-capable LLM backends used by the extractor.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one image plus instruction text and return the model's reply.
    async fn complete(&self, request: &VisionRequest) -> Result<VisionResponse>;
}

/// A single-image request to a vision provider.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    pub prompt: String,
    pub image: EncodedImage,
    pub max_tokens: i64,
    pub temperature: f32,
}

/// Response from a vision provider.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
