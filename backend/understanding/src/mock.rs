use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use imgextract_core::{VisionProvider, VisionRequest, VisionResponse};

/// A mock vision provider that returns canned responses.
///
/// Scripted replies are consumed in call order; once they run out every call
/// answers `[]`.
pub struct MockVisionProvider {
    name: String,
    script: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockVisionProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply for the next unanswered call.
    pub fn then_reply(self, content: impl Into<String>) -> Self {
        self.push(Ok(content.into()));
        self
    }

    /// Queue a failure for the next unanswered call.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn push(&self, item: Result<String, String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(item);
        }
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: &VisionRequest) -> Result<VisionResponse> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(req.prompt.clone());
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let content = match next {
            Some(Ok(content)) => content,
            Some(Err(message)) => return Err(anyhow!(message)),
            None => "[]".to_string(),
        };
        Ok(VisionResponse {
            content,
            provider: self.name.clone(),
            model: req.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
