//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for language-model completion.
///
/// Both the structured section extraction call and answer generation go
/// through this seam; the prompt builders in `extraction` and `generation`
/// own the prompt text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt and return the model's raw text reply
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier being used
    fn model(&self) -> &str;
}
