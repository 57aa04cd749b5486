mod anthropic;
mod canned;
mod factory;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use canned::{CannedProvider, SAMPLE_RESPONSE};
pub use factory::{ProviderFactory, ProviderKind};
pub use open_ai::OpenAIProvider;

use crate::prompt::Prompt;
use async_trait::async_trait;
use std::error::Error;

/// Unified trait for all completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the raw text of the single reply
    async fn complete(&self, prompt: &Prompt) -> Result<String, Box<dyn Error + Send + Sync>>;
}
