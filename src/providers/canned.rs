use crate::prompt::Prompt;
use crate::providers::CompletionProvider;
use async_trait::async_trait;
use log::info;
use std::error::Error;

/// Fixed reply returned in test mode
pub const SAMPLE_RESPONSE: &str = include_str!("sample_response.md");

/// Provider that never touches the network and always answers with [`SAMPLE_RESPONSE`]
#[derive(Debug, Default)]
pub struct CannedProvider;

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<String, Box<dyn Error + Send + Sync>> {
        info!("Test mode: returning sample response without calling the API");
        Ok(SAMPLE_RESPONSE.to_string())
    }
}
