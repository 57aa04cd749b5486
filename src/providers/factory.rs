use crate::config::ProviderConfig;
use crate::providers::{AnthropicProvider, CannedProvider, CompletionProvider, OpenAIProvider};
use crate::SousChefError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Completion providers that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
    /// Canned sample reply, used by test mode
    Canned,
}

impl ProviderKind {
    /// Provider name string used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Canned => "canned",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SousChefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "canned" => Ok(ProviderKind::Canned),
            other => Err(SousChefError::BuilderError(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        kind: ProviderKind,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn CompletionProvider>, SousChefError> {
        match kind {
            ProviderKind::OpenAI => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            ProviderKind::Anthropic => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            ProviderKind::Canned => Ok(Box::new(CannedProvider)),
        }
    }
}
