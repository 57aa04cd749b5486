use crate::prompt::Prompt;
use crate::providers::CompletionProvider;
use log::{debug, info, warn};
use std::borrow::Cow;

/// Outcome of a single completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Raw text of the model's reply
    Reply(String),
    /// The call failed; holds the error details
    Failed(String),
}

impl Completion {
    pub fn is_failed(&self) -> bool {
        matches!(self, Completion::Failed(_))
    }

    /// Displayable text: the reply, or `An error occurred: {details}`
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Completion::Reply(reply) => Cow::Borrowed(reply),
            Completion::Failed(details) => Cow::Owned(format!("An error occurred: {}", details)),
        }
    }
}

/// Send the prompt once and report the outcome; never returns an error outward
pub async fn get_suggestion(provider: &dyn CompletionProvider, prompt: &Prompt) -> Completion {
    debug!(
        "Requesting completion from {} ({} chars)",
        provider.provider_name(),
        prompt.as_str().len()
    );

    match provider.complete(prompt).await {
        Ok(reply) => {
            info!("Received reply from {}", provider.provider_name());
            Completion::Reply(reply)
        }
        Err(e) => {
            warn!("Provider {} failed: {}", provider.provider_name(), e);
            Completion::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CannedProvider;
    use async_trait::async_trait;
    use std::error::Error;

    struct BrokenProvider;

    #[async_trait]
    impl CompletionProvider for BrokenProvider {
        fn provider_name(&self) -> &str {
            "broken"
        }

        async fn complete(&self, _prompt: &Prompt) -> Result<String, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }
    }

    fn prompt() -> Prompt {
        let request = crate::ActionRequest::simple(crate::Action::Double).unwrap();
        crate::build_prompt("1 cup rice", &request)
    }

    #[tokio::test]
    async fn test_failure_becomes_outcome() {
        let completion = get_suggestion(&BrokenProvider, &prompt()).await;
        assert_eq!(completion, Completion::Failed("connection refused".to_string()));
        assert!(completion.is_failed());
        assert_eq!(completion.text(), "An error occurred: connection refused");
    }

    #[tokio::test]
    async fn test_reply_passes_through() {
        let completion = get_suggestion(&CannedProvider, &prompt()).await;
        assert!(!completion.is_failed());
        assert!(completion.text().contains("[RECIPE_START]"));
    }
}
