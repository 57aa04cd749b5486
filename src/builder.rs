use std::time::Duration;

use log::{debug, info};

use crate::{
    build_prompt, extract_recipe_part, get_suggestion, insert_affiliate_links, pipelines,
    ActionRequest, Completion, ProviderFactory, ProviderKind, SousChefConfig, SousChefError,
};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Recipe text pasted by the user
    Text(String),
    /// Import the recipe from a web page
    Url(String),
}

/// Result of a successful suggestion, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Conversational part of the reply (summary of changes, or the whole explanation)
    pub intro: String,
    /// The modified recipe, when the reply contained one
    pub recipe: Option<String>,
    /// Name of the provider that produced the reply
    pub provider: String,
}

/// Builder for configuring and running one suggestion
#[derive(Debug, Default)]
pub struct SousChefBuilder {
    text: Option<String>,
    url: Option<String>,
    action: Option<ActionRequest>,
    test_mode: bool,
    affiliate_tag: Option<String>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    config: Option<SousChefConfig>,
}

impl SousChefBuilder {
    /// Use pasted recipe text
    ///
    /// # Example
    /// ```
    /// use sous_chef::SousChef;
    ///
    /// let builder = SousChef::builder()
    ///     .text("# Pancakes\n- 1 cup flour\n- 1 egg");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Import the recipe from a URL. Pasted text, when non-blank, takes precedence.
    ///
    /// # Example
    /// ```
    /// use sous_chef::SousChef;
    ///
    /// let builder = SousChef::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the requested transformation
    ///
    /// # Example
    /// ```
    /// use sous_chef::{Action, ActionRequest, SousChef};
    ///
    /// let request = ActionRequest::new(Action::Substitute, Some("butter".into())).unwrap();
    /// let builder = SousChef::builder().action(request);
    /// ```
    pub fn action(mut self, action: ActionRequest) -> Self {
        self.action = Some(action);
        self
    }

    /// Answer with the canned sample reply instead of calling the API.
    /// Only allowed when dev mode is enabled in the configuration.
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Rewrite `**[Product]**` markers in the recipe into search links with this tag
    pub fn affiliate_tag(mut self, tag: impl Into<String>) -> Self {
        self.affiliate_tag = Some(tag.into());
        self
    }

    /// Override the configured completion provider
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key directly instead of relying on environment variables or config files
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use an explicit configuration instead of loading it from file and environment
    pub fn config(mut self, config: SousChefConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run the pipeline: import, build prompt, complete, split, link
    ///
    /// # Errors
    /// Returns `SousChefError` if:
    /// - No action was specified
    /// - The URL import fails
    /// - There is no recipe text to work with
    /// - Test mode is requested without dev mode
    /// - No API key is available for the provider
    /// - The completion call fails
    ///
    /// # Example
    /// ```no_run
    /// # use sous_chef::{Action, ActionRequest, SousChef};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let suggestion = SousChef::builder()
    ///     .text("# Pancakes\n- 1 cup flour\n- 1 egg")
    ///     .action(ActionRequest::simple(Action::Vegan)?)
    ///     .build()
    ///     .await?;
    /// println!("{}", suggestion.intro);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Suggestion, SousChefError> {
        let action = self.action.ok_or_else(|| {
            SousChefError::BuilderError("No action specified. Use .action()".to_string())
        })?;

        let mut config = match self.config {
            Some(config) => config,
            None => SousChefConfig::load()?,
        };
        if let Some(api_key) = self.api_key {
            config.provider.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            config.provider.model = model;
        }
        if let Some(provider) = self.provider {
            config.provider.name = provider.as_str().to_string();
        }
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        let source = match (self.text, self.url) {
            (Some(text), _) if !text.trim().is_empty() => Some(InputSource::Text(text)),
            (_, Some(url)) if !url.trim().is_empty() => Some(InputSource::Url(url)),
            _ => None,
        };

        let recipe = match source {
            Some(InputSource::Text(text)) => text,
            Some(InputSource::Url(url)) => {
                info!("Importing recipe from {}", url.trim());
                pipelines::url::process(url.trim(), Some(timeout)).await?
            }
            None => return Err(SousChefError::EmptyRecipe),
        };
        if recipe.trim().is_empty() {
            return Err(SousChefError::EmptyRecipe);
        }

        let kind = if self.test_mode {
            ProviderKind::Canned
        } else {
            config.provider.name.parse()?
        };
        if kind == ProviderKind::Canned && !config.dev_mode {
            return Err(SousChefError::BuilderError(
                "Test mode is only available when dev mode is enabled".to_string(),
            ));
        }
        // Fails before any call when the credential is missing
        let provider = ProviderFactory::create(kind, &config.provider, timeout)?;

        let prompt = build_prompt(&recipe, &action);
        debug!("Prompt:\n{}", prompt);

        let reply = match get_suggestion(provider.as_ref(), &prompt).await {
            Completion::Reply(reply) => reply,
            Completion::Failed(details) => return Err(SousChefError::Completion(details)),
        };

        let mut parsed = extract_recipe_part(&reply);
        let tag = self.affiliate_tag.or(config.affiliate_tag);
        if let (Some(tag), Some(recipe)) = (tag.as_deref(), parsed.recipe.as_mut()) {
            *recipe = insert_affiliate_links(recipe, tag);
        }
        if parsed.recipe.is_none() && action.action().produces_recipe() {
            info!("Reply for '{}' had no recipe delimiters", action.description());
        }

        Ok(Suggestion {
            intro: parsed.intro,
            recipe: parsed.recipe,
            provider: provider.provider_name().to_string(),
        })
    }
}

/// Main entry point for the builder API
pub struct SousChef;

impl SousChef {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use sous_chef::SousChef;
    ///
    /// let builder = SousChef::builder();
    /// ```
    pub fn builder() -> SousChefBuilder {
        SousChefBuilder::default()
    }
}
