pub mod action;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod links;
pub mod model;
pub mod pipelines;
pub mod prompt;
pub mod providers;
pub mod response;
pub mod url_to_text;

// Re-export commonly used types
pub use action::{Action, ActionRequest};
pub use builder::{InputSource, SousChef, SousChefBuilder, Suggestion};
pub use client::{get_suggestion, Completion};
pub use config::SousChefConfig;
pub use error::SousChefError;
pub use links::insert_affiliate_links;
pub use model::{format_time, ScrapedRecipe};
pub use prompt::{build_prompt, Prompt};
pub use providers::{CompletionProvider, ProviderFactory, ProviderKind};
pub use response::{extract_recipe_part, ParsedResponse};

/// Convenience function to transform pasted recipe text
///
/// Configuration is loaded from `sous-chef.toml` and the environment.
///
/// # Example
/// ```no_run
/// use sous_chef::{suggest, Action, ActionRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ActionRequest::simple(Action::GlutenFree)?;
/// let suggestion = suggest("# Brownies\n- 1 cup flour", request).await?;
/// if let Some(recipe) = suggestion.recipe {
///     println!("{}", recipe);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn suggest(recipe: &str, action: ActionRequest) -> Result<Suggestion, SousChefError> {
    SousChef::builder().text(recipe).action(action).build().await
}

/// Convenience function to transform a recipe imported from a URL
///
/// # Example
/// ```no_run
/// use sous_chef::{suggest_from_url, Action, ActionRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ActionRequest::simple(Action::AirFryer)?;
/// let suggestion = suggest_from_url("https://example.com/recipe", request).await?;
/// println!("{}", suggestion.intro);
/// # Ok(())
/// # }
/// ```
pub async fn suggest_from_url(
    url: &str,
    action: ActionRequest,
) -> Result<Suggestion, SousChefError> {
    SousChef::builder().url(url).action(action).build().await
}

/// Convenience function to import a recipe page as Markdown text, without any completion call
///
/// # Example
/// ```no_run
/// use sous_chef::scrape_recipe;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let text = scrape_recipe("https://example.com/recipe").await?;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```
pub async fn scrape_recipe(url: &str) -> Result<String, SousChefError> {
    pipelines::url::process(url, None).await
}
