use thiserror::Error;

/// Errors that can occur while producing a suggestion
#[derive(Error, Debug)]
pub enum SousChefError {
    /// No API key available for the selected provider
    #[error("Error: {0} not found.")]
    MissingCredential(String),

    /// The completion service call failed
    #[error("An error occurred: {0}")]
    Completion(String),

    /// The recipe page could not be imported
    #[error("The recipe on '{url}' doesn't support URL import. Please copy the recipe and paste it into the 'Paste Recipe' tab.")]
    ScrapeFailed { url: String },

    /// Neither recipe text nor a usable URL was provided
    #[error("Please paste a recipe or provide a valid URL first!")]
    EmptyRecipe,

    /// Action name or qualifier was invalid
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to fetch from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
