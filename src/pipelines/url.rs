use crate::model::ScrapedRecipe;
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::extractors::{
    Extractor, JsonLdExtractor, MicroDataExtractor, ParsingContext,
};
use crate::SousChefError;
use log::{info, warn};
use scraper::Html;
use std::error::Error;
use std::time::Duration;

/// Fetch a URL and extract its structured recipe
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher
/// 2. Tries HTML extractors (json_ld, microdata) in order
/// 3. Returns the first recipe found
pub async fn fetch_recipe(
    url: &str,
    timeout: Option<Duration>,
) -> Result<ScrapedRecipe, Box<dyn Error + Send + Sync>> {
    let fetcher = RequestFetcher::new(timeout)?;
    let html_content = fetcher.fetch(url).await?;

    // Extraction errors are not Send; keep them out of any await point
    parse_recipe(url, &html_content).ok_or_else(|| "No extractor could parse the recipe".into())
}

fn parse_recipe(url: &str, html: &str) -> Option<ScrapedRecipe> {
    let context = ParsingContext {
        url: url.to_string(),
        document: Html::parse_document(html),
    };

    let extractors: Vec<Box<dyn Extractor>> =
        vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)];

    extractors
        .iter()
        .find_map(|extractor| extractor.parse(&context).ok())
}

/// Import a recipe page as Markdown recipe text.
///
/// Every failure is reported as [`SousChefError::ScrapeFailed`], which tells
/// the cook to paste the recipe instead.
pub async fn process(url: &str, timeout: Option<Duration>) -> Result<String, SousChefError> {
    match fetch_recipe(url, timeout).await {
        Ok(recipe) => {
            info!("Imported '{}' from {}", recipe.title, url);
            Ok(recipe.to_markdown())
        }
        Err(e) => {
            warn!("URL import failed for {}: {}", url, e);
            Err(SousChefError::ScrapeFailed {
                url: url.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipe_falls_back_to_microdata() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">{"@type": "WebSite", "name": "Blog"}</script>
            </head><body>
            <div itemscope itemtype="http://schema.org/Recipe">
                <span itemprop="name">Flatbread</span>
                <span itemprop="recipeIngredient">2 cups flour</span>
            </div>
            </body></html>
        "#;
        let recipe = parse_recipe("http://example.com", html).unwrap();
        assert_eq!(recipe.title, "Flatbread");
        assert_eq!(recipe.ingredients, vec!["2 cups flour"]);
    }

    #[test]
    fn test_parse_recipe_none() {
        assert!(parse_recipe("http://example.com", "<html><body>Blog post</body></html>").is_none());
    }
}
