use crate::prompt::RECIPE_START;
use regex::Regex;
use std::sync::LazyLock;

/// Captures from the first opening tag to the last closing tag, across newlines
static RECIPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[RECIPE_START\](.*)\[RECIPE_END\]").expect("Invalid recipe delimiter regex")
});

/// A model reply split into its conversational intro and the delimited recipe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub intro: String,
    /// `None` when the reply carried no delimiters, e.g. a technique explanation
    pub recipe: Option<String>,
}

/// Split a reply on the `[RECIPE_START]` / `[RECIPE_END]` delimiters.
///
/// Text after the closing tag is discarded. A reply without a complete
/// delimiter pair is returned whole as the intro.
pub fn extract_recipe_part(reply: &str) -> ParsedResponse {
    match RECIPE_REGEX.captures(reply) {
        Some(caps) => {
            let intro = reply
                .split(RECIPE_START)
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            let recipe = caps.get(1).map(|m| m.as_str().trim().to_string());
            ParsedResponse { intro, recipe }
        }
        None => ParsedResponse {
            intro: reply.to_string(),
            recipe: None,
        },
    }
}
