//! Prompt templates for each kind of action.
//!
//! The templates live in `.txt` files next to this module and are embedded at
//! compile time with `include_str!`, so they can be edited without dealing with
//! Rust string syntax. `{recipe}` and `{request}` are the only placeholders.

use crate::action::{Action, ActionRequest};
use log::debug;
use std::fmt;

/// Template for general modifications (healthier, vegan, halve, ...)
pub const DEFAULT_TEMPLATE: &str = include_str!("default.txt");

/// Template for explaining a technique; asks for no recipe and no delimiters
pub const TECHNIQUE_TEMPLATE: &str = include_str!("technique.txt");

/// Template for substituting one ingredient
pub const SUBSTITUTE_TEMPLATE: &str = include_str!("substitute.txt");

/// System message sent ahead of every prompt
pub const SYSTEM_PROMPT: &str = "You are an AI Sous Chef.";

pub const RECIPE_START: &str = "[RECIPE_START]";
pub const RECIPE_END: &str = "[RECIPE_END]";

/// A fully rendered prompt, ready to send to a completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the prompt for a recipe and the requested action
pub fn build_prompt(recipe: &str, request: &ActionRequest) -> Prompt {
    let (template, request_line) = match request.action() {
        Action::ExplainTechnique => (
            TECHNIQUE_TEMPLATE,
            request.qualifier().unwrap_or_default().to_string(),
        ),
        Action::Substitute => (
            SUBSTITUTE_TEMPLATE,
            request.qualifier().unwrap_or_default().to_string(),
        ),
        _ => (DEFAULT_TEMPLATE, request.description()),
    };

    debug!(
        "Building prompt for '{}' ({} chars of recipe)",
        request.description(),
        recipe.len()
    );
    Prompt(fill(template, recipe, &request_line))
}

/// Substitute placeholders in a single pass, so neither value is re-scanned
fn fill(template: &str, recipe: &str, request: &str) -> String {
    let mut output = String::with_capacity(template.len() + recipe.len() + request.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("{recipe}") {
            output.push_str(recipe);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{request}") {
            output.push_str(request);
            rest = after;
        } else {
            output.push('{');
            rest = &tail[1..];
        }
    }
    output.push_str(rest);
    output
}
