use crate::model::ScrapedRecipe;
use scraper::Html;
use std::error::Error;

mod json_ld;
mod microdata;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, Box<dyn Error>>;
}

/// Convert an ISO 8601 duration (e.g. `PT1H30M`, `P0DT45M`, `PT5400.0S`) to whole minutes
pub(crate) fn duration_minutes(duration: &str) -> Option<u32> {
    let duration = duration.trim().strip_prefix('P')?;
    let mut total = 0.0_f64;
    let mut number = String::new();
    let mut in_time = false;

    for c in duration.chars() {
        match c {
            'T' => in_time = true,
            '0'..='9' | '.' => number.push(c),
            unit => {
                let value: f64 = number.parse().ok()?;
                number.clear();
                total += match (unit, in_time) {
                    ('D', false) => value * 24.0 * 60.0,
                    ('H', true) => value * 60.0,
                    ('M', true) => value,
                    ('S', true) => value / 60.0,
                    _ => return None,
                };
            }
        }
    }

    if !number.is_empty() {
        return None;
    }
    Some(total.round() as u32)
}
