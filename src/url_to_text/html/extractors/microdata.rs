use super::{duration_minutes, Extractor, ParsingContext};
use crate::model::ScrapedRecipe;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;

pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // Look for elements with itemscope and itemtype containing "Recipe"
        let selector = Selector::parse("[itemscope]").ok()?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        self.get_itemprop_list(root, prop).into_iter().next()
    }

    /// Text of every element carrying `itemprop`, preferring the `content`/`datetime` attribute
    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(&format!("[itemprop='{}']", prop)) else {
            return Vec::new();
        };
        root.select(&selector)
            .filter_map(|el| {
                let value = el
                    .value()
                    .attr("content")
                    .or_else(|| el.value().attr("datetime"))
                    .map(str::to_string)
                    .unwrap_or_else(|| el.text().collect::<Vec<_>>().join(" "));
                let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
                (!value.is_empty()).then_some(value)
            })
            .collect()
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, Box<dyn Error>> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Only search inside a Recipe item; page-wide itemprops pick up site titles and ads
        let container = self
            .find_recipe_container(&context.document)
            .ok_or("No MicroData Recipe container found")?;

        let title = self
            .get_itemprop(container, "name")
            .ok_or("Could not extract recipe name")?;

        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients");
        }

        let mut instructions = self.get_itemprop_list(container, "recipeInstructions");
        if instructions.is_empty() {
            instructions = self.get_itemprop_list(container, "instructions");
        }

        if ingredients.is_empty() && instructions.is_empty() {
            return Err("Could not extract recipe content".into());
        }

        let minutes = |prop: &str| {
            self.get_itemprop(container, prop)
                .as_deref()
                .and_then(duration_minutes)
        };

        Ok(ScrapedRecipe {
            title,
            yields: self.get_itemprop(container, "recipeYield"),
            prep_time: minutes("prepTime"),
            cook_time: minutes("cookTime"),
            total_time: minutes("totalTime"),
            ingredients,
            instructions,
            source: context.url.clone(),
        })
    }
}
