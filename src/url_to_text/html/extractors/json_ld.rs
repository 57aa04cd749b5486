use super::{duration_minutes, Extractor, ParsingContext};
use crate::model::ScrapedRecipe;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::error::Error;

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe, url: &str) -> ScrapedRecipe {
        let yields = json_ld_recipe.recipe_yield.and_then(|yield_val| {
            let yield_str = match yield_val {
                RecipeYield::String(s) => s,
                RecipeYield::Number(n) => n.to_string(),
                // Prefer the descriptive entry (e.g. "4 servings") over a bare number
                RecipeYield::Array(values) => {
                    let arr: Vec<String> = values.iter().filter_map(yield_text).collect();
                    arr.iter()
                        .find(|s| s.contains(char::is_alphabetic))
                        .or_else(|| arr.first())
                        .cloned()
                        .unwrap_or_default()
                }
            };
            let yield_str = decode_html_symbols(yield_str.trim());
            (!yield_str.is_empty()).then_some(yield_str)
        });

        let ingredients = match json_ld_recipe.recipe_ingredient {
            Some(RecipeIngredients::Strings(ingredients)) => ingredients
                .into_iter()
                .filter(|ing| !ing.trim().is_empty())
                .map(|ing| decode_html_symbols(ing.trim()))
                .collect(),
            Some(RecipeIngredients::Objects(ingredients)) => ingredients
                .into_iter()
                .filter(|ing| !ing.name.trim().is_empty())
                .map(|ing| {
                    let amount = ing.amount.as_deref().unwrap_or("").trim();
                    let name = decode_html_symbols(ing.name.trim());
                    if amount.is_empty() {
                        name
                    } else {
                        format!("{amount} {name}")
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let steps: Vec<String> = match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::String(text)) => vec![text],
            Some(RecipeInstructions::Multiple(steps)) => steps,
            Some(RecipeInstructions::MultipleObject(steps)) => {
                steps.into_iter().map(|step| step.text).collect()
            }
            Some(RecipeInstructions::HowTo(items)) => {
                items.into_iter().flat_map(howto_texts).collect()
            }
            Some(RecipeInstructions::NestedSections(sections)) => sections
                .into_iter()
                .flatten()
                .flat_map(howto_texts)
                .collect(),
            None => Vec::new(),
        };
        let instructions = steps
            .into_iter()
            .map(|step| decode_html_symbols(step.trim()))
            .filter(|step| !step.is_empty())
            .collect();

        ScrapedRecipe {
            title: decode_html_symbols(json_ld_recipe.name.trim()),
            yields,
            prep_time: json_ld_recipe.prep_time.as_deref().and_then(duration_minutes),
            cook_time: json_ld_recipe.cook_time.as_deref().and_then(duration_minutes),
            total_time: json_ld_recipe.total_time.as_deref().and_then(duration_minutes),
            ingredients,
            instructions,
            source: url.to_string(),
        }
    }
}

/// Step texts of a HowTo item; sections are flattened into their steps
fn howto_texts(item: HowTo) -> Vec<String> {
    match item {
        HowTo::HowToStep(step) => step.text_or_name().into_iter().collect(),
        HowTo::HowToSection(section) => section
            .item_list_element
            .into_iter()
            .filter_map(HowToStep::text_or_name)
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield", default, deserialize_with = "lenient")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime", default, deserialize_with = "lenient")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default, deserialize_with = "lenient")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime", default, deserialize_with = "lenient")]
    total_time: Option<String>,
}

/// Optional field that reads as `None` when its value has an unexpected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
struct RecipeInstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    Objects(Vec<IngredientObject>),
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    HowTo(Vec<HowTo>),
    NestedSections(Vec<Vec<HowTo>>),
    MultipleObject(Vec<RecipeInstructionObject>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

impl HowToStep {
    // Prefer text over name
    fn text_or_name(self) -> Option<String> {
        self.text.or(self.name)
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(i64),
    Array(Vec<Value>),
}

fn yield_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Locate the Recipe object in a JSON-LD document: root, top-level array, or `@graph`
fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        items.iter().find(|item| is_recipe_type(item))
    } else if is_recipe_type(json_ld) {
        Some(json_ld)
    } else {
        json_ld
            .get("@graph")
            .and_then(Value::as_array)
            .and_then(|items| items.iter().find(|item| is_recipe_type(item)))
    }
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, Box<dyn Error>> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| format!("Invalid JSON-LD selector: {e}"))?;

        // Try each script element until we find a valid recipe
        for (index, script) in context.document.select(&selector).enumerate() {
            let raw_json = script.inner_html();
            let json_ld = match serde_json::from_str::<Value>(&raw_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(recipe.clone()) {
                Ok(recipe) => {
                    debug!("JsonLdExtractor: Successfully converted to JsonLdRecipe");
                    return Ok(self.convert_to_recipe(recipe, &context.url));
                }
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to convert to JsonLdRecipe: {}", e);
                }
            }
        }

        Err("No valid recipe found in any JSON-LD script".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn context_for(json_ld: &str) -> ParsingContext {
        let html = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {json_ld}
                </script>
            </head>
            <body></body>
            </html>
            "#
        );
        ParsingContext {
            url: "http://example.com".to_string(),
            document: Html::parse_document(&html),
        }
    }

    #[test]
    fn test_parse_no_json_ld() {
        let context = ParsingContext {
            url: "http://example.com".to_string(),
            document: Html::parse_document("<html><body>Test</body></html>"),
        };
        assert!(JsonLdExtractor.parse(&context).is_err());
    }

    #[test]
    fn test_parse_basic_recipe() {
        let json_ld = r#"
        {
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Chocolate Chip Cookies",
            "recipeIngredient": ["flour", "sugar", " ", "chocolate chips"],
            "recipeInstructions": "Mix ingredients. Bake at 350F for 10 minutes.",
            "prepTime": "PT15M",
            "cookTime": "PT10M",
            "totalTime": "PT25M",
            "recipeYield": "24 cookies"
        }
        "#;

        let recipe = JsonLdExtractor.parse(&context_for(json_ld)).unwrap();

        assert_eq!(recipe.title, "Chocolate Chip Cookies");
        assert_eq!(recipe.yields.as_deref(), Some("24 cookies"));
        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, Some(10));
        assert_eq!(recipe.total_time, Some(25));
        assert_eq!(recipe.ingredients, vec!["flour", "sugar", "chocolate chips"]);
        assert_eq!(
            recipe.instructions,
            vec!["Mix ingredients. Bake at 350F for 10 minutes."]
        );
        assert_eq!(recipe.source, "http://example.com");
    }

    #[test]
    fn test_parse_graph_with_howto_sections() {
        let json_ld = r#"
        {
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebSite", "name": "Recipe Website"},
                {
                    "@type": ["Recipe", "NewsArticle"],
                    "name": "Pasta &amp; Peas",
                    "recipeYield": ["4", "4 servings"],
                    "recipeIngredient": ["200g pasta", "100g peas"],
                    "recipeInstructions": [
                        {
                            "@type": "HowToSection",
                            "name": "Pasta",
                            "itemListElement": [
                                {"@type": "HowToStep", "text": "Boil water."},
                                {"@type": "HowToStep", "name": "Cook pasta."}
                            ]
                        },
                        {"@type": "HowToStep", "text": "Stir in peas."}
                    ]
                }
            ]
        }
        "#;

        let recipe = JsonLdExtractor.parse(&context_for(json_ld)).unwrap();

        assert_eq!(recipe.title, "Pasta & Peas");
        assert_eq!(recipe.yields.as_deref(), Some("4 servings"));
        assert_eq!(
            recipe.instructions,
            vec!["Boil water.", "Cook pasta.", "Stir in peas."]
        );
        assert_eq!(recipe.prep_time, None);
    }

    #[test]
    fn test_parse_mixed_yield_and_bad_times() {
        let json_ld = r#"
        {
            "@type": "Recipe",
            "name": "Soup",
            "recipeYield": [4, "4 servings"],
            "recipeIngredient": ["1 onion"],
            "recipeInstructions": ["Boil."],
            "prepTime": {"@type": "Duration"},
            "cookTime": 30,
            "totalTime": "PT30M"
        }
        "#;

        let recipe = JsonLdExtractor.parse(&context_for(json_ld)).unwrap();
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.yields.as_deref(), Some("4 servings"));
        assert_eq!(recipe.prep_time, None);
        assert_eq!(recipe.cook_time, None);
        assert_eq!(recipe.total_time, Some(30));
        assert_eq!(recipe.ingredients, vec!["1 onion"]);
        assert_eq!(recipe.instructions, vec!["Boil."]);
    }

    #[test]
    fn test_parse_array_with_numeric_yield() {
        let json_ld = r#"
        [
            {
                "@type": "Recipe",
                "name": "Pancakes",
                "recipeYield": 4,
                "recipeIngredient": ["1 egg"],
                "recipeInstructions": ["Whisk.", "Fry."],
                "totalTime": "PT1H5M"
            },
            {"@type": "Organization", "name": "Site"}
        ]
        "#;

        let recipe = JsonLdExtractor.parse(&context_for(json_ld)).unwrap();
        assert_eq!(recipe.yields.as_deref(), Some("4"));
        assert_eq!(recipe.instructions, vec!["Whisk.", "Fry."]);
        assert_eq!(recipe.total_time, Some(65));
    }
}
