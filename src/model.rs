/// Structured recipe fields pulled from a web page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedRecipe {
    pub title: String,
    pub yields: Option<String>,
    /// Times in minutes
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Page the recipe was imported from
    pub source: String,
}

impl ScrapedRecipe {
    /// Render as the Markdown recipe text that is fed to the prompt builder
    pub fn to_markdown(&self) -> String {
        let mut text = format!("# {}\n\n", self.title);

        if let Some(yields) = self.yields.as_deref().filter(|y| !y.trim().is_empty()) {
            text.push_str(&format!("- **Servings:** {}\n", yields));
        }
        if let Some(prep) = format_time(self.prep_time) {
            text.push_str(&format!("- **Prep Time:** {}\n", prep));
        }
        if let Some(cook) = format_time(self.cook_time) {
            text.push_str(&format!("- **Cook Time:** {}\n", cook));
        }
        if let Some(total) = format_time(self.total_time) {
            text.push_str(&format!("- **Total Time:** {}\n", total));
        }
        text.push_str(&format!(
            "- **Adapted from {}:** {}\n\n",
            self.title, self.source
        ));

        text.push_str("## Ingredients\n");
        for ingredient in &self.ingredients {
            text.push_str(&format!("- {}\n", ingredient));
        }

        text.push_str("\n## Instructions\n");
        for instruction in &self.instructions {
            text.push_str(&format!("- {}\n", instruction));
        }

        text
    }
}

/// Render minutes as "X hours Y minutes"; `None` for missing or sub-minute values
pub fn format_time(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes.filter(|m| *m >= 1)?;
    let (hours, mins) = (minutes / 60, minutes % 60);

    let unit = |n: u32, word: &str| format!("{} {}{}", n, word, if n == 1 { "" } else { "s" });

    Some(match (hours, mins) {
        (0, m) => unit(m, "minute"),
        (h, 0) => unit(h, "hour"),
        (h, m) => format!("{} {}", unit(h, "hour"), unit(m, "minute")),
    })
}
