use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use sous_chef::{Action, ActionRequest, ProviderKind, SousChef, SousChefError, Suggestion};
use tokio::io::AsyncReadExt;

#[derive(Debug, Parser)]
#[command(
    name = "sous-chef",
    about = "Paste or import a recipe, choose an action, and let the AI help you perfect it"
)]
struct Cli {
    /// Recipe text
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the recipe from a file ("-" for stdin)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Import the recipe from a URL (used when no text is given)
    #[arg(long)]
    url: Option<String>,

    /// What to do with the recipe (e.g. healthier, vegan, substitute, explain-technique)
    #[arg(long, short, required_unless_present_any = ["list_actions", "import_only"])]
    action: Option<Action>,

    /// Ingredient to substitute, or technique to explain
    #[arg(long, short)]
    qualifier: Option<String>,

    /// Use the canned sample reply instead of calling the API (requires DEV_MODE=true)
    #[arg(long)]
    test_mode: bool,

    /// Turn **[Product]** markers in the recipe into search links with this affiliate tag
    #[arg(long, env = "AFFILIATE_TAG")]
    affiliate_tag: Option<String>,

    /// Completion provider (openai, anthropic)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Only import the recipe from --url and print it, without asking the AI
    #[arg(long, requires = "url")]
    import_only: bool,

    /// Print the available actions and exit
    #[arg(long)]
    list_actions: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if cli.list_actions {
        for action in Action::ALL {
            println!("{:<18} {}", action.slug(), action.label());
        }
        return ExitCode::SUCCESS;
    }

    if cli.import_only {
        let url = cli.url.unwrap_or_default();
        return match sous_chef::scrape_recipe(&url).await {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        };
    }

    match run(cli).await {
        Ok(suggestion) => {
            print!("{}", format_suggestion(&suggestion));
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail(e: SousChefError) -> ExitCode {
    debug!("{:?}", e);
    eprintln!("{}", e);
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> Result<Suggestion, SousChefError> {
    let action = cli
        .action
        .ok_or_else(|| SousChefError::InvalidAction("no action given".to_string()))?;
    let request = ActionRequest::new(action, cli.qualifier)?;

    let text = match recipe_input(cli.text, cli.file, cli.url.is_some()) {
        RecipeInput::Text(text) => Some(text),
        RecipeInput::File(path) => Some(read_recipe_file(&path).await?),
        RecipeInput::Stdin => Some(read_stdin().await?),
        RecipeInput::Url => None,
    };

    let mut builder = SousChef::builder().action(request).test_mode(cli.test_mode);
    if let Some(text) = text {
        builder = builder.text(text);
    }
    if let Some(url) = cli.url {
        builder = builder.url(url);
    }
    if let Some(tag) = cli.affiliate_tag {
        builder = builder.affiliate_tag(tag);
    }
    if let Some(provider) = cli.provider {
        builder = builder.provider(provider);
    }
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }

    debug!("Running suggestion pipeline");
    builder.build().await
}

/// Where the recipe text comes from
#[derive(Debug, PartialEq, Eq)]
enum RecipeInput {
    Text(String),
    File(PathBuf),
    Stdin,
    /// No text; the builder imports from the URL
    Url,
}

/// Text first, then a file, then the URL; stdin when nothing else is given
fn recipe_input(text: Option<String>, file: Option<PathBuf>, has_url: bool) -> RecipeInput {
    match (text, file) {
        (Some(text), _) => RecipeInput::Text(text),
        (None, Some(path)) if path.as_os_str() == "-" => RecipeInput::Stdin,
        (None, Some(path)) => RecipeInput::File(path),
        (None, None) if has_url => RecipeInput::Url,
        (None, None) => RecipeInput::Stdin,
    }
}

async fn read_recipe_file(path: &Path) -> Result<String, SousChefError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        SousChefError::BuilderError(format!("Failed to read {}: {}", path.display(), e))
    })
}

async fn read_stdin() -> Result<String, SousChefError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| SousChefError::BuilderError(format!("Failed to read stdin: {}", e)))?;
    Ok(text)
}

fn format_suggestion(suggestion: &Suggestion) -> String {
    let mut out = String::new();
    if !suggestion.intro.is_empty() {
        out.push_str(&suggestion.intro);
        out.push('\n');
    }

    if let Some(recipe) = &suggestion.recipe {
        out.push_str("\n---\n### Here's your recipe:\n");
        out.push_str(recipe);
        out.push_str("\n---\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(intro: &str, recipe: Option<&str>) -> Suggestion {
        Suggestion {
            intro: intro.to_string(),
            recipe: recipe.map(str::to_string),
            provider: "canned".to_string(),
        }
    }

    #[test]
    fn test_format_suggestion_with_recipe() {
        let out = format_suggestion(&suggestion("Swapped the butter.", Some("# Cookies\n- oil")));
        assert_eq!(
            out,
            "Swapped the butter.\n\n---\n### Here's your recipe:\n# Cookies\n- oil\n---\n"
        );
    }

    #[test]
    fn test_format_suggestion_without_recipe() {
        let out = format_suggestion(&suggestion("Blanching means...", None));
        assert_eq!(out, "Blanching means...\n");
    }

    #[test]
    fn test_format_suggestion_empty_intro() {
        let out = format_suggestion(&suggestion("", Some("# Pie")));
        assert_eq!(out, "\n---\n### Here's your recipe:\n# Pie\n---\n");
    }

    #[test]
    fn test_recipe_input_precedence() {
        assert_eq!(
            recipe_input(Some("1 egg".into()), None, true),
            RecipeInput::Text("1 egg".into())
        );
        assert_eq!(
            recipe_input(None, Some(PathBuf::from("pie.md")), true),
            RecipeInput::File(PathBuf::from("pie.md"))
        );
        assert_eq!(recipe_input(None, Some(PathBuf::from("-")), false), RecipeInput::Stdin);
        assert_eq!(recipe_input(None, None, true), RecipeInput::Url);
        assert_eq!(recipe_input(None, None, false), RecipeInput::Stdin);
    }

    #[test]
    fn test_cli_text_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "sous-chef", "--text", "1 egg", "--file", "pie.md", "--action", "vegan",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_action_with_qualifier() {
        let cli = Cli::try_parse_from([
            "sous-chef", "--url", "https://example.com/pie", "-a", "substitute", "-q", "butter",
        ])
        .unwrap();
        assert_eq!(cli.action, Some(Action::Substitute));
        assert_eq!(cli.qualifier.as_deref(), Some("butter"));
        assert_eq!(
            recipe_input(cli.text, cli.file, cli.url.is_some()),
            RecipeInput::Url
        );
    }
}
