use crate::SousChefError;
use log::warn;
use std::fmt;
use std::str::FromStr;

/// The canned transformations a cook can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Healthier,
    Vegan,
    GlutenFree,
    Substitute,
    Halve,
    Double,
    ExplainTechnique,
    AirFryer,
}

impl Action {
    /// All actions in the order they are offered to the user
    pub const ALL: [Action; 8] = [
        Action::Healthier,
        Action::Vegan,
        Action::GlutenFree,
        Action::Substitute,
        Action::Halve,
        Action::Double,
        Action::ExplainTechnique,
        Action::AirFryer,
    ];

    /// Human-readable label, as shown in the action picker
    pub fn label(&self) -> &'static str {
        match self {
            Action::Healthier => "Make this recipe healthier",
            Action::Vegan => "Make this recipe vegan",
            Action::GlutenFree => "Make this recipe gluten-free",
            Action::Substitute => "Find a substitute for an ingredient...",
            Action::Halve => "Halve this recipe",
            Action::Double => "Double this recipe",
            Action::ExplainTechnique => "Explain a cooking technique...",
            Action::AirFryer => "Adapt this oven recipe for an air fryer",
        }
    }

    /// Short identifier used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Action::Healthier => "healthier",
            Action::Vegan => "vegan",
            Action::GlutenFree => "gluten-free",
            Action::Substitute => "substitute",
            Action::Halve => "halve",
            Action::Double => "double",
            Action::ExplainTechnique => "explain-technique",
            Action::AirFryer => "air-fryer",
        }
    }

    /// Whether this action needs an ingredient or technique name
    pub fn requires_qualifier(&self) -> bool {
        matches!(self, Action::Substitute | Action::ExplainTechnique)
    }

    /// Whether the reply is expected to contain a delimited recipe
    pub fn produces_recipe(&self) -> bool {
        !matches!(self, Action::ExplainTechnique)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = SousChefError;

    /// Accepts either the slug or the full label (case-insensitive, trailing "..." optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_end_matches("...").to_lowercase();
        Action::ALL
            .into_iter()
            .find(|action| {
                action.slug() == wanted
                    || action.label().trim_end_matches("...").to_lowercase() == wanted
            })
            .ok_or_else(|| SousChefError::InvalidAction(format!("unknown action '{}'", s.trim())))
    }
}

/// A selected action together with its qualifier, if the action takes one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    action: Action,
    qualifier: Option<String>,
}

impl ActionRequest {
    /// Create a request, enforcing that a qualifier is given exactly when the action needs one.
    ///
    /// A blank qualifier counts as missing. A qualifier passed to an action that
    /// takes none is dropped.
    pub fn new(action: Action, qualifier: Option<String>) -> Result<Self, SousChefError> {
        let qualifier = qualifier
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        match (action.requires_qualifier(), qualifier) {
            (true, None) => Err(SousChefError::InvalidAction(format!(
                "'{}' needs {}",
                action.label(),
                match action {
                    Action::Substitute => "an ingredient to substitute",
                    _ => "a technique to explain",
                }
            ))),
            (true, Some(q)) => Ok(Self {
                action,
                qualifier: Some(q),
            }),
            (false, Some(q)) => {
                warn!("Ignoring qualifier '{}' for action '{}'", q, action.label());
                Ok(Self {
                    action,
                    qualifier: None,
                })
            }
            (false, None) => Ok(Self {
                action,
                qualifier: None,
            }),
        }
    }

    /// Request for one of the actions without a qualifier
    pub fn simple(action: Action) -> Result<Self, SousChefError> {
        Self::new(action, None)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// The request line sent to the model, e.g. "Find a substitute for an ingredient for: butter"
    pub fn description(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{} for: {}", self.action.label().replace("...", ""), q),
            None => self.action.label().to_string(),
        }
    }
}
