//! Domain and wire types
//!
//! Shared between the CLI and any other front end:
//! - Recipe: one row of the recipe table
//! - ChatRequest / ChatMessage: the chat-completion payload
//! - ClassificationResult / Classification: what came back from the model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A recipe as sampled from the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: String,
}

impl Recipe {
    pub fn new(title: impl Into<String>, ingredients: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ingredients: ingredients.into(),
        }
    }
}

/// Role in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body (`{model, messages}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Meal type taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!("Unknown meal type: {}", s)),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

/// Difficulty taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Classification as emitted by the model
///
/// Holds the JSON object exactly as parsed: keys the model invented are kept
/// and known keys are not checked against the taxonomy. The accessors read the
/// four known fields leniently and return `None` when a value does not fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult {
    fields: Map<String, Value>,
}

impl ClassificationResult {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.fields.get("cuisine").and_then(Value::as_str)
    }

    pub fn meal_type(&self) -> Option<MealType> {
        self.fields
            .get("meal_type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.fields
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Dietary tags as a set
    ///
    /// Accepts a JSON array of strings or a single comma separated string.
    pub fn dietary_tags(&self) -> BTreeSet<String> {
        match self.fields.get("dietary_tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            _ => BTreeSet::new(),
        }
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// The reply parsed as a JSON object
    Structured(ClassificationResult),
    /// The reply was not JSON; keep the text so the caller can still show it
    RawTextFallback { text: String },
}

impl Classification {
    pub fn is_structured(&self) -> bool {
        matches!(self, Classification::Structured(_))
    }

    pub fn structured(&self) -> Option<&ClassificationResult> {
        match self {
            Classification::Structured(result) => Some(result),
            Classification::RawTextFallback { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_from(value: Value) -> ClassificationResult {
        match value {
            Value::Object(map) => ClassificationResult::from_map(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_known_fields() {
        let result = result_from(json!({
            "cuisine": "Italian",
            "meal_type": "Dinner",
            "dietary_tags": ["vegan", "gluten-free"],
            "difficulty": "easy"
        }));

        assert_eq!(result.cuisine(), Some("Italian"));
        assert_eq!(result.meal_type(), Some(MealType::Dinner));
        assert_eq!(result.difficulty(), Some(Difficulty::Easy));
        let tags: Vec<_> = result.dietary_tags().into_iter().collect();
        assert_eq!(tags, vec!["gluten-free", "vegan"]);
    }

    #[test]
    fn test_out_of_taxonomy_values_are_kept() {
        let result = result_from(json!({
            "meal_type": "brunch",
            "difficulty": 3,
            "spice_level": "mild"
        }));

        assert_eq!(result.meal_type(), None);
        assert_eq!(result.difficulty(), None);
        assert_eq!(result.get("meal_type"), Some(&json!("brunch")));
        assert_eq!(result.get("spice_level"), Some(&json!("mild")));
    }

    #[test]
    fn test_dietary_tags_from_string() {
        let result = result_from(json!({"dietary_tags": "vegan, keto,"}));
        let tags: Vec<_> = result.dietary_tags().into_iter().collect();
        assert_eq!(tags, vec!["keto", "vegan"]);
    }

    #[test]
    fn test_dietary_tags_deduplicated() {
        let result = result_from(json!({"dietary_tags": ["vegan", "vegan"]}));
        assert_eq!(result.dietary_tags().len(), 1);
    }

    #[test]
    fn test_result_serializes_transparently() {
        let result = result_from(json!({"cuisine": "Thai"}));
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized, json!({"cuisine": "Thai"}));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(" SNACK ".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("supper".parse::<MealType>().is_err());
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_chat_message_serialization() {
        let msg = ChatMessage::system("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "hi"}));
    }
}
