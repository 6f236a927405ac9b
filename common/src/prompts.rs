//! Prompt building
//!
//! - SYSTEM_PROMPT: the fixed taxonomy instruction
//! - recipe_text: the user message for one recipe
//! - build_chat_request: the full chat-completion payload

use crate::types::{ChatMessage, ChatRequest, Recipe};

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-8b-instruct:free";

/// System instruction describing the four-field taxonomy
pub const SYSTEM_PROMPT: &str = "You are a culinary AI assistant. Classify the given recipe (title and ingredients) \
into structured tags: cuisine, meal_type (breakfast/lunch/dinner/snack), \
dietary_tags (vegan, keto, gluten-free, etc.), and difficulty (easy, medium, hard). \
Respond in JSON format with keys: cuisine, meal_type, dietary_tags, difficulty.";

/// User message for a recipe
///
/// # Examples
/// ```
/// use chefsort_common::{recipe_text, Recipe};
///
/// let recipe = Recipe::new("Pancakes", "flour, milk, eggs");
/// assert_eq!(recipe_text(&recipe), "Title: Pancakes\nIngredients: flour, milk, eggs");
/// ```
pub fn recipe_text(recipe: &Recipe) -> String {
    format!("Title: {}\nIngredients: {}", recipe.title, recipe.ingredients)
}

/// Chat payload: system instruction followed by the recipe
pub fn build_chat_request(model: &str, recipe: &Recipe) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(recipe_text(recipe)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_recipe_text_exact() {
        let recipe = Recipe::new("Mushroom Risotto", "['arborio rice', 'mushrooms', 'parmesan']");
        assert_eq!(
            recipe_text(&recipe),
            "Title: Mushroom Risotto\nIngredients: ['arborio rice', 'mushrooms', 'parmesan']"
        );
    }

    #[test]
    fn test_recipe_text_keeps_inner_newlines() {
        let recipe = Recipe::new("Toast", "bread\nbutter");
        assert_eq!(recipe_text(&recipe), "Title: Toast\nIngredients: bread\nbutter");
    }

    #[test]
    fn test_build_chat_request() {
        let recipe = Recipe::new("Pancakes", "flour, milk, eggs");
        let request = build_chat_request(DEFAULT_MODEL, &recipe);

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Title: Pancakes\nIngredients: flour, milk, eggs");
    }

    #[test]
    fn test_system_prompt_names_all_keys() {
        for key in ["cuisine", "meal_type", "dietary_tags", "difficulty"] {
            assert!(SYSTEM_PROMPT.contains(key), "missing key: {}", key);
        }
    }
}
