//! ChefSort Common Library
//!
//! Recipe classification logic with no I/O: domain types, the chat payload
//! and the parser for model replies.

pub mod error;
pub mod parser;
pub mod prompts;
pub mod types;

pub use error::{Error, Result};
pub use parser::{extract_fenced_block, parse_classification, parse_json_object, strip_code_fence};
pub use prompts::{build_chat_request, recipe_text, DEFAULT_MODEL, SYSTEM_PROMPT};
pub use types::{
    ChatMessage, ChatRequest, Classification, ClassificationResult, Difficulty, MealType, Recipe,
    Role,
};
