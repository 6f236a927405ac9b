use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChefSortError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing OpenRouter API key. Run `chefsort config --set-api-key YOUR_KEY` or set OPENROUTER_API_KEY")]
    MissingCredential,

    #[error("Error from OpenRouter: {status}\n{body}")]
    RemoteService { status: u16, body: String },

    #[error("Failed to parse AI response: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unexpected AI response shape: {reason}\n{body}")]
    UnexpectedResponseShape { reason: String, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column `{column}` in {path}")]
    MissingColumn { column: String, path: String },

    #[error("No recipes with both Title and Ingredients in {0}")]
    EmptyTable(String),

    #[error("Recipe not found in sample: {0}")]
    RecipeNotFound(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChefSortError {
    /// Configuration problems the user fixes outside the session
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChefSortError::Config(_)
                | ChefSortError::MissingCredential
                | ChefSortError::MissingColumn { .. }
                | ChefSortError::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ChefSortError>;
