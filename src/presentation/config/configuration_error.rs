use crate::domain::PromptTemplateError;

/// Every variant is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("temperature must be a number between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),
    #[error("prompt template is empty")]
    EmptyTemplate,
    #[error("invalid prompt template: {0}")]
    Template(#[from] PromptTemplateError),
    #[error("environment variable {0} is not set")]
    MissingEnvironmentVariable(String),
    #[error("history.max_entries must be at least 1 while history is enabled")]
    InvalidHistoryCapacity,
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}
