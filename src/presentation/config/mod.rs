mod configuration_error;
mod environment;
mod prompt_config;
mod settings;

pub use configuration_error::ConfigurationError;
pub use environment::Environment;
pub use prompt_config::PromptConfig;
pub use settings::{
    CorsSettings, DocumentStoreProvider, DocumentStoreSettings, ExtractionSettings,
    HistorySettings, LlmProvider, LlmSettings, LoggingSettings, PromptSettings, ServerSettings,
    Settings,
};
