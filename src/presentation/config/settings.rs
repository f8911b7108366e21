use std::path::Path;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::{ConfigurationError, Environment};

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub llm: LlmSettings,
    pub prompt: PromptSettings,
    pub document_store: DocumentStoreSettings,
    pub extraction: ExtractionSettings,
    pub history: HistorySettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_DIR), environment)
    }

    /// Layers `appsettings.toml`, then `appsettings.{environment}.toml` (both
    /// optional) from `config_dir`, then `APP__SECTION__KEY` environment
    /// variables.
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(config_dir.join("appsettings.toml")).required(false))
            .add_source(
                File::from(config_dir.join(format!("appsettings.{}.toml", environment.as_str())))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.history.enabled && self.history.max_entries == 0 {
            return Err(ConfigurationError::InvalidHistoryCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://miningniti.vercel.app".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub preferred_model: String,
    pub fallback_model: Option<String>,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: None,
            preferred_model: "gemini-1.5-flash".to_string(),
            fallback_model: Some("gemini-pro".to_string()),
            max_output_tokens: 2048,
            timeout_seconds: 60,
        }
    }
}

impl LlmSettings {
    pub fn api_key(&self) -> Result<String, ConfigurationError> {
        read_secret(&self.api_key_env)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub path: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            path: "conf/variables.yaml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStoreProvider {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentStoreSettings {
    pub provider: DocumentStoreProvider,
    /// Name of the environment variable holding the connection string.
    pub url_env: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DocumentStoreSettings {
    fn default() -> Self {
        Self {
            provider: DocumentStoreProvider::Postgres,
            url_env: "DATABASE_URL".to_string(),
            max_connections: 10,
            run_migrations: true,
        }
    }
}

impl DocumentStoreSettings {
    pub fn url(&self) -> Result<String, ConfigurationError> {
        read_secret(&self.url_env)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub max_file_size_mb: usize,
    pub render_dpi: f32,
    pub max_pages: usize,
    pub ocr_language: String,
    pub tesseract_path: String,
    /// Directory containing the pdfium shared library; system search path when unset.
    pub pdfium_library_dir: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            render_dpi: 200.0,
            max_pages: 200,
            ocr_language: "eng".to_string(),
            tesseract_path: "tesseract".to_string(),
            pdfium_library_dir: None,
            timeout_seconds: 120,
        }
    }
}

impl ExtractionSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

fn read_secret(variable: &str) -> Result<String, ConfigurationError> {
    std::env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigurationError::MissingEnvironmentVariable(variable.to_string()))
}
