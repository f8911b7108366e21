use std::path::Path;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::QUERY_VARIABLE;
use crate::domain::PromptTemplate;

use super::ConfigurationError;

const MAX_TEMPERATURE: f32 = 2.0;

/// Prompt template and sampling temperature, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub temperature: f32,
    pub template: String,
    #[serde(default = "default_input_variables")]
    pub input_variables: Vec<String>,
}

fn default_input_variables() -> Vec<String> {
    vec![QUERY_VARIABLE.to_string()]
}

impl PromptConfig {
    /// Loads and validates the prompt file. Any failure is fatal: there is
    /// no fallback template.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let prompt: PromptConfig = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;

        prompt.validate()?;

        tracing::info!(
            path = %path.display(),
            temperature = prompt.temperature,
            input_variables = ?prompt.input_variables,
            "Prompt configuration loaded"
        );

        Ok(prompt)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigurationError::InvalidTemperature(self.temperature));
        }

        if self.template.trim().is_empty() {
            return Err(ConfigurationError::EmptyTemplate);
        }

        self.prompt_template().map(|_| ())
    }

    pub fn prompt_template(&self) -> Result<PromptTemplate, ConfigurationError> {
        Ok(PromptTemplate::new(
            &self.template,
            self.input_variables.clone(),
        )?)
    }
}
