//! Runtime configuration for nestpilot

use std::time::Duration;

use crate::error::{Result, RuntimeError};

/// Wall-clock bound on one model turn. Not configurable.
pub const TURN_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Model credential; required before an orchestrator can be built
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// Project the session operates on
    pub project_uid: Option<String>,
    /// Base URL of the project-data REST API
    pub api_url: String,
    /// Bearer token for the REST API
    pub api_token: Option<String>,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    /// Maximum tokens for a model reply
    pub max_tokens: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            project_uid: None,
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.8,
            max_tokens: 2048,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_project(mut self, project_uid: impl Into<String>) -> Self {
        self.project_uid = Some(project_uid.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The credential, or `MissingCredential` when unset or blank.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RuntimeError::MissingCredential(API_KEY_ENV.to_string()))
    }

    pub fn require_project(&self) -> Result<&str> {
        self.project_uid
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                RuntimeError::Config("no project selected (use --project or NESTPILOT_PROJECT)".into())
            })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        config.api_key = var(API_KEY_ENV);
        config.project_uid = var("NESTPILOT_PROJECT");
        config.api_token = var("NESTPILOT_API_TOKEN");

        if let Some(model) = var("NESTPILOT_MODEL") {
            config.model = model;
        }

        if let Some(url) = var("NESTPILOT_API_URL") {
            config.api_url = url;
        }

        if let Some(temperature) = var("NESTPILOT_TEMPERATURE") {
            match temperature.parse::<f32>() {
                Ok(val) => config.temperature = val,
                Err(_) => tracing::warn!(value = %temperature, "ignoring invalid NESTPILOT_TEMPERATURE"),
            }
        }

        if let Some(max_tokens) = var("NESTPILOT_MAX_TOKENS") {
            match max_tokens.parse::<u32>() {
                Ok(val) => config.max_tokens = val,
                Err(_) => tracing::warn!(value = %max_tokens, "ignoring invalid NESTPILOT_MAX_TOKENS"),
            }
        }

        config
    }
}
