use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GafferError, Result};

/// Environment variable that supplies the external-model credential.
///
/// When set it takes priority over `model.api_key` in the config file.
pub const MODEL_API_KEY_ENV: &str = "GAFFER_MODEL_API_KEY";

/// Top-level configuration for the Gaffer application.
///
/// Loaded from `gaffer.toml` by default. Each section corresponds to a
/// bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GafferConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl Default for GafferConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            chat: ChatConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl GafferConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GafferConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GafferError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// API server port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

/// Chat engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Minimum keyword-overlap score for the intent matcher to accept a
    /// feature match. Exact trigger matches bypass this threshold.
    pub confidence_threshold: f64,
    /// Maximum number of knowledge-base documents fed to the composer.
    pub retrieval_top_k: usize,
    /// Upper bound on the composed context block, in characters.
    pub max_context_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            retrieval_top_k: 5,
            max_context_chars: 1200,
        }
    }
}

/// External paraphrase-model settings.
///
/// The paraphrase strategy is enabled only when a credential is present;
/// without one the composer stays on the template strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// API key for the external model. Prefer the env var over this field.
    pub api_key: Option<String>,
    /// Model identifier to request.
    pub model_id: String,
    /// Base URL of an OpenAI-compatible completions endpoint.
    pub base_url: String,
    /// Hard timeout for a single paraphrase call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_id: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 8,
        }
    }
}

impl ModelConfig {
    /// Resolve the credential, if any.
    ///
    /// Priority: `GAFFER_MODEL_API_KEY` env var > `model.api_key` config field.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(MODEL_API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
        self.api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
    }
}
