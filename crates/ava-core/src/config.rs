use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AvaError, Result};

/// Top-level configuration for the Ava application.
///
/// Loaded from `~/.ava/config.toml` by default. Each section corresponds to
/// a bounded concern; unknown or missing sections fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub office: OfficeConfig,
}

impl Default for AvaConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            assistant: AssistantConfig::default(),
            office: OfficeConfig::default(),
        }
    }
}

impl AvaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AvaConfig = toml::from_str(&content)?;
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
        let content = toml::to_string_pretty(self).map_err(|e| AvaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the memory snapshot.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.ava".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Assistant identity used in spoken responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Name the assistant introduces itself with.
    pub name: String,
    /// Name of the authority the assistant answers for.
    pub authority: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Ava".to_string(),
            authority: "Driving Licence Authority".to_string(),
        }
    }
}

/// Office details surfaced by the information flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeConfig {
    /// Street address of the office.
    pub address: String,
    /// Opening hours, spoken verbatim.
    pub hours: String,
    /// Helpline phone number.
    pub helpline: String,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            address: "123 Government Complex, Main Road, City Center".to_string(),
            hours: "9 AM to 5 PM, Monday to Saturday".to_string(),
            helpline: "1800-123-4567".to_string(),
        }
    }
}
