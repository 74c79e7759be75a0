//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/credlens/) and project (.credlens/) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::infer::InferenceConfig;
use crate::types::{CredError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Inference backend settings
    pub inference: InferenceConfig,

    /// Analysis behavior settings
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            inference: InferenceConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `CredError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.inference.timeout_secs == 0 {
            return Err(CredError::Config(
                "inference timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.inference.model.trim().is_empty() {
            return Err(CredError::Config(
                "inference model must not be empty".to_string(),
            ));
        }

        url::Url::parse(&self.inference.endpoint).map_err(|e| {
            CredError::Config(format!(
                "invalid inference endpoint '{}': {}",
                self.inference.endpoint, e
            ))
        })?;

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Run the free-memory preflight check before each analysis
    pub memory_check: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { memory_check: true }
    }
}
