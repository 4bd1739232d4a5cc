// src/config/mod.rs
//! Analysis configuration system
//! Handles TOML parsing and validation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Fixed power budget per architecture, in mW.
    pub power_mw: HashMap<String, f64>,
    /// Which rows each comparison admits, per architecture.
    pub selections: Vec<SelectionRule>,
}

/// Selection predicate for one architecture: only rows from `question` with
/// an L1 size in `l1_sizes_kb` enter the efficiency comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRule {
    pub arch: String,
    pub question: String,
    pub l1_sizes_kb: Vec<u32>,
}

impl AnalysisConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;

        let config: AnalysisConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Default configuration for the A7/A15 cache-size study.
    ///
    /// Power figures at 28 nm: A7 0.10 mW/MHz at fmax 1.0 GHz -> 100 mW,
    /// A15 0.20 mW/MHz at fmax 2.5 GHz -> 500 mW.
    pub fn default_study() -> Self {
        Self {
            power_mw: {
                let mut map = HashMap::new();
                map.insert("a7".to_string(), 100.0);
                map.insert("a15".to_string(), 500.0);
                map
            },
            selections: vec![
                SelectionRule {
                    arch: "a7".to_string(),
                    question: "Q4".to_string(),
                    l1_sizes_kb: vec![1, 2, 4, 8, 16],
                },
                SelectionRule {
                    arch: "a15".to_string(),
                    question: "Q5".to_string(),
                    l1_sizes_kb: vec![2, 4, 8, 16, 32],
                },
            ],
        }
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selections.is_empty() {
            return Err(ConfigError::Validation(
                "At least one selection rule is required".to_string(),
            ));
        }

        for rule in &self.selections {
            if rule.l1_sizes_kb.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Selection for {} admits no L1 sizes",
                    rule.arch
                )));
            }
        }

        for (arch, &power) in &self.power_mw {
            if power < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "Negative power budget for {}: {}",
                    arch, power
                )));
            }
        }

        Ok(())
    }

    /// Selection rule for an architecture, if one is configured.
    pub fn selection_for(&self, arch: &str) -> Option<&SelectionRule> {
        self.selections.iter().find(|rule| rule.arch == arch)
    }

    /// Fixed power budget for an architecture, in mW.
    pub fn power_for(&self, arch: &str) -> Option<f64> {
        self.power_mw.get(arch).copied()
    }

    /// Export configuration to TOML string
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_str = self.to_toml_string()?;
        std::fs::write(path.as_ref(), toml_str).map_err(ConfigError::Io)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
