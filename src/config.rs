//! Analysis configuration
//!
//! Loaded from YAML; every field has a default so partial files are accepted.

use crate::algo::EigenvectorConfig;
use crate::selection::{SelectionError, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which subgraph to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// `full`, `lwcc` or `kcore`
    pub policy: String,
    /// Only used by `kcore`
    pub k: i64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            policy: "full".to_string(),
            k: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorSettings {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorSettings {
    fn default() -> Self {
        let defaults = EigenvectorConfig::default();
        Self {
            max_iterations: defaults.max_iterations,
            tolerance: defaults.tolerance,
        }
    }
}

impl From<EigenvectorSettings> for EigenvectorConfig {
    fn from(settings: EigenvectorSettings) -> Self {
        EigenvectorConfig {
            max_iterations: settings.max_iterations,
            tolerance: settings.tolerance,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub selection: SelectionConfig,
    /// Requested ranking length; clamped to `[1, |V|]` at ranking time
    pub top_k: i64,
    pub eigenvector: EigenvectorSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            top_k: 10,
            eigenvector: EigenvectorSettings::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(text)?;
        // reject a bad policy at load time rather than at first use
        config.policy()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// The validated selection policy
    pub fn policy(&self) -> Result<SelectionPolicy, SelectionError> {
        SelectionPolicy::from_name(&self.selection.policy, self.selection.k)
    }

    pub fn eigenvector_config(&self) -> EigenvectorConfig {
        self.eigenvector.into()
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        let (name, k) = match policy {
            SelectionPolicy::Full => ("full", self.selection.k),
            SelectionPolicy::LargestWeaklyConnectedComponent => ("lwcc", self.selection.k),
            SelectionPolicy::KCore(k) => ("kcore", i64::from(k)),
        };
        self.selection = SelectionConfig {
            policy: name.to_string(),
            k,
        };
        self
    }

    pub fn with_top_k(mut self, top_k: i64) -> Self {
        self.top_k = top_k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.policy().unwrap(), SelectionPolicy::Full);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.selection.k, 2);
        assert_eq!(config.eigenvector.max_iterations, 1000);
    }

    #[test]
    fn test_partial_yaml() {
        let config = AnalysisConfig::from_yaml_str("selection:\n  policy: kcore\n  k: 3\n").unwrap();
        assert_eq!(config.policy().unwrap(), SelectionPolicy::KCore(3));
        assert_eq!(config.top_k, 10);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
selection:
  policy: lwcc
top_k: 5
eigenvector:
  max_iterations: 200
  tolerance: 1.0e-8
"#;
        let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.policy().unwrap(), SelectionPolicy::LargestWeaklyConnectedComponent);
        assert_eq!(config.top_k, 5);
        let eig = config.eigenvector_config();
        assert_eq!(eig.max_iterations, 200);
        assert_eq!(eig.tolerance, 1.0e-8);
    }

    #[test]
    fn test_invalid_k_rejected() {
        let err = AnalysisConfig::from_yaml_str("selection:\n  policy: kcore\n  k: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Selection(SelectionError::InvalidParameter { .. })));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = AnalysisConfig::from_yaml_str("top_k: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_with_policy_override() {
        let config = AnalysisConfig::default().with_policy(SelectionPolicy::KCore(4));
        assert_eq!(config.policy().unwrap(), SelectionPolicy::KCore(4));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisConfig::from_yaml_file("/no/such/graphlens.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
