//! Engine configuration
//!
//! One immutable [`EngineConfig`] value is handed to every rule when the
//! registry builds it and again on every evaluation. Rules never read
//! ambient state.

use axcheck_core::{Error, Result, RuleId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by the registry, the rules and the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pixels a child rectangle may extend past its parent on each side
    #[serde(default = "default_containment_margin")]
    pub containment_margin: i32,

    /// Longest name, in characters, considered reasonable
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Most descendants a bounded descendant count visits
    #[serde(default = "default_descendant_count_limit")]
    pub descendant_count_limit: usize,

    /// Most nodes one scan visits
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Evaluate nodes on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Rules left out of the registry
    #[serde(default)]
    pub disabled_rules: Vec<RuleId>,
}

impl EngineConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; `.json` files are read as JSON,
    /// anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.containment_margin < 0 {
            return Err(Error::config(format!(
                "containment_margin must not be negative, got {}",
                self.containment_margin
            )));
        }

        for (name, value) in [
            ("descendant_count_limit", self.descendant_count_limit),
            ("max_nodes", self.max_nodes),
        ] {
            if value == 0 || value == usize::MAX {
                return Err(Error::config(format!(
                    "{} must be in 1..usize::MAX, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn is_disabled(&self, id: RuleId) -> bool {
        self.disabled_rules.contains(&id)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            containment_margin: default_containment_margin(),
            max_name_length: default_max_name_length(),
            descendant_count_limit: default_descendant_count_limit(),
            max_nodes: default_max_nodes(),
            parallel: true,
            disabled_rules: Vec::new(),
        }
    }
}

fn default_containment_margin() -> i32 {
    1
}

fn default_max_name_length() -> usize {
    512
}

fn default_descendant_count_limit() -> usize {
    10_000
}

fn default_max_nodes() -> usize {
    100_000
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.containment_margin, 1);
        assert!(config.parallel);
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
containment_margin: 4
max_name_length: 100
parallel: false
disabled_rules:
  - NameNotNull
  - LandmarkOneMain
"#;

        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.containment_margin, 4);
        assert_eq!(config.max_name_length, 100);
        assert!(!config.parallel);
        assert!(config.is_disabled(RuleId::NameNotNull));
        assert!(!config.is_disabled(RuleId::NameNotEmpty));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EngineConfig::from_yaml("containment_margin: -1").is_err());
        assert!(EngineConfig::from_yaml("max_nodes: 0").is_err());
        assert!(EngineConfig::from_json(r#"{"descendant_count_limit": 0}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axcheck.json");
        std::fs::write(&path, r#"{"max_nodes": 50}"#).unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.max_nodes, 50);
    }
}
