//! Rule registry
//!
//! Rules are listed explicitly as [`RuleDefinition`] records and built once
//! against one [`EngineConfig`]. The registry keeps registration order;
//! scanners evaluate rules in that order.

use crate::config::EngineConfig;
use crate::rule::{Rule, RuleDefinition};
use axcheck_core::{Error, Result, RuleId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of built rules keyed by id
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    config: Arc<EngineConfig>,
    rules: Vec<Rule>,
    index: HashMap<RuleId, usize>,
}

impl RuleRegistry {
    /// Create an empty registry; the configuration must pass
    /// [`EngineConfig::validate`]
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            rules: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Build a registry from definitions, skipping rules the configuration
    /// disables
    pub fn from_definitions(definitions: &[RuleDefinition], config: EngineConfig) -> Result<Self> {
        let mut registry = Self::new(config)?;

        for definition in definitions {
            registry.register(definition)?;
        }

        info!(
            "Rule registry initialized with {}/{} rules",
            registry.len(),
            definitions.len()
        );
        Ok(registry)
    }

    /// Build and add one rule.
    ///
    /// Returns `Ok(false)` when the configuration disables the rule.
    pub fn register(&mut self, definition: &RuleDefinition) -> Result<bool> {
        let id = definition.info.id;

        if self.index.contains_key(&id) {
            return Err(Error::config(format!("Rule '{}' registered twice", id)));
        }

        if self.config.is_disabled(id) {
            debug!(rule = %id, "Rule disabled by configuration");
            return Ok(false);
        }

        let rule = Rule::new(definition, Arc::clone(&self.config));
        debug!(rule = %id, condition = %rule.condition(), "Registered rule");

        self.index.insert(id, self.rules.len());
        self.rules.push(rule);
        Ok(true)
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.index.get(&id).map(|&i| &self.rules[i])
    }

    /// Rules in registration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules.iter().map(Rule::id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
