//! Engine configuration for the command line

use crate::ScanArgs;
use anyhow::Context;
use axcheck_engine::EngineConfig;
use std::path::Path;
use tracing::info;

/// Load configuration from an optional file and apply command-line overrides
pub fn load(config_path: Option<&Path>, args: &ScanArgs) -> anyhow::Result<EngineConfig> {
    let mut config = match config_path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(margin) = args.margin {
        config.containment_margin = margin;
    }

    if let Some(max_nodes) = args.max_nodes {
        config.max_nodes = max_nodes;
    }

    if args.sequential {
        config.parallel = false;
    }

    for id in &args.disable {
        if !config.disabled_rules.contains(id) {
            config.disabled_rules.push(*id);
        }
    }

    config.validate()?;
    info!(
        margin = config.containment_margin,
        max_nodes = config.max_nodes,
        parallel = config.parallel,
        disabled = config.disabled_rules.len(),
        "Configuration loaded"
    );
    Ok(config)
}
