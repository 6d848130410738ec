//! Text and JSON rendering of scan results and rule listings

use axcheck_core::{Aggregate, PropertyId, RuleId};
use axcheck_engine::{RuleOutcome, RuleRegistry, ScanResults, Standard};
use serde::Serialize;
use std::io::{self, Write};

pub fn write_scan_text(results: &ScanResults, out: &mut impl Write) -> io::Result<()> {
    for node in results.nodes.iter().filter(|n| !n.results.is_empty()) {
        match &node.name {
            Some(name) => writeln!(
                out,
                "{} {} {:?}: {}",
                node.node,
                node.control_type,
                name,
                node.status().status()
            )?,
            None => writeln!(
                out,
                "{} {}: {}",
                node.node,
                node.control_type,
                node.status().status()
            )?,
        }

        for result in &node.results {
            match &result.outcome {
                RuleOutcome::Evaluated { code } => writeln!(out, "  {}: {}", result.rule, code)?,
                RuleOutcome::Failed { error } => {
                    writeln!(out, "  {}: skipped ({})", result.rule, error)?
                }
            }
        }
    }

    let status = results.status();
    if let Aggregate::AllNoResult(n) = status {
        writeln!(out, "warning: {} results carried no status", n)?;
    }
    if results.truncated {
        writeln!(out, "warning: node limit reached, scan truncated")?;
    }

    let evaluations: usize = results.counts().values().sum();
    writeln!(
        out,
        "Scan status: {} ({} nodes, {} evaluations, {} skipped)",
        status.status(),
        results.nodes.len(),
        evaluations,
        results.failure_count()
    )
}

#[derive(Serialize)]
struct ScanReport<'a> {
    status: axcheck_core::ScanStatus,
    counts: std::collections::BTreeMap<String, usize>,
    skipped: usize,
    #[serde(flatten)]
    results: &'a ScanResults,
}

pub fn write_scan_json(results: &ScanResults, out: &mut impl Write) -> io::Result<()> {
    let report = ScanReport {
        status: results.status().status(),
        counts: results.counts(),
        skipped: results.failure_count(),
        results,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

#[derive(Serialize)]
struct RuleListing {
    id: RuleId,
    description: &'static str,
    how_to_fix: &'static str,
    standard: Standard,
    reference: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_id: Option<PropertyId>,
    condition: String,
}

fn listings(registry: &RuleRegistry) -> Vec<RuleListing> {
    registry
        .rules()
        .iter()
        .map(|rule| {
            let info = rule.info();
            RuleListing {
                id: info.id,
                description: info.description,
                how_to_fix: info.how_to_fix,
                standard: info.standard,
                reference: info.standard.reference(),
                property_id: info.property_id,
                condition: rule.condition().to_string(),
            }
        })
        .collect()
}

pub fn write_rules_text(registry: &RuleRegistry, out: &mut impl Write) -> io::Result<()> {
    for listing in listings(registry) {
        writeln!(out, "{} [{}]", listing.id, listing.reference)?;
        writeln!(out, "  {}", listing.description)?;
        writeln!(out, "  applies when: {}", listing.condition)?;
    }
    Ok(())
}

pub fn write_rules_json(registry: &RuleRegistry, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &listings(registry))?;
    writeln!(out)
}
