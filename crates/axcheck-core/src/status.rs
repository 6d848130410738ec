//! Evaluation codes and status aggregation

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Outcome of evaluating one rule against one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationCode {
    Pass,
    /// The node violates the rule
    Error,
    Warning,
    Note,
    /// Needs human review
    Open,
    ScanNotSupported,
    /// The rule matched but could not compute a result for the node
    RuleExecutionError,
}

impl EvaluationCode {
    /// Status this code contributes to an aggregate
    pub fn scan_status(self) -> ScanStatus {
        match self {
            Self::Pass | Self::Note => ScanStatus::Pass,
            Self::Error => ScanStatus::Fail,
            Self::Warning | Self::Open | Self::RuleExecutionError => ScanStatus::Uncertain,
            Self::ScanNotSupported => ScanStatus::ScanNotSupported,
        }
    }
}

impl fmt::Display for EvaluationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Summary status of a node, a subtree or a scan.
///
/// Variants are ordered by aggregation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScanStatus {
    NoResult,
    Pass,
    Uncertain,
    Fail,
    ScanNotSupported,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result of aggregating a sequence of statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregate {
    /// Nothing to aggregate
    Empty,
    /// Highest priority status; never `NoResult`
    Status(ScanStatus),
    /// Every entry was `NoResult`; carries the number of entries
    AllNoResult(usize),
}

impl Aggregate {
    /// Summary status; `NoResult` for both empty and anomalous input
    pub fn status(self) -> ScanStatus {
        match self {
            Self::Status(status) => status,
            Self::Empty | Self::AllNoResult(_) => ScanStatus::NoResult,
        }
    }

    pub fn is_anomalous(self) -> bool {
        matches!(self, Self::AllNoResult(_))
    }
}

/// Aggregate statuses by priority:
/// ScanNotSupported > Fail > Uncertain > Pass.
pub fn aggregate<I>(statuses: I) -> Aggregate
where
    I: IntoIterator<Item = ScanStatus>,
{
    let mut entries = 0usize;
    let mut highest = ScanStatus::NoResult;

    for status in statuses {
        entries += 1;
        highest = highest.max(status);
        if highest == ScanStatus::ScanNotSupported {
            return Aggregate::Status(highest);
        }
    }

    match (entries, highest) {
        (0, _) => Aggregate::Empty,
        (n, ScanStatus::NoResult) => {
            warn!(entries = n, "Aggregated statuses were all NoResult");
            Aggregate::AllNoResult(n)
        }
        (_, status) => Aggregate::Status(status),
    }
}

/// Aggregate evaluation codes
pub fn aggregate_codes<I>(codes: I) -> Aggregate
where
    I: IntoIterator<Item = EvaluationCode>,
{
    aggregate(codes.into_iter().map(EvaluationCode::scan_status))
}
