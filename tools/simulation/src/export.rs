//! Report export
//!
//! Bundles a run's metrics and scenario outcomes into a timestamped JSON
//! report for dashboards and regression tracking.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::SimMetrics;
use crate::scenarios::ScenarioResult;

/// Everything worth keeping from one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub metrics: SimMetrics,
    pub scenarios: Vec<ScenarioResult>,
}

/// Assemble a report stamped with the current time.
pub fn build_report(seed: u64, metrics: &SimMetrics, scenarios: Vec<ScenarioResult>) -> SimulationReport {
    SimulationReport {
        version: crate::VERSION.to_string(),
        generated_at: Utc::now(),
        seed,
        metrics: metrics.clone(),
        scenarios,
    }
}

/// Pretty-printed JSON for a report.
pub fn report_json(report: &SimulationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_default()
}

/// Write a report to disk as JSON.
pub fn write_to_file(report: &SimulationReport, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, report_json(report))
}
