//! Drift Summary Aggregator
//!
//! Rolls up scored detections into distribution statistics for dashboards.

use crate::drift::score::{DriftScoreResult, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view over a set of drift detections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub total_detections: usize,
    /// Counts per severity tier; every tier is always present
    pub severity_distribution: BTreeMap<Severity, usize>,
    pub average_drift_score: f64,
    pub timestamp: DateTime<Utc>,
}

/// Summarize a set of drift detections.
///
/// An empty input yields zero detections and an average score of zero.
pub fn summarize(results: &[DriftScoreResult]) -> DriftSummary {
    let mut severity_distribution: BTreeMap<Severity, usize> =
        Severity::ALL.iter().map(|s| (*s, 0)).collect();
    let mut total_drift_score = 0.0;

    for result in results {
        *severity_distribution.entry(result.severity).or_insert(0) += 1;
        total_drift_score += result.drift_score;
    }

    let average_drift_score = if results.is_empty() {
        0.0
    } else {
        total_drift_score / results.len() as f64
    };

    DriftSummary {
        total_detections: results.len(),
        severity_distribution,
        average_drift_score,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(severity: Severity, drift_score: f64) -> DriftScoreResult {
        DriftScoreResult {
            timestamp: Utc::now(),
            drift_score,
            severity,
            baseline_size: 5,
            current_size: 5,
            tolerance: 0.1,
        }
    }

    #[test]
    fn test_summary_counts_each_tier() {
        let results = vec![
            result(Severity::Critical, 0.9),
            result(Severity::High, 0.7),
            result(Severity::Medium, 0.5),
            result(Severity::Low, 0.1),
        ];

        let summary = summarize(&results);

        assert_eq!(summary.total_detections, 4);
        assert_eq!(summary.severity_distribution[&Severity::Critical], 1);
        assert_eq!(summary.severity_distribution[&Severity::High], 1);
        assert_eq!(summary.severity_distribution[&Severity::Medium], 1);
        assert_eq!(summary.severity_distribution[&Severity::Low], 1);
        assert!((summary.average_drift_score - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_input() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_detections, 0);
        assert_eq!(summary.average_drift_score, 0.0);
        // All tiers still present, at zero
        assert_eq!(summary.severity_distribution.len(), 4);
        assert!(summary.severity_distribution.values().all(|&count| count == 0));
    }

    #[test]
    fn test_summary_serializes_tier_names() {
        let summary = summarize(&[result(Severity::Critical, 0.9)]);
        let encoded = serde_json::to_value(&summary).unwrap();
        assert_eq!(encoded["severity_distribution"]["CRITICAL"], 1);
        assert_eq!(encoded["severity_distribution"]["LOW"], 0);
        assert_eq!(encoded["total_detections"], 1);
    }
}
