//! Statistical Drift Scorer
//!
//! Scores the divergence between a baseline and a current numeric series,
//! tolerant of noise below a configured threshold, and classifies the
//! result into a severity tier for alerting.

use crate::config::ScoringConfig;
use crate::error::{computation_error, DriftResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Floor applied to both operands of the log ratio. Normalized values are
/// signed z-scores, so the raw ratio can be negative or zero; flooring keeps
/// the logarithm defined while preserving the elementwise formula.
const EPS: f64 = 1e-10;

/// Severity classification for a drift score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Thresholds checked from highest to lowest, first match wins
const SEVERITY_THRESHOLDS: [(f64, Severity); 3] = [
    (0.8, Severity::Critical),
    (0.6, Severity::High),
    (0.4, Severity::Medium),
];

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Classify a drift score. Boundaries are inclusive; LOW is the floor.
    pub fn from_score(score: f64) -> Severity {
        for (threshold, severity) in SEVERITY_THRESHOLDS {
            if score >= threshold {
                return severity;
            }
        }
        Severity::Low
    }
}

/// Outcome of a single drift detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftScoreResult {
    pub timestamp: DateTime<Utc>,
    pub drift_score: f64,
    pub severity: Severity,
    pub baseline_size: usize,
    pub current_size: usize,
    pub tolerance: f64,
}

/// The statistical drift detector
#[derive(Debug, Clone)]
pub struct DriftDetector {
    tolerance: f64,
}

impl DriftDetector {
    /// Create a detector with the given noise tolerance
    pub fn new(tolerance: f64) -> Self {
        tracing::debug!("Initialized drift detector with tolerance {}", tolerance);
        Self { tolerance }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.tolerance)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Normalize a series to zero mean and unit variance.
    ///
    /// An empty series normalizes to an empty series; a constant series
    /// (zero variance) normalizes to all zeros rather than dividing by zero.
    pub fn normalize(data: &[f64]) -> Vec<f64> {
        if data.is_empty() {
            return Vec::new();
        }

        let mean = data.iter().sum::<f64>() / data.len() as f64;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;
        let std_dev = variance.sqrt();

        if std_dev == 0.0 {
            return vec![0.0; data.len()];
        }

        data.iter().map(|x| (x - mean) / std_dev).collect()
    }

    /// Raw drift score: elementwise KL-style divergence between the
    /// normalized series, minus the noise tolerance, floored at zero.
    pub fn calculate_drift_score(&self, baseline: &[f64], current: &[f64]) -> DriftResult<f64> {
        if baseline.is_empty() || current.is_empty() {
            return Ok(0.0);
        }

        if baseline.len() != current.len() {
            return Err(computation_error(format!(
                "series length mismatch: baseline has {}, current has {}",
                baseline.len(),
                current.len()
            )));
        }

        if baseline.iter().chain(current).any(|x| !x.is_finite()) {
            return Err(computation_error(
                "input series must contain only finite values",
            ));
        }

        let baseline_norm = Self::normalize(baseline);
        let current_norm = Self::normalize(current);

        let mut divergence = 0.0;
        for (c, b) in current_norm.iter().zip(&baseline_norm) {
            // Indices where the normalized current value is zero contribute
            // nothing; the exclusion is checked on the unfloored value.
            if *c != 0.0 {
                let c = c.max(EPS);
                let b = b.max(EPS);
                divergence += c * (c / b).ln();
            }
        }

        if !divergence.is_finite() {
            return Err(computation_error(format!(
                "divergence is not finite ({divergence}); input series must contain finite values"
            )));
        }

        let drift_score = (divergence - self.tolerance).max(0.0);
        tracing::debug!("Calculated drift score: {}", drift_score);
        Ok(drift_score)
    }

    /// Score the drift between a baseline and a current series and classify
    /// its severity
    pub fn detect_drift(&self, baseline: &[f64], current: &[f64]) -> DriftResult<DriftScoreResult> {
        let drift_score = self.calculate_drift_score(baseline, current)?;
        let severity = Severity::from_score(drift_score);

        let result = DriftScoreResult {
            timestamp: Utc::now(),
            drift_score,
            severity,
            baseline_size: baseline.len(),
            current_size: current.len(),
            tolerance: self.tolerance,
        };

        tracing::info!(
            drift_score = result.drift_score,
            severity = ?result.severity,
            baseline_size = result.baseline_size,
            current_size = result.current_size,
            "Drift detection completed"
        );

        Ok(result)
    }
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
