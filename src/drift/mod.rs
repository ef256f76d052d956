//! Drift Detection Module
//!
//! The heart of DriftWatch - detecting what changed in the inventory.
//! This module provides:
//! - Structural diff engine (comparing snapshot documents)
//! - Statistical drift scorer (noise-tolerant divergence + severity)
//! - Summary aggregation (severity distributions for dashboards)

pub mod diff;
pub mod score;
pub mod summary;

pub use diff::{diff_snapshots, DiffEngine, DriftReport, ValueChange};
pub use score::{DriftDetector, DriftScoreResult, Severity};
pub use summary::{summarize, DriftSummary};

use crate::error::{DriftError, DriftResult};
use crate::store::SnapshotStore;

/// Compare the two most recent snapshots in the store.
///
/// Fails with [`DriftError::InsufficientSnapshots`] when fewer than two
/// snapshots have been captured; callers should surface this as "not enough
/// data to detect drift" rather than a hard failure.
pub async fn detect_structural_drift(store: &SnapshotStore) -> DriftResult<DriftReport> {
    let (latest, previous) = store
        .latest_pair()
        .await
        .ok_or(DriftError::InsufficientSnapshots)?;

    let report = diff_snapshots(&previous, &latest);

    if report.is_empty() {
        tracing::info!("No drift detected between the two most recent snapshots");
    } else {
        tracing::info!(
            added = report.added.len(),
            removed = report.removed.len(),
            changed = report.changed.len(),
            "Drift detected between the two most recent snapshots"
        );
    }

    Ok(report)
}
