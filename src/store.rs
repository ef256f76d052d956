//! Snapshot Store
//!
//! Keeps the captured snapshot history, newest first, for the comparison
//! engine. Think of this as the commit log the drift detector reads from.

use crate::error::DriftResult;
use crate::inventory::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Metadata about a snapshot (lightweight, used for listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub checksum: String,
    pub group_count: usize,
    pub resource_count: usize,
}

impl From<&Snapshot> for SnapshotMetadata {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id,
            timestamp: snapshot.timestamp,
            checksum: snapshot.checksum.clone(),
            group_count: snapshot.resources.len(),
            resource_count: snapshot.resource_count(),
        }
    }
}

/// In-memory store for captured snapshots, ordered newest first
pub struct SnapshotStore {
    snapshots: Arc<RwLock<Vec<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store a snapshot, taking ownership. The snapshot is validated and
    /// inserted in timestamp order (newest first).
    pub async fn save(&self, snapshot: Snapshot) -> DriftResult<SnapshotMetadata> {
        snapshot.validate()?;
        let metadata = SnapshotMetadata::from(&snapshot);

        let mut snapshots = self.snapshots.write().await;
        let position = snapshots
            .iter()
            .position(|existing| existing.timestamp <= snapshot.timestamp)
            .unwrap_or(snapshots.len());
        snapshots.insert(position, snapshot);

        tracing::info!(
            "Saved snapshot {} ({} groups, {} resources), {} held",
            metadata.id,
            metadata.group_count,
            metadata.resource_count,
            snapshots.len()
        );

        Ok(metadata)
    }

    /// All stored snapshots, newest first
    pub async fn get_recent(&self) -> Vec<Snapshot> {
        self.snapshots.read().await.clone()
    }

    /// The two most recent snapshots as (latest, previous).
    /// Returns None when fewer than two are held.
    pub async fn latest_pair(&self) -> Option<(Snapshot, Snapshot)> {
        let snapshots = self.snapshots.read().await;
        match snapshots.as_slice() {
            [latest, previous, ..] => Some((latest.clone(), previous.clone())),
            _ => None,
        }
    }

    /// The most recent snapshot, if any
    pub async fn get_latest(&self) -> Option<Snapshot> {
        self.snapshots.read().await.first().cloned()
    }

    /// List all stored snapshots (metadata only), newest first
    pub async fn list(&self) -> Vec<SnapshotMetadata> {
        self.snapshots
            .read()
            .await
            .iter()
            .map(SnapshotMetadata::from)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }

    /// Delete old snapshots, keeping the most recent `keep` entries.
    /// Returns the number removed.
    pub async fn prune(&self, keep: usize) -> usize {
        let mut snapshots = self.snapshots.write().await;
        if snapshots.len() <= keep {
            return 0;
        }

        let removed = snapshots.len() - keep;
        snapshots.truncate(keep);

        tracing::info!("Pruned {} old snapshots, {} kept", removed, keep);
        removed
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
