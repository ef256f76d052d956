//! DriftWatch - Cloud Inventory Drift Engine
//!
//! Detects and classifies drift between successive snapshots of a cloud
//! resource inventory:
//! - Structural diff: what resources/fields appeared, vanished, or changed,
//!   ignoring enumeration order within resource lists
//! - Statistical scoring: a noise-tolerant divergence score over paired
//!   numeric series, classified into LOW/MEDIUM/HIGH/CRITICAL tiers
//! - Summary aggregation: severity distributions for dashboards
//!
//! The engines are pure and stateless; the only stateful type is the
//! in-memory [`SnapshotStore`] that holds the capture history. Collection
//! scheduling, provider enumeration, persistence, and the reporting surface
//! all live with the embedding service.

pub mod config;
pub mod drift;
pub mod error;
pub mod inventory;
pub mod store;

pub use config::{ScoringConfig, Settings, StoreConfig};
pub use drift::{
    detect_structural_drift, diff_snapshots, summarize, DiffEngine, DriftDetector, DriftReport,
    DriftScoreResult, DriftSummary, Severity, ValueChange,
};
pub use error::{DriftError, DriftResult};
pub use inventory::{resource_group_from_id, ResourceGroupRecord, ResourceRecord, Snapshot};
pub use store::{SnapshotMetadata, SnapshotStore};
