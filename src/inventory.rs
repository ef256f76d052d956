//! Inventory Snapshot Model
//!
//! Point-in-time captures of a cloud resource inventory, as delivered by
//! the (external) collector: resource groups, each holding the resources
//! whose id path places them in that group.

use crate::error::{validation_error, DriftResult};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Matches the resource-group segment of a resource id path,
/// e.g. `/subscriptions/<sub>/resourceGroups/<name>/providers/...`
static RESOURCE_GROUP_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/resourcegroups/([^/]+)").unwrap());

/// Extract the resource-group name from a resource id path.
///
/// The match is case-insensitive; the captured name keeps its original casing.
pub fn resource_group_from_id(id: &str) -> Option<String> {
    RESOURCE_GROUP_SEGMENT
        .captures(id)
        .map(|caps| caps[1].to_string())
}

/// Complete inventory snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub resources: Vec<ResourceGroupRecord>,
    pub checksum: String,
}

/// One resource group and the resources enumerated inside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroupRecord {
    pub resource_group: String,
    pub location: String,
    pub resources: Vec<ResourceRecord>,
}

/// A single inventoried resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub id: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ResourceRecord {
    /// Resource-group name parsed from this resource's id path
    pub fn resource_group(&self) -> Option<String> {
        resource_group_from_id(&self.id)
    }
}

impl ResourceGroupRecord {
    /// Whether this group is the one named in the resource's id path.
    /// Group names compare case-insensitively.
    pub fn owns(&self, resource: &ResourceRecord) -> bool {
        resource
            .resource_group()
            .map(|name| name.eq_ignore_ascii_case(&self.resource_group))
            .unwrap_or(false)
    }
}

impl Snapshot {
    /// Create a snapshot from collected resource groups, stamping the
    /// capture time and content checksum
    pub fn new(resources: Vec<ResourceGroupRecord>) -> Self {
        let checksum = Self::compute_checksum(&resources);
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            resources,
            checksum,
        }
    }

    /// Compute checksum from inventory content.
    ///
    /// Inputs are sorted first, so two captures that differ only in
    /// enumeration order produce the same checksum.
    pub fn compute_checksum(resources: &[ResourceGroupRecord]) -> String {
        let mut hasher = Sha256::new();

        let mut group_lines: Vec<String> = resources
            .iter()
            .map(|g| format!("{}:{}", g.resource_group, g.location))
            .collect();
        group_lines.sort();
        for line in &group_lines {
            hasher.update(line.as_bytes());
        }

        let mut resource_lines: Vec<String> = resources
            .iter()
            .flat_map(|g| g.resources.iter())
            .map(|r| {
                let tags: Vec<String> = r.tags.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{}:{}:{}:[{}]", r.id, r.kind, r.location, tags.join(","))
            })
            .collect();
        resource_lines.sort();
        for line in &resource_lines {
            hasher.update(line.as_bytes());
        }

        let result = hasher.finalize();
        format!("{:x}", result)
    }

    /// Total number of resources across all groups
    pub fn resource_count(&self) -> usize {
        self.resources.iter().map(|g| g.resources.len()).sum()
    }

    /// Check snapshot invariants: every resource id is unique, and every
    /// resource sits in the group named by its id path
    pub fn validate(&self) -> DriftResult<()> {
        let mut seen: HashSet<&str> = HashSet::new();

        for group in &self.resources {
            for resource in &group.resources {
                if !seen.insert(resource.id.as_str()) {
                    return Err(validation_error(format!(
                        "duplicate resource id '{}' in snapshot",
                        resource.id
                    )));
                }
                if !group.owns(resource) {
                    return Err(validation_error(format!(
                        "resource '{}' does not belong to resource group '{}'",
                        resource.id, group.resource_group
                    )));
                }
            }
        }

        Ok(())
    }

    /// Serialize to the JSON document form consumed by the diff engine
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resource(name: &str, group: &str) -> ResourceRecord {
        ResourceRecord {
            name: name.to_string(),
            kind: "Microsoft.Storage/storageAccounts".to_string(),
            location: "westeurope".to_string(),
            id: format!(
                "/subscriptions/sub-1/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}",
                group, name
            ),
            tags: BTreeMap::new(),
        }
    }

    fn group(name: &str, resources: Vec<ResourceRecord>) -> ResourceGroupRecord {
        ResourceGroupRecord {
            resource_group: name.to_string(),
            location: "westeurope".to_string(),
            resources,
        }
    }

    #[test]
    fn test_resource_group_from_id_is_case_insensitive() {
        let id = "/subscriptions/sub-1/RESOURCEGROUPS/Prod-RG/providers/x/y/z";
        assert_eq!(resource_group_from_id(id), Some("Prod-RG".to_string()));
        assert_eq!(resource_group_from_id("/no/group/here"), None);
    }

    #[test]
    fn test_group_ownership_ignores_case() {
        let res = resource("stor1", "Prod-RG");
        let owner = group("prod-rg", vec![]);
        let other = group("dev-rg", vec![]);
        assert!(owner.owns(&res));
        assert!(!other.owns(&res));
    }

    #[test]
    fn test_checksum_consistency() {
        let groups = vec![group("prod-rg", vec![resource("stor1", "prod-rg")])];
        let checksum1 = Snapshot::compute_checksum(&groups);
        let checksum2 = Snapshot::compute_checksum(&groups);
        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_ignores_enumeration_order() {
        let forward = vec![
            group("a-rg", vec![resource("stor1", "a-rg"), resource("stor2", "a-rg")]),
            group("b-rg", vec![resource("stor3", "b-rg")]),
        ];
        let shuffled = vec![
            group("b-rg", vec![resource("stor3", "b-rg")]),
            group("a-rg", vec![resource("stor2", "a-rg"), resource("stor1", "a-rg")]),
        ];
        assert_eq!(
            Snapshot::compute_checksum(&forward),
            Snapshot::compute_checksum(&shuffled)
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let snapshot = Snapshot::new(vec![group(
            "prod-rg",
            vec![resource("stor1", "prod-rg"), resource("stor1", "prod-rg")],
        )]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_misplaced_resource() {
        let snapshot = Snapshot::new(vec![group("dev-rg", vec![resource("stor1", "prod-rg")])]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_snapshot() {
        let snapshot = Snapshot::new(vec![
            group("prod-rg", vec![resource("stor1", "Prod-RG")]),
            group("dev-rg", vec![resource("stor2", "dev-rg")]),
        ]);
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.resource_count(), 2);
    }
}
