// # Memory VinylDNS
//
// In-process implementation of the VinylDNS API.
//
// ## Purpose
//
// Lets the lifecycle controllers and the change poller run end to end
// without a VinylDNS deployment: tests, demos and embedding experiments.
//
// ## Change Processing
//
// Mutations are applied to the stored objects immediately, but the change
// record they return is resolved lazily. Each status lookup consumes one
// step of the configured [`ChangeBehavior`]:
//
// 1. `invisible_lookups` lookups answer "not found" (read-after-write lag)
// 2. `pending_lookups` lookups answer `Pending`
// 3. every later lookup answers the terminal status (`Complete` for record
//    sets, `Synced` for zones) or `Failed`, per [`ChangeOutcome`]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::model::status;
use crate::model::{
    Group, RecordSet, RecordSetChange, RecordSetUpdateResponse, Zone, ZoneChange,
};
use crate::traits::VinylDnsApi;

/// How a queued change resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeOutcome {
    /// Reaches the kind's success status
    #[default]
    Succeed,
    /// Reaches `Failed`
    Fail,
    /// Never leaves `Pending`
    Stall,
}

/// Script followed by every change queued after it is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeBehavior {
    /// Lookups answered with "not found" before the change becomes visible
    pub invisible_lookups: usize,
    /// Lookups answered with `Pending` once visible
    pub pending_lookups: usize,
    /// Final status
    pub outcome: ChangeOutcome,
}

impl Default for ChangeBehavior {
    fn default() -> Self {
        Self {
            invisible_lookups: 0,
            pending_lookups: 1,
            outcome: ChangeOutcome::Succeed,
        }
    }
}

#[derive(Debug, Clone)]
struct QueuedChange {
    zone_id: String,
    record_set_id: Option<String>,
    change_type: &'static str,
    success: &'static str,
    invisible: usize,
    pending: usize,
    outcome: ChangeOutcome,
}

impl QueuedChange {
    /// Advance by one lookup; `None` while the change is not visible yet
    fn observe(&mut self) -> Option<String> {
        if self.invisible > 0 {
            self.invisible -= 1;
            return None;
        }
        if self.pending > 0 {
            self.pending -= 1;
            return Some(status::PENDING.to_string());
        }
        Some(
            match self.outcome {
                ChangeOutcome::Succeed => self.success,
                ChangeOutcome::Fail => status::FAILED,
                ChangeOutcome::Stall => status::PENDING,
            }
            .to_string(),
        )
    }

    /// The last observation was a terminal status
    fn is_resolved(&self) -> bool {
        self.invisible == 0 && self.pending == 0 && self.outcome != ChangeOutcome::Stall
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    behavior: ChangeBehavior,
    groups: HashMap<String, Group>,
    zones: HashMap<String, Zone>,
    record_sets: HashMap<String, HashMap<String, RecordSet>>,
    /// Unresolved changes; an entry is dropped once it reports a terminal status
    changes: HashMap<String, QueuedChange>,
    calls: HashMap<&'static str, usize>,
    injected: HashMap<&'static str, u16>,
}

impl Inner {
    fn mint(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Count the call and return an injected failure, if any
    fn enter(&mut self, operation: &'static str) -> Result<(), Error> {
        *self.calls.entry(operation).or_default() += 1;

        match self.injected.remove(operation) {
            Some(404) => Err(Error::not_found(format!("{operation}: injected 404"))),
            Some(code) => Err(Error::remote(Some(code), format!("{operation}: injected failure"))),
            None => Ok(()),
        }
    }

    fn queue(
        &mut self,
        zone_id: &str,
        record_set_id: Option<&str>,
        change_type: &'static str,
        success: &'static str,
    ) -> String {
        let change_id = self.mint("change");
        let behavior = self.behavior;
        self.changes.insert(
            change_id.clone(),
            QueuedChange {
                zone_id: zone_id.to_string(),
                record_set_id: record_set_id.map(str::to_string),
                change_type,
                success,
                invisible: behavior.invisible_lookups,
                pending: behavior.pending_lookups,
                outcome: behavior.outcome,
            },
        );
        change_id
    }

    fn zone(&self, zone_id: &str) -> Result<&Zone, Error> {
        self.zones
            .get(zone_id)
            .ok_or_else(|| Error::not_found(format!("zone {zone_id}")))
    }

    fn record_set(&self, zone_id: &str, record_set_id: &str) -> Result<&RecordSet, Error> {
        self.record_sets
            .get(zone_id)
            .and_then(|sets| sets.get(record_set_id))
            .ok_or_else(|| {
                Error::not_found(format!("record set {record_set_id} in zone {zone_id}"))
            })
    }

    fn zone_change(&self, change_id: &str, zone: Zone, change_type: &'static str) -> ZoneChange {
        ZoneChange {
            id: change_id.to_string(),
            zone,
            user_id: "memory".to_string(),
            change_type: change_type.to_string(),
            status: status::PENDING.to_string(),
            created: Some(Utc::now()),
        }
    }

    fn record_set_response(
        &self,
        change_id: String,
        record_set: RecordSet,
    ) -> RecordSetUpdateResponse {
        RecordSetUpdateResponse {
            record_set,
            change_id,
            status: status::PENDING.to_string(),
        }
    }
}

/// In-memory VinylDNS API
///
/// Clones share the same backing store.
///
/// # Example
///
/// ```rust
/// use vinyldns_core::api::MemoryVinylDns;
/// use vinyldns_core::model::Group;
/// use vinyldns_core::VinylDnsApi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = MemoryVinylDns::new();
///     let group = api
///         .group_create(&Group {
///             name: "ops".to_string(),
///             email: "ops@example.com".to_string(),
///             ..Group::default()
///         })
///         .await?;
///
///     assert_eq!(api.group(&group.id).await?.name, "ops");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryVinylDns {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryVinylDns {
    /// Create an empty API whose changes resolve after one `Pending` lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty API with a custom change script
    pub fn with_behavior(behavior: ChangeBehavior) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                behavior,
                ..Inner::default()
            })),
        }
    }

    /// Change the script for changes queued from now on
    pub async fn set_behavior(&self, behavior: ChangeBehavior) {
        self.inner.write().await.behavior = behavior;
    }

    /// Make the next call to `operation` fail with the given HTTP status
    ///
    /// `operation` is the trait method name (e.g. "zone_delete"); 404 yields
    /// a "not found" error.
    pub async fn inject_failure(&self, operation: &'static str, status: u16) {
        self.inner.write().await.injected.insert(operation, status);
    }

    /// Number of calls made to `operation`
    pub async fn calls(&self, operation: &str) -> usize {
        self.inner
            .read()
            .await
            .calls
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    /// Remove a record set behind the provider's back (out-of-band deletion)
    pub async fn forget_record_set(&self, zone_id: &str, record_set_id: &str) {
        if let Some(sets) = self.inner.write().await.record_sets.get_mut(zone_id) {
            sets.remove(record_set_id);
        }
    }

    /// Remove a zone behind the provider's back
    pub async fn forget_zone(&self, zone_id: &str) {
        let mut guard = self.inner.write().await;
        guard.zones.remove(zone_id);
        guard.record_sets.remove(zone_id);
    }

    /// Remove a group behind the provider's back
    pub async fn forget_group(&self, group_id: &str) {
        self.inner.write().await.groups.remove(group_id);
    }
}

#[async_trait]
impl VinylDnsApi for MemoryVinylDns {
    async fn group_create(&self, group: &Group) -> Result<Group, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("group_create")?;

        let mut created = group.clone();
        created.id = guard.mint("group");
        created.status = Some("Active".to_string());
        created.created = Some(Utc::now());
        guard.groups.insert(created.id.clone(), created.clone());

        Ok(created)
    }

    async fn group(&self, group_id: &str) -> Result<Group, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("group")?;

        guard
            .groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("group {group_id}")))
    }

    async fn group_update(&self, group_id: &str, group: &Group) -> Result<Group, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("group_update")?;

        let existing = guard
            .groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("group {group_id}")))?;

        let updated = Group {
            id: existing.id,
            status: existing.status,
            created: existing.created,
            ..group.clone()
        };
        guard.groups.insert(group_id.to_string(), updated.clone());

        Ok(updated)
    }

    async fn group_delete(&self, group_id: &str) -> Result<Group, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("group_delete")?;

        guard
            .groups
            .remove(group_id)
            .ok_or_else(|| Error::not_found(format!("group {group_id}")))
    }

    async fn zone_create(&self, zone: &Zone) -> Result<ZoneChange, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_create")?;

        if guard.zones.values().any(|z| z.name == zone.name) {
            return Err(Error::remote(
                Some(409),
                format!("Zone with name {} already exists", zone.name),
            ));
        }

        let mut created = zone.clone();
        created.id = guard.mint("zone");
        created.status = Some("Active".to_string());
        created.created = Some(Utc::now());
        guard.zones.insert(created.id.clone(), created.clone());

        let change_id = guard.queue(&created.id, None, "Create", status::SYNCED);
        Ok(guard.zone_change(&change_id, created, "Create"))
    }

    async fn zone(&self, zone_id: &str) -> Result<Zone, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone")?;
        guard.zone(zone_id).cloned()
    }

    async fn zone_by_name(&self, name: &str) -> Result<Zone, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_by_name")?;

        guard
            .zones
            .values()
            .find(|z| z.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("zone named {name}")))
    }

    async fn zone_exists(&self, zone_id: &str) -> Result<bool, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_exists")?;
        Ok(guard.zones.contains_key(zone_id))
    }

    async fn zone_update(&self, zone_id: &str, zone: &Zone) -> Result<ZoneChange, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_update")?;

        let existing = guard.zone(zone_id)?.clone();
        let updated = Zone {
            id: existing.id,
            status: existing.status,
            created: existing.created,
            ..zone.clone()
        };
        guard.zones.insert(zone_id.to_string(), updated.clone());

        let change_id = guard.queue(zone_id, None, "Update", status::SYNCED);
        Ok(guard.zone_change(&change_id, updated, "Update"))
    }

    async fn zone_delete(&self, zone_id: &str) -> Result<ZoneChange, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_delete")?;

        let removed = guard
            .zones
            .remove(zone_id)
            .ok_or_else(|| Error::not_found(format!("zone {zone_id}")))?;
        guard.record_sets.remove(zone_id);

        let change_id = guard.queue(zone_id, None, "Delete", status::SYNCED);
        Ok(guard.zone_change(&change_id, removed, "Delete"))
    }

    async fn zone_change(&self, zone_id: &str, change_id: &str) -> Result<ZoneChange, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("zone_change")?;

        let zone = guard.zones.get(zone_id).cloned().unwrap_or_else(|| Zone {
            id: zone_id.to_string(),
            ..Zone::default()
        });

        let change = guard
            .changes
            .get_mut(change_id)
            .filter(|c| c.zone_id == zone_id && c.record_set_id.is_none())
            .ok_or_else(|| Error::not_found(format!("zone change {change_id}")))?;
        let change_type = change.change_type;
        let observed = change
            .observe()
            .ok_or_else(|| Error::not_found(format!("zone change {change_id}")))?;
        if change.is_resolved() {
            guard.changes.remove(change_id);
        }

        let mut zone_change = guard.zone_change(change_id, zone, change_type);
        zone_change.status = observed;
        Ok(zone_change)
    }

    async fn record_set_create(
        &self,
        record_set: &RecordSet,
    ) -> Result<RecordSetUpdateResponse, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("record_set_create")?;

        let zone_name = guard.zone(&record_set.zone_id)?.name.clone();

        let mut created = record_set.clone();
        created.id = guard.mint("rs");
        created.status = Some("Active".to_string());
        created.created = Some(Utc::now());
        created.zone_name = Some(zone_name);
        guard
            .record_sets
            .entry(created.zone_id.clone())
            .or_default()
            .insert(created.id.clone(), created.clone());

        let change_id = guard.queue(
            &created.zone_id,
            Some(&created.id),
            "Create",
            status::COMPLETE,
        );
        Ok(guard.record_set_response(change_id, created))
    }

    async fn record_set(&self, zone_id: &str, record_set_id: &str) -> Result<RecordSet, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("record_set")?;
        guard.record_set(zone_id, record_set_id).cloned()
    }

    async fn record_set_update(
        &self,
        record_set: &RecordSet,
    ) -> Result<RecordSetUpdateResponse, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("record_set_update")?;

        let existing = guard.record_set(&record_set.zone_id, &record_set.id)?.clone();
        let updated = RecordSet {
            id: existing.id,
            status: existing.status,
            created: existing.created,
            zone_name: existing.zone_name,
            ..record_set.clone()
        };
        guard
            .record_sets
            .entry(updated.zone_id.clone())
            .or_default()
            .insert(updated.id.clone(), updated.clone());

        let change_id = guard.queue(
            &updated.zone_id,
            Some(&updated.id),
            "Update",
            status::COMPLETE,
        );
        Ok(guard.record_set_response(change_id, updated))
    }

    async fn record_set_delete(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<RecordSetUpdateResponse, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("record_set_delete")?;

        let removed = guard
            .record_sets
            .get_mut(zone_id)
            .and_then(|sets| sets.remove(record_set_id))
            .ok_or_else(|| {
                Error::not_found(format!("record set {record_set_id} in zone {zone_id}"))
            })?;

        let change_id = guard.queue(zone_id, Some(record_set_id), "Delete", status::COMPLETE);
        Ok(guard.record_set_response(change_id, removed))
    }

    async fn record_set_change(
        &self,
        zone_id: &str,
        record_set_id: &str,
        change_id: &str,
    ) -> Result<RecordSetChange, Error> {
        let mut guard = self.inner.write().await;
        guard.enter("record_set_change")?;

        let change = guard
            .changes
            .get_mut(change_id)
            .filter(|c| c.zone_id == zone_id && c.record_set_id.as_deref() == Some(record_set_id))
            .ok_or_else(|| Error::not_found(format!("record set change {change_id}")))?;
        let change_type = change.change_type;
        let observed = change
            .observe()
            .ok_or_else(|| Error::not_found(format!("record set change {change_id}")))?;
        if change.is_resolved() {
            guard.changes.remove(change_id);
        }

        let record_set = guard
            .record_set(zone_id, record_set_id)
            .cloned()
            .unwrap_or_else(|_| RecordSet {
                id: record_set_id.to_string(),
                zone_id: zone_id.to_string(),
                ..RecordSet::default()
            });

        Ok(RecordSetChange {
            id: change_id.to_string(),
            record_set,
            change_type: change_type.to_string(),
            status: observed,
            created: Some(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str) -> Zone {
        Zone {
            name: name.to_string(),
            email: "admin@example.com".to_string(),
            admin_group_id: "g1".to_string(),
            ..Zone::default()
        }
    }

    #[tokio::test]
    async fn test_change_follows_behavior() {
        let api = MemoryVinylDns::with_behavior(ChangeBehavior {
            invisible_lookups: 1,
            pending_lookups: 1,
            outcome: ChangeOutcome::Succeed,
        });

        let change = api.zone_create(&zone("ok.")).await.unwrap();
        let zone_id = change.zone.id.clone();

        assert!(api.zone_change(&zone_id, &change.id).await.unwrap_err().is_not_found());
        assert_eq!(api.zone_change(&zone_id, &change.id).await.unwrap().status, "Pending");
        assert_eq!(api.zone_change(&zone_id, &change.id).await.unwrap().status, "Synced");
        assert_eq!(api.calls("zone_change").await, 3);
    }

    #[tokio::test]
    async fn test_resolved_changes_are_dropped() {
        let api = MemoryVinylDns::with_behavior(ChangeBehavior {
            invisible_lookups: 0,
            pending_lookups: 0,
            outcome: ChangeOutcome::Fail,
        });
        let change = api.zone_create(&zone("failed.")).await.unwrap();
        let zone_id = change.zone.id.clone();

        assert_eq!(api.zone_change(&zone_id, &change.id).await.unwrap().status, "Failed");
        assert!(api.zone_change(&zone_id, &change.id).await.unwrap_err().is_not_found());
        assert!(api.inner.read().await.changes.is_empty());
    }

    #[tokio::test]
    async fn test_stalled_changes_are_kept() {
        let api = MemoryVinylDns::with_behavior(ChangeBehavior {
            invisible_lookups: 0,
            pending_lookups: 0,
            outcome: ChangeOutcome::Stall,
        });
        let change = api.zone_create(&zone("stalled.")).await.unwrap();
        let zone_id = change.zone.id.clone();

        for _ in 0..3 {
            assert_eq!(api.zone_change(&zone_id, &change.id).await.unwrap().status, "Pending");
        }
        assert_eq!(api.inner.read().await.changes.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_zone_name_conflicts() {
        let api = MemoryVinylDns::new();
        api.zone_create(&zone("dup.")).await.unwrap();

        let err = api.zone_create(&zone("dup.")).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: Some(409), .. }));
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let api = MemoryVinylDns::new();
        api.inject_failure("zone", 500).await;

        assert!(matches!(
            api.zone("missing").await.unwrap_err(),
            Error::Remote { status: Some(500), .. }
        ));
        assert!(api.zone("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_zone_delete_removes_record_sets() {
        let api = MemoryVinylDns::new();
        let zone_id = api.zone_create(&zone("gone.")).await.unwrap().zone.id;
        let rs = api
            .record_set_create(&RecordSet {
                zone_id: zone_id.clone(),
                name: "www".to_string(),
                record_type: "A".to_string(),
                ..RecordSet::default()
            })
            .await
            .unwrap()
            .record_set;

        api.zone_delete(&zone_id).await.unwrap();

        assert!(!api.zone_exists(&zone_id).await.unwrap());
        assert!(api.record_set(&zone_id, &rs.id).await.unwrap_err().is_not_found());
    }
}
