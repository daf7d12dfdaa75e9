// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Server-emitted events and cache invalidation.
//!
//! An external poller (out of scope here) delivers [`CloudEvent`]s from the
//! account activity feed. [`apply_event`] maps each one to an invalidation
//! dispatch so the affected slice is refetched on its next read. Handlers
//! are reducer dispatches and cannot fail; nothing is caught or swallowed.

use serde::{Deserialize, Serialize};

use nimbus_store::{Action, Entity, ReduceOutcome, StoreHandle};

use crate::state::{ConsoleAction, ConsoleState};

/// Delivery state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Queued on the server.
    Scheduled,
    /// Operation in progress.
    Started,
    /// Operation completed.
    Finished,
    /// Operation failed.
    Failed,
    /// Informational, no operation attached.
    Notification,
}

/// The resource an event refers to. For child resources (disks, configs,
/// backups, records, pools) this is the enclosing parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntity {
    /// Resource id.
    pub id: u64,
    /// Resource label at event time.
    pub label: String,
}

/// One event from the account activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent {
    /// Event ID, monotonically increasing.
    pub id: u64,
    /// Wire action name, e.g. `instance_boot` or `domain_record_create`.
    pub action: String,
    /// Delivery state.
    pub status: EventStatus,
    /// Affected resource, absent for account-level events.
    pub entity: Option<EventEntity>,
}

/// Slice family an event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Instance,
    Disk,
    ConfigProfile,
    Backup,
    Volume,
    Domain,
    DomainRecord,
    Cluster,
    NodePool,
    /// No slice of ours; ignored.
    Unknown,
}

/// Action-name families. Longer families precede their prefixes
/// (`domain_record_` before `domain_`, `cluster_pool_` before `cluster_`)
/// so classification never falls into the shorter family; the ordering is
/// locked in by tests.
const FAMILIES: &[(&str, EventKind)] = &[
    ("domain_record_", EventKind::DomainRecord),
    ("domain_", EventKind::Domain),
    ("cluster_pool_", EventKind::NodePool),
    ("cluster_", EventKind::Cluster),
    ("instance_", EventKind::Instance),
    ("disk_", EventKind::Disk),
    ("config_", EventKind::ConfigProfile),
    ("backups_", EventKind::Backup),
    ("volume_", EventKind::Volume),
];

impl EventKind {
    /// Classify a wire action name into its slice family.
    pub fn classify(action: &str) -> EventKind {
        FAMILIES
            .iter()
            .find(|(family, _)| action.starts_with(family))
            .map(|(_, kind)| *kind)
            .unwrap_or(EventKind::Unknown)
    }
}

fn invalidate<E: Entity<Id = u64>>(id: Option<u64>) -> Action<E> {
    match id {
        Some(id) => Action::Invalidate {
            ids: vec![id],
            partial: true,
        },
        None => Action::Invalidate {
            ids: vec![],
            partial: false,
        },
    }
}

fn invalidate_all<E: Entity>() -> Action<E> {
    Action::Invalidate {
        ids: vec![],
        partial: false,
    }
}

/// Fold one event into the store as cache invalidation.
///
/// Top-level kinds evict the named record (or the whole slice when the
/// event carries no entity). Child kinds evict the parent's child slice
/// wholesale — the event's entity is the parent, and which child changed is
/// not in the event. Every status invalidates; a `started` event just means
/// the cached record is already out of date.
pub fn apply_event(
    store: &StoreHandle<ConsoleState, ConsoleAction>,
    event: &CloudEvent,
) -> ReduceOutcome {
    let entity_id = event.entity.as_ref().map(|e| e.id);

    let action = match EventKind::classify(&event.action) {
        EventKind::Instance => ConsoleAction::Instances(invalidate(entity_id)),
        EventKind::Disk => match entity_id {
            Some(instance) => ConsoleAction::InstanceDisks {
                instance,
                action: invalidate_all(),
            },
            None => return ReduceOutcome::Noop,
        },
        EventKind::ConfigProfile => match entity_id {
            Some(instance) => ConsoleAction::InstanceConfigs {
                instance,
                action: invalidate_all(),
            },
            None => return ReduceOutcome::Noop,
        },
        EventKind::Backup => match entity_id {
            Some(instance) => ConsoleAction::InstanceBackups {
                instance,
                action: invalidate_all(),
            },
            None => return ReduceOutcome::Noop,
        },
        EventKind::Volume => ConsoleAction::Volumes(invalidate(entity_id)),
        EventKind::Domain => ConsoleAction::Domains(invalidate(entity_id)),
        EventKind::DomainRecord => match entity_id {
            Some(domain) => ConsoleAction::DomainRecords {
                domain,
                action: invalidate_all(),
            },
            None => return ReduceOutcome::Noop,
        },
        EventKind::Cluster => ConsoleAction::Clusters(invalidate(entity_id)),
        EventKind::NodePool => match entity_id {
            Some(cluster) => ConsoleAction::ClusterPools {
                cluster,
                action: invalidate_all(),
            },
            None => return ReduceOutcome::Noop,
        },
        EventKind::Unknown => return ReduceOutcome::Noop,
    };

    store.dispatch(action)
}
