// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Event-driven invalidation tests.

use chrono::{TimeZone, Utc};

use nimbus_console::{
    Action, CloudEvent, ConsoleAction, Disk, DiskStatus, EventEntity, EventKind, EventStatus,
    Instance, InstanceStatus, ReduceOutcome, Verb, Volume, VolumeStatus, apply_event, new_store,
};

fn instance(id: u64, label: &str) -> Instance {
    Instance {
        id,
        label: label.to_string(),
        region: "eu-central".to_string(),
        instance_type: "g6-standard-2".to_string(),
        status: InstanceStatus::Running,
        ipv4: vec![],
        tags: vec![],
        created: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        updated: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn volume(id: u64, label: &str) -> Volume {
    Volume {
        id,
        label: label.to_string(),
        size_gib: 100,
        region: "eu-central".to_string(),
        status: VolumeStatus::Active,
        attached_to: None,
        created: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn event(action: &str, status: EventStatus, entity: Option<u64>) -> CloudEvent {
    CloudEvent {
        id: 1,
        action: action.to_string(),
        status,
        entity: entity.map(|id| EventEntity {
            id,
            label: "affected".to_string(),
        }),
    }
}

#[test]
fn test_instance_event_evicts_only_that_record() {
    let store = new_store();
    store.dispatch(ConsoleAction::Instances(Action::Upsert {
        verb: Verb::One,
        record: instance(1, "a"),
    }));
    store.dispatch(ConsoleAction::Instances(Action::Upsert {
        verb: Verb::One,
        record: instance(2, "b"),
    }));

    let outcome = apply_event(&store, &event("instance_boot", EventStatus::Finished, Some(1)));

    assert_eq!(outcome, ReduceOutcome::Applied);
    store.read(|state| {
        assert!(!state.instances.contains(&1));
        assert!(state.instances.contains(&2));
        assert!(state.instances.invalid);
    });
}

#[test]
fn test_disk_event_invalidates_parents_disk_slice() {
    let store = new_store();
    store.dispatch(ConsoleAction::Instances(Action::Upsert {
        verb: Verb::One,
        record: instance(7, "web-1"),
    }));
    store.dispatch(ConsoleAction::InstanceDisks {
        instance: 7,
        action: Action::Upsert {
            verb: Verb::One,
            record: Disk {
                id: 900,
                label: "root".to_string(),
                size_mb: 25_600,
                filesystem: "ext4".to_string(),
                status: DiskStatus::Ready,
            },
        },
    });

    apply_event(&store, &event("disk_resize", EventStatus::Finished, Some(7)));

    store.read(|state| {
        let tracked = state.instances.get(&7).unwrap();
        // The instance record survives; its disk cache is cleared and stale.
        assert!(tracked.children.disks.is_empty());
        assert!(tracked.children.disks.invalid);
    });
}

#[test]
fn test_volume_event_without_entity_clears_whole_slice() {
    let store = new_store();
    store.dispatch(ConsoleAction::Volumes(Action::Upsert {
        verb: Verb::One,
        record: volume(10, "data"),
    }));
    store.dispatch(ConsoleAction::Volumes(Action::Upsert {
        verb: Verb::One,
        record: volume(11, "scratch"),
    }));

    apply_event(&store, &event("volume_migrate", EventStatus::Notification, None));

    store.read(|state| {
        assert!(state.volumes.is_empty());
        assert!(state.volumes.invalid);
    });
}

#[test]
fn test_domain_record_event_routes_to_records_not_domain() {
    let store = new_store();
    // No domain cached: a record event for it must be a no-op, not a
    // misclassified domain invalidation.
    let outcome = apply_event(
        &store,
        &event("domain_record_create", EventStatus::Finished, Some(55)),
    );
    assert_eq!(outcome, ReduceOutcome::Noop);
}

#[test]
fn test_started_events_invalidate_too() {
    let store = new_store();
    store.dispatch(ConsoleAction::Instances(Action::Upsert {
        verb: Verb::One,
        record: instance(1, "a"),
    }));

    apply_event(&store, &event("instance_reboot", EventStatus::Started, Some(1)));

    store.read(|state| assert!(!state.instances.contains(&1)));
}

#[test]
fn test_unknown_event_is_ignored() {
    let store = new_store();
    store.dispatch(ConsoleAction::Instances(Action::Upsert {
        verb: Verb::One,
        record: instance(1, "a"),
    }));

    let outcome = apply_event(&store, &event("account_promo", EventStatus::Notification, Some(1)));

    assert_eq!(outcome, ReduceOutcome::Noop);
    store.read(|state| assert!(state.instances.contains(&1)));
}

#[test]
fn test_child_event_without_entity_is_noop() {
    let store = new_store();
    let outcome = apply_event(&store, &event("disk_create", EventStatus::Finished, None));
    assert_eq!(outcome, ReduceOutcome::Noop);
}

#[test]
fn test_classification_families() {
    assert_eq!(EventKind::classify("instance_shutdown"), EventKind::Instance);
    assert_eq!(EventKind::classify("backups_enable"), EventKind::Backup);
    assert_eq!(EventKind::classify("config_update"), EventKind::ConfigProfile);
    assert_eq!(EventKind::classify("cluster_pool_create"), EventKind::NodePool);
    assert_eq!(EventKind::classify("domain_record_delete"), EventKind::DomainRecord);
}

#[test]
fn test_event_wire_shape_deserializes() {
    let event: CloudEvent = serde_json::from_value(serde_json::json!({
        "id": 987,
        "action": "volume_create",
        "status": "finished",
        "entity": {"id": 10, "label": "data"},
    }))
    .unwrap();

    assert_eq!(event.status, EventStatus::Finished);
    assert_eq!(event.entity.unwrap().id, 10);
}
