// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Pure state transitions for entity slices.
//!
//! Reducers never fail and never panic: an action referencing a missing
//! record or parent returns [`ReduceOutcome::Noop`] and leaves the state
//! untouched. Callers that do not care can ignore the outcome.

use std::collections::hash_map::Entry;

use crate::action::Action;
use crate::entity::Entity;
use crate::slice::{Slice, Tracked};

/// Whether a dispatched action changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOutcome {
    /// The action was folded into the state.
    Applied,
    /// The action referenced a missing record and was dropped.
    Noop,
}

impl ReduceOutcome {
    /// True when the state changed.
    pub fn applied(self) -> bool {
        matches!(self, ReduceOutcome::Applied)
    }
}

/// Fold one action into a slice.
pub fn reduce<E: Entity>(slice: &mut Slice<E>, action: Action<E>) -> ReduceOutcome {
    match action {
        Action::Upsert { verb: _, record } => {
            match slice.records_mut().entry(record.id()) {
                Entry::Occupied(mut entry) => {
                    let tracked = entry.get_mut();
                    tracked.record = record;
                    tracked.polling = false;
                    tracked.touch();
                }
                Entry::Vacant(entry) => {
                    entry.insert(Tracked::new(record));
                }
            }
            ReduceOutcome::Applied
        }
        Action::Page(page) => {
            // The page is authoritative for the whole mapping: ids it does
            // not carry are dropped. Children of surviving ids are kept.
            let mut old = std::mem::take(slice.records_mut());
            for record in page.data {
                let id = record.id();
                let tracked = match old.remove(&id) {
                    Some(mut existing) => {
                        existing.record = record;
                        existing.polling = false;
                        existing.touch();
                        existing
                    }
                    None => Tracked::new(record),
                };
                slice.records_mut().insert(id, tracked);
            }
            slice.total_pages = page.pages;
            slice.total_results = page.results;
            slice.invalid = false;
            ReduceOutcome::Applied
        }
        Action::Remove { id } => {
            if slice.records_mut().remove(&id).is_some() {
                ReduceOutcome::Applied
            } else {
                ReduceOutcome::Noop
            }
        }
        Action::Invalidate { ids, partial } => {
            slice.invalid = true;
            if partial && !ids.is_empty() {
                for id in &ids {
                    slice.records_mut().remove(id);
                }
            } else {
                slice.records_mut().clear();
            }
            ReduceOutcome::Applied
        }
        Action::Polling { id, active } => match slice.records_mut().get_mut(&id) {
            Some(tracked) => {
                tracked.polling = active;
                ReduceOutcome::Applied
            }
            None => ReduceOutcome::Noop,
        },
    }
}

/// Route a child action to the sub-slice nested under `parent`.
///
/// A missing parent is a no-op. When the parent exists its `updated_at` is
/// touched; the returned outcome is the child reducer's.
pub fn reduce_child<P: Entity, C: Entity>(
    slice: &mut Slice<P>,
    parent: &P::Id,
    select: fn(&mut P::Children) -> &mut Slice<C>,
    action: Action<C>,
) -> ReduceOutcome {
    match slice.records_mut().get_mut(parent) {
        Some(tracked) => {
            let outcome = reduce(select(&mut tracked.children), action);
            tracked.touch();
            outcome
        }
        None => ReduceOutcome::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::PageOf;
    use crate::entity::Verb;

    #[derive(Debug, Clone, PartialEq)]
    struct Server {
        id: u64,
        label: String,
    }

    #[derive(Debug, Clone, Default)]
    struct ServerChildren {
        disks: Slice<Disk>,
    }

    impl Entity for Server {
        type Id = u64;
        type Scope = ();
        type Children = ServerChildren;

        const SINGULAR: &'static str = "server";
        const PLURAL: &'static str = "servers";
        const SUPPORTS: &'static [Verb] = Verb::ALL;

        fn id(&self) -> u64 {
            self.id
        }

        fn collection_path(_scope: &()) -> String {
            "/servers".to_string()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Disk {
        id: u64,
        label: String,
    }

    impl Entity for Disk {
        type Id = u64;
        type Scope = u64;
        type Children = ();

        const SINGULAR: &'static str = "disk";
        const PLURAL: &'static str = "disks";
        const SUPPORTS: &'static [Verb] = Verb::ALL;

        fn id(&self) -> u64 {
            self.id
        }

        fn collection_path(server: &u64) -> String {
            format!("/servers/{server}/disks")
        }
    }

    fn server(id: u64, label: &str) -> Server {
        Server {
            id,
            label: label.to_string(),
        }
    }

    fn upsert(record: Server) -> Action<Server> {
        Action::Upsert {
            verb: Verb::One,
            record,
        }
    }

    fn page(data: Vec<Server>, pages: i64, results: i64) -> Action<Server> {
        Action::Page(PageOf {
            data,
            page: 1,
            pages,
            results,
        })
    }

    #[test]
    fn test_default_slice_has_sentinel_counters() {
        let slice = Slice::<Server>::default();
        assert_eq!(slice.total_pages, -1);
        assert_eq!(slice.total_results, -1);
        assert!(!slice.invalid);
        assert!(slice.is_empty());
        assert!(!slice.fetched());
    }

    #[test]
    fn test_upsert_inserts_with_polling_lowered() {
        let mut slice = Slice::default();
        let outcome = reduce(&mut slice, upsert(server(1234, "web-1")));
        assert!(outcome.applied());

        let tracked = slice.get(&1234).unwrap();
        assert!(!tracked.polling);
        assert_eq!(tracked.record.label, "web-1");
    }

    #[test]
    fn test_upsert_leaves_unrelated_records_untouched() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "a")));
        reduce(&mut slice, upsert(server(1234, "b")));

        assert_eq!(slice.record(&1).unwrap().label, "a");
        assert_eq!(slice.record(&1234).unwrap().label, "b");
        assert_eq!(slice.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_record_and_keeps_children() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "old")));
        reduce_child(
            &mut slice,
            &1,
            |c: &mut ServerChildren| &mut c.disks,
            Action::Upsert {
                verb: Verb::One,
                record: Disk {
                    id: 9,
                    label: "root".to_string(),
                },
            },
        );

        reduce(&mut slice, upsert(server(1, "new")));

        let tracked = slice.get(&1).unwrap();
        assert_eq!(tracked.record.label, "new");
        assert!(tracked.children.disks.contains(&9));
    }

    #[test]
    fn test_upsert_resets_polling() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "a")));
        reduce(
            &mut slice,
            Action::Polling {
                id: 1,
                active: true,
            },
        );
        assert!(slice.get(&1).unwrap().polling);

        reduce(&mut slice, upsert(server(1, "a")));
        assert!(!slice.get(&1).unwrap().polling);
    }

    #[test]
    fn test_page_replaces_mapping_wholesale() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "stale")));
        reduce(&mut slice, upsert(server(2, "survivor")));

        reduce(
            &mut slice,
            page(vec![server(2, "survivor-v2"), server(3, "fresh")], 1, 2),
        );

        assert!(!slice.contains(&1));
        assert_eq!(slice.record(&2).unwrap().label, "survivor-v2");
        assert!(slice.contains(&3));
        assert_eq!(slice.total_pages, 1);
        assert_eq!(slice.total_results, 2);
        assert!(slice.fetched());
    }

    #[test]
    fn test_page_clears_invalid_flag() {
        let mut slice = Slice::default();
        reduce(
            &mut slice,
            Action::<Server>::Invalidate {
                ids: vec![],
                partial: false,
            },
        );
        assert!(slice.invalid);

        reduce(&mut slice, page(vec![server(1, "a")], 1, 1));
        assert!(!slice.invalid);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "a")));

        assert_eq!(
            reduce(&mut slice, Action::Remove { id: 1 }),
            ReduceOutcome::Applied
        );
        assert_eq!(
            reduce(&mut slice, Action::Remove { id: 1 }),
            ReduceOutcome::Noop
        );
        assert!(slice.is_empty());
    }

    #[test]
    fn test_partial_invalidate_evicts_only_listed_ids() {
        let mut slice = Slice::default();
        reduce(&mut slice, page(vec![server(1, "a"), server(2, "b")], 1, 2));

        reduce(
            &mut slice,
            Action::Invalidate {
                ids: vec![1],
                partial: true,
            },
        );

        assert!(!slice.contains(&1));
        assert!(slice.contains(&2));
        assert_eq!(slice.total_pages, 1);
        assert_eq!(slice.total_results, 2);
        assert!(slice.invalid);
    }

    #[test]
    fn test_full_invalidate_clears_mapping() {
        let mut slice = Slice::default();
        reduce(&mut slice, page(vec![server(1, "a"), server(2, "b")], 1, 2));

        reduce(
            &mut slice,
            Action::<Server>::Invalidate {
                ids: vec![],
                partial: false,
            },
        );

        assert!(slice.is_empty());
        assert!(slice.invalid);
    }

    #[test]
    fn test_polling_on_missing_id_is_noop() {
        let mut slice = Slice::<Server>::default();
        let outcome = reduce(
            &mut slice,
            Action::Polling {
                id: 404,
                active: true,
            },
        );
        assert_eq!(outcome, ReduceOutcome::Noop);
    }

    #[test]
    fn test_child_routing_updates_nested_slice_and_touches_parent() {
        let mut slice = Slice::default();
        reduce(&mut slice, upsert(server(1, "a")));
        let before = slice.get(&1).unwrap().updated_at;

        let outcome = reduce_child(
            &mut slice,
            &1,
            |c: &mut ServerChildren| &mut c.disks,
            Action::Upsert {
                verb: Verb::One,
                record: Disk {
                    id: 55,
                    label: "swap".to_string(),
                },
            },
        );

        assert!(outcome.applied());
        let tracked = slice.get(&1).unwrap();
        assert_eq!(tracked.children.disks.record(&55).unwrap().label, "swap");
        assert!(tracked.updated_at >= before);
    }

    #[test]
    fn test_child_routing_missing_parent_is_noop() {
        let mut slice = Slice::<Server>::default();
        let outcome = reduce_child(
            &mut slice,
            &404,
            |c: &mut ServerChildren| &mut c.disks,
            Action::<Disk>::Invalidate {
                ids: vec![],
                partial: false,
            },
        );
        assert_eq!(outcome, ReduceOutcome::Noop);
    }
}
