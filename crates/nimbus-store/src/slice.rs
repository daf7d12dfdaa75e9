// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-kind normalized caches.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entity::Entity;

/// One cached record plus its bookkeeping fields.
#[derive(Debug, Clone)]
pub struct Tracked<E: Entity> {
    /// The record itself.
    pub record: E,
    /// Nested sub-slices (disks under an instance, records under a domain).
    pub children: E::Children,
    /// True while a fetch-until loop is actively re-probing this record.
    pub polling: bool,
    /// Last write to this entry. Diagnostics only; nothing reads it.
    pub updated_at: DateTime<Utc>,
}

impl<E: Entity> Tracked<E> {
    /// Wrap a freshly fetched record. `polling` starts lowered.
    pub fn new(record: E) -> Self {
        Self {
            record,
            children: E::Children::default(),
            polling: false,
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Normalized cache of every known record of one entity kind.
///
/// Pagination counters use `-1` as the "not yet fetched" sentinel. Insertion
/// order of the mapping is not meaningful.
#[derive(Debug, Clone)]
pub struct Slice<E: Entity> {
    /// Total pages reported by the last collection fetch, `-1` before one.
    pub total_pages: i64,
    /// Total results reported by the last collection fetch, `-1` before one.
    pub total_results: i64,
    /// Set by an invalidate action; cleared by the next page fetch.
    pub invalid: bool,
    records: HashMap<E::Id, Tracked<E>>,
}

impl<E: Entity> Default for Slice<E> {
    fn default() -> Self {
        Self {
            total_pages: -1,
            total_results: -1,
            invalid: false,
            records: HashMap::new(),
        }
    }
}

impl<E: Entity> Slice<E> {
    /// Empty slice with sentinel counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry for `id`.
    pub fn get(&self, id: &E::Id) -> Option<&Tracked<E>> {
        self.records.get(id)
    }

    /// Cached record for `id`, without bookkeeping.
    pub fn record(&self, id: &E::Id) -> Option<&E> {
        self.records.get(id).map(|t| &t.record)
    }

    /// Whether `id` is cached.
    pub fn contains(&self, id: &E::Id) -> bool {
        self.records.contains_key(id)
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a collection fetch has completed at least once.
    pub fn fetched(&self) -> bool {
        self.total_pages >= 0
    }

    /// Iterate over cached entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&E::Id, &Tracked<E>)> {
        self.records.iter()
    }

    pub(crate) fn records_mut(&mut self) -> &mut HashMap<E::Id, Tracked<E>> {
        &mut self.records
    }
}
