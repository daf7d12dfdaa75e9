// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The closed action set applied to entity slices.

use serde::Deserialize;

use crate::entity::{Entity, Verb};

/// One page of a collection as returned by the API.
///
/// Wire shape: `{"data": [...], "page": 1, "pages": 3, "results": 64}`. The
/// pagination query parameter on the request side is `page`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageOf<E> {
    /// Records of this page.
    pub data: Vec<E>,
    /// 1-based index of this page.
    pub page: u32,
    /// Total number of pages.
    pub pages: i64,
    /// Total number of records across all pages.
    pub results: i64,
}

/// State transition for one entity slice.
///
/// Every mutation of a slice flows through exactly one of these variants;
/// there is no other write path.
#[derive(Debug, Clone)]
pub enum Action<E: Entity> {
    /// Insert or replace a single record. `One`, `Put` and `Post` all land
    /// here — the verb records intent, the effect is identical.
    Upsert {
        /// Operation that produced the record.
        verb: Verb,
        /// The server's representation of the record.
        record: E,
    },
    /// Replace the slice's mapping with one page of the collection. Ids not
    /// on the page are dropped; cross-page consistency is the caller's
    /// concern.
    Page(PageOf<E>),
    /// Remove a record. Idempotent: removing an absent id is a no-op.
    Remove {
        /// Id to remove.
        id: E::Id,
    },
    /// Mark the slice stale. With `partial` and a non-empty id list only
    /// those records are evicted; otherwise the whole mapping is cleared.
    Invalidate {
        /// Ids to evict when `partial`.
        ids: Vec<E::Id>,
        /// Evict only `ids` instead of the whole mapping.
        partial: bool,
    },
    /// Raise or lower a record's fetch-until marker.
    Polling {
        /// Record being polled.
        id: E::Id,
        /// New marker value.
        active: bool,
    },
}
