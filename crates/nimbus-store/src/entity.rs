// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Compile-time entity descriptors.

use std::fmt;
use std::hash::Hash;

/// Operations an entity kind allows against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Fetch a single record.
    One,
    /// Fetch a page of the collection.
    Many,
    /// Update a record.
    Put,
    /// Create a record.
    Post,
    /// Delete a record.
    Delete,
}

impl Verb {
    /// Full CRUD.
    pub const ALL: &'static [Verb] = &[Verb::One, Verb::Many, Verb::Put, Verb::Post, Verb::Delete];
    /// Fetch-only kinds.
    pub const READ_ONLY: &'static [Verb] = &[Verb::One, Verb::Many];
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::One => "ONE",
            Verb::Many => "MANY",
            Verb::Put => "PUT",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Static description of one resource kind.
///
/// Implemented once per entity type; reducers and API operations are generic
/// over it. The path functions must be total over [`Entity::SUPPORTS`] — an
/// unsupported verb is rejected by the API layer before any path is built.
pub trait Entity: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// Key of the record in its slice.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Ids of enclosing parent resources: `()` for top-level kinds, the
    /// parent's id type for nested ones.
    type Scope: Clone + fmt::Debug + Send + Sync;

    /// Sub-slices cached under each record; `()` when the kind has none.
    type Children: Default + Clone + fmt::Debug + Send + Sync + 'static;

    /// Name of one record, e.g. `"instance"`.
    const SINGULAR: &'static str;

    /// Name of the collection, e.g. `"instances"`.
    const PLURAL: &'static str;

    /// Verbs the API accepts for this kind.
    const SUPPORTS: &'static [Verb];

    /// The record's key.
    fn id(&self) -> Self::Id;

    /// Request path of the collection.
    fn collection_path(scope: &Self::Scope) -> String;

    /// Request path of a single record.
    fn item_path(scope: &Self::Scope, id: &Self::Id) -> String {
        format!("{}/{}", Self::collection_path(scope), id)
    }

    /// Whether the API accepts `verb` for this kind.
    fn supports(verb: Verb) -> bool {
        Self::SUPPORTS.contains(&verb)
    }
}
