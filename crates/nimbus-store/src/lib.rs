// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Nimbus Store - normalized entity cache for the cloud console.
//!
//! This crate holds the state side of the console: per-kind [`Slice`]s of
//! records keyed by id, the closed [`Action`] set that mutates them, pure
//! [`reduce`]/[`reduce_child`] transition functions, and an explicit
//! [`Store`] handle that applies actions atomically and notifies observers.
//!
//! Entity kinds are declared once at compile time by implementing the
//! [`Entity`] trait; everything else (reducers, operations in `nimbus-api`)
//! is generic over it.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_store::{reduce, Action, Entity, Slice, Store, Verb};
//!
//! let store = Store::new(Slice::<Region>::default(), reduce::<Region>);
//!
//! store.dispatch(Action::Upsert {
//!     verb: Verb::One,
//!     record: Region { id: 7, label: "eu-central".into() },
//! });
//!
//! assert!(store.read(|slice| slice.contains(&7)));
//! ```

mod action;
mod entity;
mod reducer;
mod slice;
mod store;

pub use action::{Action, PageOf};
pub use entity::{Entity, Verb};
pub use reducer::{ReduceOutcome, reduce, reduce_child};
pub use slice::{Slice, Tracked};
pub use store::{Reducer, Store, StoreHandle};
