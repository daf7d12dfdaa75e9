// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Nimbus Console - state layer for the cloud console.
//!
//! This crate composes the generic store and API machinery into the
//! console's concrete resource world: compute instances (with disks,
//! configuration profiles and backups nested), block storage volumes, DNS
//! zones (with records nested), and Kubernetes clusters (with node pools
//! nested).
//!
//! A UI consumes three things from here:
//! - [`ConsoleApi`]: one method per resource and verb, each mirroring the
//!   server's response into the shared store;
//! - the store itself ([`ConsoleApi::store`]): normalized slices to select
//!   from, plus change notification via `subscribe()`;
//! - [`apply_event`]: feed it activity-feed events and stale slices are
//!   invalidated for refetch.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use nimbus_console::{ConsoleApi, CreateInstance, InstanceStatus};
//!
//! # async fn example() -> nimbus_console::Result<()> {
//! let api = ConsoleApi::from_env()?;
//!
//! let instance = api
//!     .create_instance(&CreateInstance {
//!         label: "web-1".into(),
//!         region: "eu-central".into(),
//!         instance_type: "g6-standard-2".into(),
//!         image: Some("nimbus/debian12".into()),
//!         tags: vec![],
//!     })
//!     .await?;
//!
//! // Wait for the boot to settle.
//! let instance = api
//!     .watch_instance(
//!         instance.id,
//!         |i| i.status == InstanceStatus::Running,
//!         Duration::from_secs(120),
//!     )
//!     .await?;
//!
//! println!("{} is {:?}", instance.label, instance.status);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod client;
mod events;
mod state;

pub use catalog::*;
pub use client::ConsoleApi;
pub use events::{CloudEvent, EventEntity, EventKind, EventStatus, apply_event};
pub use state::{ConsoleAction, ConsoleState, new_store, reduce};

// Re-exported so consumers need only this crate.
pub use nimbus_api::{ApiConfig, ApiError, ApiFieldError, Result};
pub use nimbus_store::{Action, PageOf, ReduceOutcome, Slice, StoreHandle, Tracked, Verb};
