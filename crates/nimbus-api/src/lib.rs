// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Nimbus API - HTTP transport and generic entity operations.
//!
//! This crate connects the entity store to the console's REST backend. The
//! [`Api`] client is generic over a root state/action pair and offers six
//! operations per declared entity kind: fetch a page, fetch one record,
//! fetch until a predicate holds, create, update, delete. Every successful
//! operation dispatches the server's representation into the store; every
//! failure is returned to the caller untouched — no retries, no backoff.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_api::{Api, ApiConfig};
//! use nimbus_store::{reduce, Action, Slice, Store};
//!
//! # async fn example() -> nimbus_api::Result<()> {
//! let config = ApiConfig::from_env()?;
//! let store = Store::new(Slice::<Volume>::default(), reduce::<Volume>);
//! let api = Api::new(config, store)?;
//!
//! // Fetch the first page; the slice now mirrors it.
//! let page = api.fetch_page(&(), 1, |a: Action<Volume>| a).await?;
//! println!("{} volumes", page.results);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod ops;
mod transport;

pub use config::ApiConfig;
pub use error::{ApiError, ApiFieldError, Result};
pub use ops::Api;
pub use transport::Transport;
