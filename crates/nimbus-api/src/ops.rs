// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Generic CRUD operations over declared entity kinds.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use nimbus_store::{Action, Entity, PageOf, ReduceOutcome, StoreHandle, Verb};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::transport::Transport;

/// Client for the six entity operations, generic over the consumer's root
/// state `S` and action `A`.
///
/// Each call takes a `route` function mapping entity-level actions into `A` —
/// declaring an entity kind plus a route is all it takes to get its full
/// operation set. Successful operations dispatch the server's representation
/// into the store before returning it; the server, not the request body, is
/// the source of truth for the cached record.
///
/// Operations suspend only at the network boundary. Nothing here cancels an
/// in-flight request: dropping a returned future abandons the request, and a
/// response that resolves late is still applied — last write wins.
pub struct Api<S, A> {
    transport: Transport,
    store: StoreHandle<S, A>,
}

impl<S, A> Api<S, A> {
    /// Create a client around an existing store.
    pub fn new(config: ApiConfig, store: StoreHandle<S, A>) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            store,
        })
    }

    /// The store this client dispatches into.
    pub fn store(&self) -> &StoreHandle<S, A> {
        &self.store
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// The client configuration.
    pub fn config(&self) -> &ApiConfig {
        self.transport.config()
    }

    fn ensure<E: Entity>(verb: Verb) -> Result<()> {
        if E::supports(verb) {
            Ok(())
        } else {
            Err(ApiError::Unsupported {
                verb,
                entity: E::PLURAL,
            })
        }
    }

    fn dispatch<E: Entity>(
        &self,
        route: &impl Fn(Action<E>) -> A,
        action: Action<E>,
    ) -> ReduceOutcome {
        self.store.dispatch(route(action))
    }

    /// Fetch one page of the collection and mirror it into the store.
    ///
    /// The page replaces the slice's mapping wholesale; see
    /// [`nimbus_store::Action::Page`].
    pub async fn fetch_page<E>(
        &self,
        scope: &E::Scope,
        page: u32,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<PageOf<E>>
    where
        E: Entity + DeserializeOwned,
    {
        Self::ensure::<E>(Verb::Many)?;
        let path = E::collection_path(scope);
        let fetched: PageOf<E> = self
            .transport
            .get_json(&path, &[("page", page.to_string())])
            .await?;

        debug!(entity = E::PLURAL, page, results = fetched.results, "fetched page");
        self.dispatch(&route, Action::Page(fetched.clone()));
        Ok(fetched)
    }

    /// Fetch a single record and upsert it into the store.
    pub async fn fetch_item<E>(
        &self,
        scope: &E::Scope,
        id: &E::Id,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<E>
    where
        E: Entity + DeserializeOwned,
    {
        Self::ensure::<E>(Verb::One)?;
        let record: E = self
            .transport
            .get_json(&E::item_path(scope, id), &[])
            .await?;

        self.dispatch(
            &route,
            Action::Upsert {
                verb: Verb::One,
                record: record.clone(),
            },
        );
        Ok(record)
    }

    /// Re-fetch `id` until `predicate` holds or `timeout` elapses.
    ///
    /// Probes are strictly sequential: the next request is issued one
    /// `poll_interval` after the previous response, so a single call never
    /// overlaps polls for the same id. The record's `polling` marker is
    /// raised between probes and lowered when the loop ends, including on
    /// error.
    ///
    /// # Caveat
    ///
    /// When the deadline passes first, the last fetched record is returned as
    /// `Ok` — indistinguishable at the call site from predicate success. A
    /// `warn!` trace is the only signal. Callers that must tell the two apart
    /// should re-check the predicate on the returned record.
    pub async fn fetch_until<E>(
        &self,
        scope: &E::Scope,
        id: &E::Id,
        predicate: impl Fn(&E) -> bool,
        timeout: Duration,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<E>
    where
        E: Entity + DeserializeOwned,
    {
        Self::ensure::<E>(Verb::One)?;
        let deadline = Instant::now() + timeout;

        loop {
            let record = match self.fetch_item(scope, id, &route).await {
                Ok(record) => record,
                Err(err) => {
                    self.dispatch(
                        &route,
                        Action::Polling {
                            id: id.clone(),
                            active: false,
                        },
                    );
                    return Err(err);
                }
            };

            if predicate(&record) {
                return Ok(record);
            }

            if Instant::now() >= deadline {
                warn!(
                    entity = E::SINGULAR,
                    id = %id,
                    timeout_ms = timeout.as_millis() as u64,
                    "gave up polling before the predicate held"
                );
                return Ok(record);
            }

            self.dispatch(
                &route,
                Action::Polling {
                    id: id.clone(),
                    active: true,
                },
            );
            sleep(self.config().poll_interval).await;
        }
    }

    /// Create a record and upsert the server's representation.
    pub async fn create<E, B>(
        &self,
        scope: &E::Scope,
        body: &B,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<E>
    where
        E: Entity + DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::ensure::<E>(Verb::Post)?;
        let record: E = self
            .transport
            .send_json(Method::POST, &E::collection_path(scope), Some(body))
            .await?;

        debug!(entity = E::SINGULAR, id = %record.id(), "created");
        self.dispatch(
            &route,
            Action::Upsert {
                verb: Verb::Post,
                record: record.clone(),
            },
        );
        Ok(record)
    }

    /// Update a record and upsert the server's representation.
    pub async fn update<E, B>(
        &self,
        scope: &E::Scope,
        id: &E::Id,
        body: &B,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<E>
    where
        E: Entity + DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::ensure::<E>(Verb::Put)?;
        let record: E = self
            .transport
            .send_json(Method::PUT, &E::item_path(scope, id), Some(body))
            .await?;

        debug!(entity = E::SINGULAR, id = %record.id(), "updated");
        self.dispatch(
            &route,
            Action::Upsert {
                verb: Verb::Put,
                record: record.clone(),
            },
        );
        Ok(record)
    }

    /// Delete a record and evict it from the store.
    ///
    /// Not retried on failure; a failed delete leaves the cached record in
    /// place.
    pub async fn delete<E>(
        &self,
        scope: &E::Scope,
        id: &E::Id,
        route: impl Fn(Action<E>) -> A,
    ) -> Result<()>
    where
        E: Entity,
    {
        Self::ensure::<E>(Verb::Delete)?;
        self.transport.delete(&E::item_path(scope, id)).await?;

        debug!(entity = E::SINGULAR, id = %id, "deleted");
        self.dispatch(&route, Action::Remove { id: id.clone() });
        Ok(())
    }
}
