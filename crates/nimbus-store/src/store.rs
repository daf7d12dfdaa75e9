// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The shared state container.
//!
//! A [`Store`] is created explicitly and passed around as a handle; there is
//! no process-global instance. Actions are applied synchronously one at a
//! time, so readers never observe a partially applied action.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;

use crate::reducer::ReduceOutcome;

/// Reducer applied to the root state for every dispatched action.
pub type Reducer<S, A> = fn(&mut S, A) -> ReduceOutcome;

/// Shared handle to a store. Cloning is cheap; dropping the last handle
/// disposes the store.
pub type StoreHandle<S, A> = Arc<Store<S, A>>;

/// Central state container for one root state type `S` and action type `A`.
///
/// All mutation flows through [`Store::dispatch`]; reads go through
/// [`Store::read`]. No ordering is enforced across independent dispatches —
/// when two fetches race, the later-resolving response wins.
pub struct Store<S, A> {
    state: RwLock<S>,
    reducer: Reducer<S, A>,
    version: watch::Sender<u64>,
}

impl<S, A> Store<S, A> {
    /// Create a store owning `initial` state.
    pub fn new(initial: S, reducer: Reducer<S, A>) -> StoreHandle<S, A> {
        let (version, _) = watch::channel(0);
        Arc::new(Self {
            state: RwLock::new(initial),
            reducer,
            version,
        })
    }

    /// Apply one action atomically.
    ///
    /// The reducer runs under the write lock; observers are notified after
    /// the lock is released, and only when the action changed the state.
    pub fn dispatch(&self, action: A) -> ReduceOutcome {
        let outcome = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            (self.reducer)(&mut state, action)
        };
        if outcome.applied() {
            self.version.send_modify(|v| *v += 1);
        }
        outcome
    }

    /// Run a selector against the current state.
    pub fn read<R>(&self, selector: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        selector(&state)
    }

    /// Clone the entire state.
    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.read(S::clone)
    }

    /// Observe state changes. The receiver yields a monotonically increasing
    /// version; re-read the store when it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Number of state-changing dispatches so far.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }
}
