// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Composed console state and its root reducer.

use nimbus_store::{
    Action, ReduceOutcome, Slice, Store, StoreHandle, reduce as reduce_slice, reduce_child,
};

use crate::catalog::{
    Backup, ConfigProfile, Disk, Domain, DomainChildren, DomainRecord, Instance, InstanceChildren,
    KubeChildren, KubeCluster, NodePool, Volume,
};

/// Root state: one slice per top-level resource kind. Child kinds live
/// inside their parent's entries.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    /// Compute instances, with disks/configs/backups nested.
    pub instances: Slice<Instance>,
    /// Block storage volumes.
    pub volumes: Slice<Volume>,
    /// DNS zones, with records nested.
    pub domains: Slice<Domain>,
    /// Kubernetes clusters, with node pools nested.
    pub clusters: Slice<KubeCluster>,
}

/// Every action the console store understands. Subresource variants carry
/// the parent id they route through.
#[derive(Debug, Clone)]
pub enum ConsoleAction {
    Instances(Action<Instance>),
    InstanceDisks { instance: u64, action: Action<Disk> },
    InstanceConfigs { instance: u64, action: Action<ConfigProfile> },
    InstanceBackups { instance: u64, action: Action<Backup> },
    Volumes(Action<Volume>),
    Domains(Action<Domain>),
    DomainRecords { domain: u64, action: Action<DomainRecord> },
    Clusters(Action<KubeCluster>),
    ClusterPools { cluster: u64, action: Action<NodePool> },
}

/// Root reducer: routes every action to its slice.
///
/// Pure and total. Actions naming a missing parent are no-ops, so a stale
/// dispatch can never corrupt state or crash a consumer.
pub fn reduce(state: &mut ConsoleState, action: ConsoleAction) -> ReduceOutcome {
    match action {
        ConsoleAction::Instances(action) => reduce_slice(&mut state.instances, action),
        ConsoleAction::InstanceDisks { instance, action } => reduce_child(
            &mut state.instances,
            &instance,
            |c: &mut InstanceChildren| &mut c.disks,
            action,
        ),
        ConsoleAction::InstanceConfigs { instance, action } => reduce_child(
            &mut state.instances,
            &instance,
            |c: &mut InstanceChildren| &mut c.configs,
            action,
        ),
        ConsoleAction::InstanceBackups { instance, action } => reduce_child(
            &mut state.instances,
            &instance,
            |c: &mut InstanceChildren| &mut c.backups,
            action,
        ),
        ConsoleAction::Volumes(action) => reduce_slice(&mut state.volumes, action),
        ConsoleAction::Domains(action) => reduce_slice(&mut state.domains, action),
        ConsoleAction::DomainRecords { domain, action } => reduce_child(
            &mut state.domains,
            &domain,
            |c: &mut DomainChildren| &mut c.records,
            action,
        ),
        ConsoleAction::Clusters(action) => reduce_slice(&mut state.clusters, action),
        ConsoleAction::ClusterPools { cluster, action } => reduce_child(
            &mut state.clusters,
            &cluster,
            |c: &mut KubeChildren| &mut c.pools,
            action,
        ),
    }
}

/// Create a console store with empty slices.
pub fn new_store() -> StoreHandle<ConsoleState, ConsoleAction> {
    Store::new(ConsoleState::default(), reduce)
}
