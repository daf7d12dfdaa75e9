// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! ConsoleApi client for the cloud console backend.

use std::time::Duration;

use tracing::instrument;

use nimbus_api::{Api, ApiConfig, Result};
use nimbus_store::{PageOf, Store, StoreHandle};

use crate::catalog::{
    Backup, ConfigProfile, CreateCluster, CreateConfigProfile, CreateDisk, CreateDomain,
    CreateDomainRecord, CreateInstance, CreateNodePool, CreateSnapshot, CreateVolume, Disk, Domain,
    DomainRecord, Instance, KubeCluster, NodePool, UpdateCluster, UpdateConfigProfile, UpdateDisk,
    UpdateDomain, UpdateDomainRecord, UpdateInstance, UpdateNodePool, UpdateVolume, Volume,
};
use crate::state::{ConsoleAction, ConsoleState, reduce};

/// High-level client for the console backend.
///
/// Wraps the generic operation set with one method per resource and verb,
/// each dispatching into the shared [`ConsoleState`] store. Methods exist
/// only for the verbs a kind supports — backups, for instance, can be taken
/// and listed but never edited.
pub struct ConsoleApi {
    api: Api<ConsoleState, ConsoleAction>,
}

impl ConsoleApi {
    /// Create a client with a fresh, empty store.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::with_store(config, Store::new(ConsoleState::default(), reduce))
    }

    /// Create a client around an existing store, e.g. one shared with an
    /// event poller.
    pub fn with_store(
        config: ApiConfig,
        store: StoreHandle<ConsoleState, ConsoleAction>,
    ) -> Result<Self> {
        Ok(Self {
            api: Api::new(config, store)?,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    /// The store this client dispatches into.
    pub fn store(&self) -> &StoreHandle<ConsoleState, ConsoleAction> {
        self.api.store()
    }

    // =========================================================================
    // Compute instances
    // =========================================================================

    /// Fetch one page of instances.
    #[instrument(skip(self))]
    pub async fn list_instances(&self, page: u32) -> Result<PageOf<Instance>> {
        self.api.fetch_page(&(), page, ConsoleAction::Instances).await
    }

    /// Fetch a single instance.
    #[instrument(skip(self))]
    pub async fn get_instance(&self, id: u64) -> Result<Instance> {
        self.api.fetch_item(&(), &id, ConsoleAction::Instances).await
    }

    /// Re-fetch an instance until `predicate` holds or `timeout` elapses,
    /// e.g. waiting for a boot to reach `Running`. See
    /// [`Api::fetch_until`](nimbus_api::Api::fetch_until) for the timeout
    /// caveat.
    #[instrument(skip(self, predicate))]
    pub async fn watch_instance(
        &self,
        id: u64,
        predicate: impl Fn(&Instance) -> bool,
        timeout: Duration,
    ) -> Result<Instance> {
        self.api
            .fetch_until(&(), &id, predicate, timeout, ConsoleAction::Instances)
            .await
    }

    /// Deploy a new instance.
    #[instrument(skip(self, options))]
    pub async fn create_instance(&self, options: &CreateInstance) -> Result<Instance> {
        self.api.create(&(), options, ConsoleAction::Instances).await
    }

    /// Update an instance.
    #[instrument(skip(self, changes))]
    pub async fn update_instance(&self, id: u64, changes: &UpdateInstance) -> Result<Instance> {
        self.api.update(&(), &id, changes, ConsoleAction::Instances).await
    }

    /// Delete an instance.
    #[instrument(skip(self))]
    pub async fn delete_instance(&self, id: u64) -> Result<()> {
        self.api.delete(&(), &id, ConsoleAction::Instances).await
    }

    // =========================================================================
    // Instance disks
    // =========================================================================

    /// Fetch one page of an instance's disks.
    #[instrument(skip(self))]
    pub async fn list_disks(&self, instance: u64, page: u32) -> Result<PageOf<Disk>> {
        self.api
            .fetch_page(&instance, page, move |action| ConsoleAction::InstanceDisks {
                instance,
                action,
            })
            .await
    }

    /// Fetch a single disk.
    #[instrument(skip(self))]
    pub async fn get_disk(&self, instance: u64, id: u64) -> Result<Disk> {
        self.api
            .fetch_item(&instance, &id, move |action| ConsoleAction::InstanceDisks {
                instance,
                action,
            })
            .await
    }

    /// Allocate a disk on an instance.
    #[instrument(skip(self, options))]
    pub async fn create_disk(&self, instance: u64, options: &CreateDisk) -> Result<Disk> {
        self.api
            .create(&instance, options, move |action| ConsoleAction::InstanceDisks {
                instance,
                action,
            })
            .await
    }

    /// Update a disk.
    #[instrument(skip(self, changes))]
    pub async fn update_disk(&self, instance: u64, id: u64, changes: &UpdateDisk) -> Result<Disk> {
        self.api
            .update(&instance, &id, changes, move |action| {
                ConsoleAction::InstanceDisks { instance, action }
            })
            .await
    }

    /// Delete a disk.
    #[instrument(skip(self))]
    pub async fn delete_disk(&self, instance: u64, id: u64) -> Result<()> {
        self.api
            .delete(&instance, &id, move |action| ConsoleAction::InstanceDisks {
                instance,
                action,
            })
            .await
    }

    // =========================================================================
    // Instance configuration profiles
    // =========================================================================

    /// Fetch one page of an instance's configuration profiles.
    #[instrument(skip(self))]
    pub async fn list_configs(&self, instance: u64, page: u32) -> Result<PageOf<ConfigProfile>> {
        self.api
            .fetch_page(&instance, page, move |action| {
                ConsoleAction::InstanceConfigs { instance, action }
            })
            .await
    }

    /// Fetch a single configuration profile.
    #[instrument(skip(self))]
    pub async fn get_config(&self, instance: u64, id: u64) -> Result<ConfigProfile> {
        self.api
            .fetch_item(&instance, &id, move |action| {
                ConsoleAction::InstanceConfigs { instance, action }
            })
            .await
    }

    /// Add a configuration profile to an instance.
    #[instrument(skip(self, options))]
    pub async fn create_config(
        &self,
        instance: u64,
        options: &CreateConfigProfile,
    ) -> Result<ConfigProfile> {
        self.api
            .create(&instance, options, move |action| {
                ConsoleAction::InstanceConfigs { instance, action }
            })
            .await
    }

    /// Update a configuration profile.
    #[instrument(skip(self, changes))]
    pub async fn update_config(
        &self,
        instance: u64,
        id: u64,
        changes: &UpdateConfigProfile,
    ) -> Result<ConfigProfile> {
        self.api
            .update(&instance, &id, changes, move |action| {
                ConsoleAction::InstanceConfigs { instance, action }
            })
            .await
    }

    /// Delete a configuration profile.
    #[instrument(skip(self))]
    pub async fn delete_config(&self, instance: u64, id: u64) -> Result<()> {
        self.api
            .delete(&instance, &id, move |action| {
                ConsoleAction::InstanceConfigs { instance, action }
            })
            .await
    }

    // =========================================================================
    // Instance backups
    // =========================================================================

    /// Fetch one page of an instance's backups.
    #[instrument(skip(self))]
    pub async fn list_backups(&self, instance: u64, page: u32) -> Result<PageOf<Backup>> {
        self.api
            .fetch_page(&instance, page, move |action| {
                ConsoleAction::InstanceBackups { instance, action }
            })
            .await
    }

    /// Fetch a single backup.
    #[instrument(skip(self))]
    pub async fn get_backup(&self, instance: u64, id: u64) -> Result<Backup> {
        self.api
            .fetch_item(&instance, &id, move |action| {
                ConsoleAction::InstanceBackups { instance, action }
            })
            .await
    }

    /// Take a snapshot backup of an instance.
    #[instrument(skip(self, options))]
    pub async fn take_snapshot(&self, instance: u64, options: &CreateSnapshot) -> Result<Backup> {
        self.api
            .create(&instance, options, move |action| {
                ConsoleAction::InstanceBackups { instance, action }
            })
            .await
    }

    // =========================================================================
    // Volumes
    // =========================================================================

    /// Fetch one page of volumes.
    #[instrument(skip(self))]
    pub async fn list_volumes(&self, page: u32) -> Result<PageOf<Volume>> {
        self.api.fetch_page(&(), page, ConsoleAction::Volumes).await
    }

    /// Fetch a single volume.
    #[instrument(skip(self))]
    pub async fn get_volume(&self, id: u64) -> Result<Volume> {
        self.api.fetch_item(&(), &id, ConsoleAction::Volumes).await
    }

    /// Re-fetch a volume until `predicate` holds or `timeout` elapses, e.g.
    /// waiting for a resize to settle back to `Active`.
    #[instrument(skip(self, predicate))]
    pub async fn watch_volume(
        &self,
        id: u64,
        predicate: impl Fn(&Volume) -> bool,
        timeout: Duration,
    ) -> Result<Volume> {
        self.api
            .fetch_until(&(), &id, predicate, timeout, ConsoleAction::Volumes)
            .await
    }

    /// Create a volume.
    #[instrument(skip(self, options))]
    pub async fn create_volume(&self, options: &CreateVolume) -> Result<Volume> {
        self.api.create(&(), options, ConsoleAction::Volumes).await
    }

    /// Update a volume.
    #[instrument(skip(self, changes))]
    pub async fn update_volume(&self, id: u64, changes: &UpdateVolume) -> Result<Volume> {
        self.api.update(&(), &id, changes, ConsoleAction::Volumes).await
    }

    /// Delete a volume.
    #[instrument(skip(self))]
    pub async fn delete_volume(&self, id: u64) -> Result<()> {
        self.api.delete(&(), &id, ConsoleAction::Volumes).await
    }

    // =========================================================================
    // Domains
    // =========================================================================

    /// Fetch one page of zones.
    #[instrument(skip(self))]
    pub async fn list_domains(&self, page: u32) -> Result<PageOf<Domain>> {
        self.api.fetch_page(&(), page, ConsoleAction::Domains).await
    }

    /// Fetch a single zone.
    #[instrument(skip(self))]
    pub async fn get_domain(&self, id: u64) -> Result<Domain> {
        self.api.fetch_item(&(), &id, ConsoleAction::Domains).await
    }

    /// Create a zone.
    #[instrument(skip(self, options))]
    pub async fn create_domain(&self, options: &CreateDomain) -> Result<Domain> {
        self.api.create(&(), options, ConsoleAction::Domains).await
    }

    /// Update a zone.
    #[instrument(skip(self, changes))]
    pub async fn update_domain(&self, id: u64, changes: &UpdateDomain) -> Result<Domain> {
        self.api.update(&(), &id, changes, ConsoleAction::Domains).await
    }

    /// Delete a zone and all of its records.
    #[instrument(skip(self))]
    pub async fn delete_domain(&self, id: u64) -> Result<()> {
        self.api.delete(&(), &id, ConsoleAction::Domains).await
    }

    // =========================================================================
    // Domain records
    // =========================================================================

    /// Fetch one page of a zone's records.
    #[instrument(skip(self))]
    pub async fn list_domain_records(&self, domain: u64, page: u32) -> Result<PageOf<DomainRecord>> {
        self.api
            .fetch_page(&domain, page, move |action| ConsoleAction::DomainRecords {
                domain,
                action,
            })
            .await
    }

    /// Fetch a single record.
    #[instrument(skip(self))]
    pub async fn get_domain_record(&self, domain: u64, id: u64) -> Result<DomainRecord> {
        self.api
            .fetch_item(&domain, &id, move |action| ConsoleAction::DomainRecords {
                domain,
                action,
            })
            .await
    }

    /// Add a record to a zone.
    #[instrument(skip(self, options))]
    pub async fn create_domain_record(
        &self,
        domain: u64,
        options: &CreateDomainRecord,
    ) -> Result<DomainRecord> {
        self.api
            .create(&domain, options, move |action| ConsoleAction::DomainRecords {
                domain,
                action,
            })
            .await
    }

    /// Update a record.
    #[instrument(skip(self, changes))]
    pub async fn update_domain_record(
        &self,
        domain: u64,
        id: u64,
        changes: &UpdateDomainRecord,
    ) -> Result<DomainRecord> {
        self.api
            .update(&domain, &id, changes, move |action| {
                ConsoleAction::DomainRecords { domain, action }
            })
            .await
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_domain_record(&self, domain: u64, id: u64) -> Result<()> {
        self.api
            .delete(&domain, &id, move |action| ConsoleAction::DomainRecords {
                domain,
                action,
            })
            .await
    }

    // =========================================================================
    // Kubernetes clusters
    // =========================================================================

    /// Fetch one page of clusters.
    #[instrument(skip(self))]
    pub async fn list_clusters(&self, page: u32) -> Result<PageOf<KubeCluster>> {
        self.api.fetch_page(&(), page, ConsoleAction::Clusters).await
    }

    /// Fetch a single cluster.
    #[instrument(skip(self))]
    pub async fn get_cluster(&self, id: u64) -> Result<KubeCluster> {
        self.api.fetch_item(&(), &id, ConsoleAction::Clusters).await
    }

    /// Re-fetch a cluster until `predicate` holds or `timeout` elapses, e.g.
    /// waiting for provisioning to reach `Ready`.
    #[instrument(skip(self, predicate))]
    pub async fn watch_cluster(
        &self,
        id: u64,
        predicate: impl Fn(&KubeCluster) -> bool,
        timeout: Duration,
    ) -> Result<KubeCluster> {
        self.api
            .fetch_until(&(), &id, predicate, timeout, ConsoleAction::Clusters)
            .await
    }

    /// Create a cluster.
    #[instrument(skip(self, options))]
    pub async fn create_cluster(&self, options: &CreateCluster) -> Result<KubeCluster> {
        self.api.create(&(), options, ConsoleAction::Clusters).await
    }

    /// Update a cluster.
    #[instrument(skip(self, changes))]
    pub async fn update_cluster(&self, id: u64, changes: &UpdateCluster) -> Result<KubeCluster> {
        self.api.update(&(), &id, changes, ConsoleAction::Clusters).await
    }

    /// Delete a cluster.
    #[instrument(skip(self))]
    pub async fn delete_cluster(&self, id: u64) -> Result<()> {
        self.api.delete(&(), &id, ConsoleAction::Clusters).await
    }

    // =========================================================================
    // Node pools
    // =========================================================================

    /// Fetch one page of a cluster's node pools.
    #[instrument(skip(self))]
    pub async fn list_node_pools(&self, cluster: u64, page: u32) -> Result<PageOf<NodePool>> {
        self.api
            .fetch_page(&cluster, page, move |action| ConsoleAction::ClusterPools {
                cluster,
                action,
            })
            .await
    }

    /// Fetch a single node pool.
    #[instrument(skip(self))]
    pub async fn get_node_pool(&self, cluster: u64, id: u64) -> Result<NodePool> {
        self.api
            .fetch_item(&cluster, &id, move |action| ConsoleAction::ClusterPools {
                cluster,
                action,
            })
            .await
    }

    /// Add a node pool to a cluster.
    #[instrument(skip(self, options))]
    pub async fn create_node_pool(&self, cluster: u64, options: &CreateNodePool) -> Result<NodePool> {
        self.api
            .create(&cluster, options, move |action| ConsoleAction::ClusterPools {
                cluster,
                action,
            })
            .await
    }

    /// Resize a node pool.
    #[instrument(skip(self, changes))]
    pub async fn update_node_pool(
        &self,
        cluster: u64,
        id: u64,
        changes: &UpdateNodePool,
    ) -> Result<NodePool> {
        self.api
            .update(&cluster, &id, changes, move |action| {
                ConsoleAction::ClusterPools { cluster, action }
            })
            .await
    }

    /// Delete a node pool and its nodes.
    #[instrument(skip(self))]
    pub async fn delete_node_pool(&self, cluster: u64, id: u64) -> Result<()> {
        self.api
            .delete(&cluster, &id, move |action| ConsoleAction::ClusterPools {
                cluster,
                action,
            })
            .await
    }
}
