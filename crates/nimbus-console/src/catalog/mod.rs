// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The console's resource kinds.
//!
//! One module per top-level resource family. Each record type implements
//! [`nimbus_store::Entity`] once; reducers and API operations are derived
//! from that.

mod domain;
mod instance;
mod kubernetes;
mod volume;

pub use domain::{
    CreateDomain, CreateDomainRecord, Domain, DomainChildren, DomainRecord, DomainStatus,
    DomainType, RecordType, UpdateDomain, UpdateDomainRecord,
};
pub use instance::{
    Backup, BackupStatus, BackupType, ConfigProfile, CreateConfigProfile, CreateDisk,
    CreateInstance, CreateSnapshot, Disk, DiskStatus, Instance, InstanceChildren, InstanceStatus,
    UpdateConfigProfile, UpdateDisk, UpdateInstance,
};
pub use kubernetes::{
    ClusterStatus, CreateCluster, CreateNodePool, KubeChildren, KubeCluster, NodePool,
    UpdateCluster, UpdateNodePool,
};
pub use volume::{CreateVolume, UpdateVolume, Volume, VolumeStatus};
