// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Compute instances and their nested resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimbus_store::{Entity, Slice, Verb};

/// Lifecycle state of a compute instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// Being built; not yet bootable.
    Provisioning,
    /// Boot in progress.
    Booting,
    /// Up and serving.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
    /// Powered off.
    Offline,
    /// Reboot in progress.
    Rebooting,
    /// Being moved between hosts.
    Migrating,
    /// Deletion in progress.
    Deleting,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    /// True while the backend is still working on the instance.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InstanceStatus::Provisioning
                | InstanceStatus::Booting
                | InstanceStatus::ShuttingDown
                | InstanceStatus::Rebooting
                | InstanceStatus::Migrating
                | InstanceStatus::Deleting
        )
    }
}

/// One compute instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Instance ID.
    pub id: u64,
    /// Display name, unique per account.
    pub label: String,
    /// Region slug, e.g. `eu-central`.
    pub region: String,
    /// Plan identifier, e.g. `g6-standard-2`.
    #[serde(rename = "type")]
    pub instance_type: String,
    /// Current status.
    pub status: InstanceStatus,
    /// Assigned IPv4 addresses.
    pub ipv4: Vec<String>,
    /// Arbitrary account tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last modification time.
    pub updated: DateTime<Utc>,
}

/// Sub-slices cached under each instance.
#[derive(Debug, Clone, Default)]
pub struct InstanceChildren {
    /// Block storage devices of the instance.
    pub disks: Slice<Disk>,
    /// Boot configuration profiles.
    pub configs: Slice<ConfigProfile>,
    /// Automatic and snapshot backups.
    pub backups: Slice<Backup>,
}

impl Entity for Instance {
    type Id = u64;
    type Scope = ();
    type Children = InstanceChildren;

    const SINGULAR: &'static str = "instance";
    const PLURAL: &'static str = "instances";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/compute/instances".to_string()
    }
}

/// Body for creating an instance.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInstance {
    /// Display name.
    pub label: String,
    /// Region slug.
    pub region: String,
    /// Plan identifier.
    #[serde(rename = "type")]
    pub instance_type: String,
    /// Image to deploy, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Initial tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body for updating an instance. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Provisioning state of a disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskStatus {
    /// Being allocated.
    Creating,
    /// Usable.
    Ready,
    /// Deletion in progress.
    Deleting,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

/// A block storage device attached to one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disk {
    /// Disk ID, unique within the instance.
    pub id: u64,
    /// Display name.
    pub label: String,
    /// Size in megabytes.
    pub size_mb: u64,
    /// Filesystem, e.g. `ext4`.
    pub filesystem: String,
    /// Current status.
    pub status: DiskStatus,
}

impl Entity for Disk {
    type Id = u64;
    type Scope = u64;
    type Children = ();

    const SINGULAR: &'static str = "disk";
    const PLURAL: &'static str = "disks";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(instance: &u64) -> String {
        format!("/compute/instances/{instance}/disks")
    }
}

/// Body for creating a disk.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDisk {
    pub label: String,
    pub size_mb: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<String>,
}

/// Body for updating a disk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDisk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A boot configuration profile of one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProfile {
    /// Profile ID, unique within the instance.
    pub id: u64,
    /// Display name.
    pub label: String,
    /// Kernel identifier, e.g. `nimbus/grub2`.
    pub kernel: String,
    /// Boot device, e.g. `/dev/sda`.
    pub root_device: String,
}

impl Entity for ConfigProfile {
    type Id = u64;
    type Scope = u64;
    type Children = ();

    const SINGULAR: &'static str = "config";
    const PLURAL: &'static str = "configs";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(instance: &u64) -> String {
        format!("/compute/instances/{instance}/configs")
    }
}

/// Body for creating a configuration profile.
#[derive(Debug, Clone, Serialize)]
pub struct CreateConfigProfile {
    pub label: String,
    pub kernel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_device: Option<String>,
}

/// Body for updating a configuration profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateConfigProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_device: Option<String>,
}

/// How a backup came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupType {
    /// Scheduled automatic backup.
    Auto,
    /// User-requested snapshot.
    Snapshot,
}

/// Progress of a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStatus {
    /// Queued.
    Pending,
    /// In progress.
    Running,
    /// Completed and restorable.
    Successful,
    /// Did not complete.
    Failed,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

/// A backup of one instance. Backups are taken and listed, never edited:
/// the API accepts no PUT or DELETE for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    /// Backup ID, unique within the instance.
    pub id: u64,
    /// Display name; empty for automatic backups.
    #[serde(default)]
    pub label: String,
    /// Automatic or snapshot.
    #[serde(rename = "type")]
    pub backup_type: BackupType,
    /// Current status.
    pub status: BackupStatus,
    /// When the backup was taken.
    pub created: DateTime<Utc>,
}

impl Entity for Backup {
    type Id = u64;
    type Scope = u64;
    type Children = ();

    const SINGULAR: &'static str = "backup";
    const PLURAL: &'static str = "backups";
    const SUPPORTS: &'static [Verb] = &[Verb::One, Verb::Many, Verb::Post];

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(instance: &u64) -> String {
        format!("/compute/instances/{instance}/backups")
    }
}

/// Body for taking a snapshot backup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
