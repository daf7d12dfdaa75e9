// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Block storage volumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimbus_store::{Entity, Verb};

/// Lifecycle state of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    /// Being allocated.
    Creating,
    /// Usable and attachable.
    Active,
    /// Resize in progress.
    Resizing,
    /// Deletion in progress.
    Deleting,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

/// One block storage volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    /// Volume ID.
    pub id: u64,
    /// Display name, unique per region.
    pub label: String,
    /// Capacity in gibibytes.
    pub size_gib: u64,
    /// Region slug.
    pub region: String,
    /// Current status.
    pub status: VolumeStatus,
    /// Instance the volume is attached to, if any.
    pub attached_to: Option<u64>,
    /// Creation time.
    pub created: DateTime<Utc>,
}

impl Entity for Volume {
    type Id = u64;
    type Scope = ();
    type Children = ();

    const SINGULAR: &'static str = "volume";
    const PLURAL: &'static str = "volumes";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/volumes".to_string()
    }
}

/// Body for creating a volume.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVolume {
    pub label: String,
    pub region: String,
    pub size_gib: u64,
}

/// Body for updating a volume. Growing `size_gib` triggers a resize; the
/// API rejects shrinking.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_gib: Option<u64>,
}
