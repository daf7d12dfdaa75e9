// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Managed Kubernetes clusters and their node pools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimbus_store::{Entity, Slice, Verb};

/// Lifecycle state of a cluster control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStatus {
    /// Control plane being built.
    Provisioning,
    /// Control plane reachable.
    Ready,
    /// Reachable but unhealthy.
    Degraded,
    /// Deletion in progress.
    Deleting,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

/// One managed Kubernetes cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubeCluster {
    /// Cluster ID.
    pub id: u64,
    /// Display name.
    pub label: String,
    /// Kubernetes minor version, e.g. `1.31`.
    pub k8s_version: String,
    /// Region slug.
    pub region: String,
    /// Current status.
    pub status: ClusterStatus,
    /// Creation time.
    pub created: DateTime<Utc>,
}

/// Sub-slices cached under each cluster.
#[derive(Debug, Clone, Default)]
pub struct KubeChildren {
    /// Worker node pools.
    pub pools: Slice<NodePool>,
}

impl Entity for KubeCluster {
    type Id = u64;
    type Scope = ();
    type Children = KubeChildren;

    const SINGULAR: &'static str = "cluster";
    const PLURAL: &'static str = "clusters";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/kubernetes/clusters".to_string()
    }
}

/// Body for creating a cluster.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCluster {
    pub label: String,
    pub region: String,
    pub k8s_version: String,
    /// At least one pool is required.
    pub pools: Vec<CreateNodePool>,
}

/// Body for updating a cluster. Raising `k8s_version` starts a rolling
/// upgrade.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCluster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k8s_version: Option<String>,
}

/// A group of identically sized worker nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePool {
    /// Pool ID, unique within the cluster.
    pub id: u64,
    /// Plan identifier of each node.
    #[serde(rename = "type")]
    pub instance_type: String,
    /// Number of nodes.
    pub count: u32,
}

impl Entity for NodePool {
    type Id = u64;
    type Scope = u64;
    type Children = ();

    const SINGULAR: &'static str = "pool";
    const PLURAL: &'static str = "pools";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(cluster: &u64) -> String {
        format!("/kubernetes/clusters/{cluster}/pools")
    }
}

/// Body for creating a node pool.
#[derive(Debug, Clone, Serialize)]
pub struct CreateNodePool {
    #[serde(rename = "type")]
    pub instance_type: String,
    pub count: u32,
}

/// Body for resizing a node pool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNodePool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}
