// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! DNS zones and their records.

use serde::{Deserialize, Serialize};

use nimbus_store::{Entity, Slice, Verb};

/// Authority role of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainType {
    /// This account holds the zone data.
    Master,
    /// Zone data is transferred from elsewhere.
    Slave,
}

/// Serving state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Being served.
    Active,
    /// Configured but not served.
    Disabled,
    /// Unrecognized status string.
    #[serde(other)]
    Unknown,
}

/// One DNS zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Zone ID.
    pub id: u64,
    /// Fully qualified zone name.
    pub domain: String,
    /// Master or slave.
    #[serde(rename = "type")]
    pub domain_type: DomainType,
    /// Current status.
    pub status: DomainStatus,
    /// SOA contact; required for master zones.
    pub soa_email: Option<String>,
}

/// Sub-slices cached under each zone.
#[derive(Debug, Clone, Default)]
pub struct DomainChildren {
    /// Resource records of the zone.
    pub records: Slice<DomainRecord>,
}

impl Entity for Domain {
    type Id = u64;
    type Scope = ();
    type Children = DomainChildren;

    const SINGULAR: &'static str = "domain";
    const PLURAL: &'static str = "domains";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/domains".to_string()
    }
}

/// Body for creating a zone.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDomain {
    pub domain: String,
    #[serde(rename = "type")]
    pub domain_type: DomainType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_email: Option<String>,
}

/// Body for updating a zone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DomainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_email: Option<String>,
}

/// DNS record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Srv,
    Ns,
    Caa,
}

/// One resource record inside a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Record ID, unique within the zone.
    pub id: u64,
    /// Record name relative to the zone; empty for the apex.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record data: an address, a hostname, or free text.
    pub target: String,
    /// Time to live in seconds.
    pub ttl_sec: u32,
    /// Priority, for MX and SRV records.
    pub priority: Option<u32>,
}

impl Entity for DomainRecord {
    type Id = u64;
    type Scope = u64;
    type Children = ();

    const SINGULAR: &'static str = "record";
    const PLURAL: &'static str = "records";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(domain: &u64) -> String {
        format!("/domains/{domain}/records")
    }
}

/// Body for creating a record.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDomainRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// Body for updating a record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDomainRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<u32>,
}
