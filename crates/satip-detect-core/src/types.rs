//! Shared types for discovered SAT>IP servers.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Serialize;

/// Frontend counts keyed by delivery system code (e.g. `DVBS2`).
pub type Frontends = BTreeMap<String, u32>;

/// One SAT>IP server resolved from its description document.
///
/// Serializes as `{"frontends": {...}, "name": "..."}`. The location it was
/// resolved from and the answering server address are kept for display but
/// are not part of the JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub frontends: Frontends,
    pub name: String,
    #[serde(skip)]
    pub location: String,
    #[serde(skip)]
    pub address: Option<IpAddr>,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, frontends: Frontends) -> Self {
        Self {
            frontends,
            name: name.into(),
            location: String::new(),
            address: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_address(mut self, address: Option<IpAddr>) -> Self {
        self.address = address;
        self
    }

    /// Total number of frontends across all delivery systems.
    pub fn total_frontends(&self) -> u32 {
        self.frontends
            .values()
            .fold(0u32, |acc, count| acc.saturating_add(*count))
    }
}

/// Devices in discovery order, one per unique resolved location.
pub type DeviceInventory = Vec<DeviceRecord>;
