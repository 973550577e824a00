//! Inventory resource family: device listing, single-device lookup and
//! device attributes.
//!
//! All filtering is server-side; every set filter becomes exactly one
//! query parameter and the response JSON is returned verbatim.

use serde_json::Value;

use crate::api::{CyleraClient, CyleraError, Query, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Server-side filters for `get_devices`. Unset fields are omitted from
/// the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilters {
    /// Complete AE Title.
    pub aetitle: Option<String>,
    /// Device class (Medical, Infrastructure, etc.). Sent as `class`.
    pub device_class: Option<String>,
    /// Complete hostname.
    pub hostname: Option<String>,
    /// Partial or complete IP address.
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub model: Option<String>,
    pub os: Option<String>,
    /// Complete serial number.
    pub serial_number: Option<String>,
    /// Seconds since last seen. Deprecated by the vendor; prefer
    /// `last_seen_after`.
    pub since_last_seen: Option<i64>,
    /// Device type (EEG, X-Ray, etc.). Sent as `type`.
    pub device_type: Option<String>,
    pub vendor: Option<String>,
    /// Epoch timestamps.
    pub first_seen_before: Option<i64>,
    pub first_seen_after: Option<i64>,
    pub last_seen_before: Option<i64>,
    pub last_seen_after: Option<i64>,
    pub attribute_label: Option<String>,
    pub page: Option<u32>,
    /// Results per page, capped at 100 by the vendor.
    pub page_size: Option<u32>,
}

impl DeviceFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set("page", self.page.unwrap_or(DEFAULT_PAGE));
        query.set("page_size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
        query.set_opt("aetitle", &self.aetitle);
        query.set_opt("class", &self.device_class);
        query.set_opt("hostname", &self.hostname);
        query.set_opt("ip_address", &self.ip_address);
        query.set_opt("mac_address", &self.mac_address);
        query.set_opt("model", &self.model);
        query.set_opt("os", &self.os);
        query.set_opt("serial_number", &self.serial_number);
        query.set_opt("since_last_seen", &self.since_last_seen);
        query.set_opt("type", &self.device_type);
        query.set_opt("vendor", &self.vendor);
        query.set_opt("first_seen_before", &self.first_seen_before);
        query.set_opt("first_seen_after", &self.first_seen_after);
        query.set_opt("last_seen_before", &self.last_seen_before);
        query.set_opt("last_seen_after", &self.last_seen_after);
        query.set_opt("attribute_label", &self.attribute_label);
        query
    }
}

/// List devices with optional server-side filters.
pub async fn get_devices(
    client: &CyleraClient,
    filters: &DeviceFilters,
) -> Result<Value, CyleraError> {
    client.get("inventory/devices", &filters.to_query()).await
}

/// Fetch a single device by MAC address. A miss surfaces the vendor 404
/// as `NotFound`, never as an empty success.
pub async fn get_device(client: &CyleraClient, mac_address: &str) -> Result<Value, CyleraError> {
    client
        .get(&format!("inventory/device/{mac_address}"), &Query::new())
        .await
}

/// Fetch the attributes of a device by MAC address. Unknown MAC is
/// `NotFound`.
pub async fn get_device_attributes(
    client: &CyleraClient,
    mac_address: &str,
) -> Result<Value, CyleraError> {
    client
        .get(
            &format!("inventory/device_attributes/{mac_address}"),
            &Query::new(),
        )
        .await
}
