//! Threat resource family: detected threats.

use serde_json::Value;

use crate::api::{CyleraClient, CyleraError, Query, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Server-side filters for `get_threats`.
#[derive(Debug, Clone, Default)]
pub struct ThreatFilters {
    /// Epoch timestamp; only threats detected after it.
    pub detected_after: Option<i64>,
    pub mac_address: Option<String>,
    /// Threat name, partial match.
    pub name: Option<String>,
    /// Severity: INFO, LOW, MEDIUM, HIGH, CRITICAL.
    pub severity: Option<String>,
    /// Status: OPEN, IN_PROGRESS, RESOLVED, SUPPRESSED.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ThreatFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set("page", self.page.unwrap_or(DEFAULT_PAGE));
        query.set("page_size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
        query.set_opt("detected_after", &self.detected_after);
        query.set_opt("mac_address", &self.mac_address);
        query.set_opt("name", &self.name);
        query.set_opt("severity", &self.severity);
        query.set_opt("status", &self.status);
        query
    }
}

/// List detected threats with optional server-side filters.
pub async fn get_threats(
    client: &CyleraClient,
    filters: &ThreatFilters,
) -> Result<Value, CyleraError> {
    client.get("threat/threats", &filters.to_query()).await
}
