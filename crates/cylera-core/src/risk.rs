//! Risk resource family: vulnerabilities and their mitigations.

use serde_json::Value;

use crate::api::{CyleraClient, CyleraError, Query, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Server-side filters for `get_vulnerabilities`.
#[derive(Debug, Clone, Default)]
pub struct VulnerabilityFilters {
    /// Confidence: LOW, MEDIUM, HIGH.
    pub confidence: Option<String>,
    /// Epoch timestamp; only vulnerabilities detected after it.
    pub detected_after: Option<i64>,
    pub mac_address: Option<String>,
    /// Vulnerability name, partial match.
    pub name: Option<String>,
    /// Severity: INFO, LOW, MEDIUM, HIGH, CRITICAL.
    pub severity: Option<String>,
    /// Status: OPEN, IN_PROGRESS, RESOLVED, SUPPRESSED.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl VulnerabilityFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set("page", self.page.unwrap_or(DEFAULT_PAGE));
        query.set("page_size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
        query.set_opt("confidence", &self.confidence);
        query.set_opt("detected_after", &self.detected_after);
        query.set_opt("mac_address", &self.mac_address);
        query.set_opt("name", &self.name);
        query.set_opt("severity", &self.severity);
        query.set_opt("status", &self.status);
        query
    }
}

/// List vulnerabilities with optional server-side filters.
pub async fn get_vulnerabilities(
    client: &CyleraClient,
    filters: &VulnerabilityFilters,
) -> Result<Value, CyleraError> {
    client.get("risk/vulnerabilities", &filters.to_query()).await
}

/// Fetch mitigations for a vulnerability by name. The name goes in a
/// query parameter rather than the path since vulnerability names can
/// contain spaces and slashes.
pub async fn get_mitigations(
    client: &CyleraClient,
    vulnerability: &str,
) -> Result<Value, CyleraError> {
    let mut query = Query::new();
    query.set("vulnerability", vulnerability);
    client.get("risk/mitigations", &query).await
}
