//! Network resource family: subnet listing.

use serde_json::Value;

use crate::api::{CyleraClient, CyleraError, Query, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Server-side filters for `get_subnets`.
#[derive(Debug, Clone, Default)]
pub struct SubnetFilters {
    /// CIDR range, partial match.
    pub cidr_range: Option<String>,
    pub description: Option<String>,
    /// VLAN number.
    pub vlan: Option<u32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SubnetFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set("page", self.page.unwrap_or(DEFAULT_PAGE));
        query.set("page_size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
        query.set_opt("cidr_range", &self.cidr_range);
        query.set_opt("description", &self.description);
        query.set_opt("vlan", &self.vlan);
        query
    }
}

/// List network subnets with optional server-side filters.
pub async fn get_subnets(
    client: &CyleraClient,
    filters: &SubnetFilters,
) -> Result<Value, CyleraError> {
    client.get("network/subnets", &filters.to_query()).await
}
