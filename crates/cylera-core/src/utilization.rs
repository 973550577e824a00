//! Utilization resource family: medical procedures.

use serde_json::Value;

use crate::api::{CyleraClient, CyleraError, Query, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Server-side filters for `get_procedures`.
#[derive(Debug, Clone, Default)]
pub struct ProcedureFilters {
    /// Procedure name, partial match.
    pub procedure_name: Option<String>,
    pub accession_number: Option<String>,
    pub device_uuid: Option<String>,
    /// Date cutoff in `YYYY/MM/DD` form, passed through as-is.
    pub completed_after: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ProcedureFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set("page", self.page.unwrap_or(DEFAULT_PAGE));
        query.set("page_size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
        query.set_opt("procedure_name", &self.procedure_name);
        query.set_opt("accession_number", &self.accession_number);
        query.set_opt("device_uuid", &self.device_uuid);
        query.set_opt("completed_after", &self.completed_after);
        query
    }
}

/// List medical procedures with optional server-side filters.
pub async fn get_procedures(
    client: &CyleraClient,
    filters: &ProcedureFilters,
) -> Result<Value, CyleraError> {
    client.get("utilization/procedures", &filters.to_query()).await
}
