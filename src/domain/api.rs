//! Serde mirror of the upstream sales endpoint envelope.
//!
//! The engine treats the payload purely as input data. Pagination metadata
//! is carried through untouched; the optional `summary` array holds the
//! pre-aggregated per-currency totals that
//! [`crate::engine::aggregate::combine_currency_summaries`] consumes.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::domain::sale::SaleRecord;
use crate::errors::{EngineError, Result};

/// Envelope returned by the sales collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SalesPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesPayload {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub summary: Vec<CurrencySummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Pre-aggregated totals for one currency, delivered alongside a sales page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySummary {
    pub currency: Currency,
    #[serde(default)]
    pub total_sales: usize,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_profit: f64,
}

/// Parses a raw response body, surfacing API-level failure as an error.
pub fn parse_sales_response(body: &str) -> Result<SalesPayload> {
    let response: SalesResponse = serde_json::from_str(body)?;
    if !response.success {
        return Err(EngineError::Api(
            response
                .message
                .unwrap_or_else(|| "request rejected".into()),
        ));
    }
    Ok(response.data.unwrap_or_default())
}
