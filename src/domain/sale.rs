use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::currency::Currency;

/// One sale to a passenger, denominated in a single currency.
///
/// Records arrive shaped by the upstream API, so every numeric field may be
/// missing or malformed; the lenient deserializers below degrade such
/// values to `None` instead of failing the whole payload. The normalized
/// accessors live in [`crate::engine::normalize`] and no downstream stage
/// reads the raw options directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_currency")]
    pub sale_currency: Option<Currency>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_sale_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub profit: Option<f64>,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Passenger>,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
}

impl SaleRecord {
    /// Builds a record with a freshly minted id and the given financials.
    pub fn new(
        currency: Currency,
        created_at: DateTime<Utc>,
        total_sale_price: f64,
        total_cost: f64,
        profit: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Some(created_at),
            sale_currency: Some(currency),
            total_sale_price: Some(total_sale_price),
            total_cost: Some(total_cost),
            profit: Some(profit),
            status: SaleStatus::Open,
            client_id: None,
            client: None,
            services: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: SaleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_services(mut self, services: Vec<ServiceLine>) -> Self {
        self.services = services;
        self
    }
}

/// Lifecycle state of a sale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Open,
    Closed,
    Cancelled,
}

/// Passenger contact details attached to a sale; opaque to the engine
/// beyond display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Passenger {
    /// "Name Surname" with missing parts elided.
    pub fn display_label(&self) -> String {
        let mut label = String::new();
        for part in [self.name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
        {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str(part);
        }
        label
    }
}

/// One service sold inside a sale (flight, hotel night, transfer).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price_client: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cost_provider: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub quantity: Option<f64>,
}

impl ServiceLine {
    pub fn new(name: impl Into<String>, price_client: f64, cost_provider: f64) -> Self {
        Self {
            service_name: Some(name.into()),
            price_client: Some(price_client),
            cost_provider: Some(cost_provider),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.as_f64())
        .filter(|amount| amount.is_finite()))
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(value) = raw else { return Ok(None) };
    Ok(value.as_str().and_then(|text| {
        DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok()
    }))
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<Option<Currency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_str().and_then(|code| code.parse().ok())))
}
