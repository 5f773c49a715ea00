//! Record Normalizer: coercion of raw API numerics into values safe for
//! every downstream computation.

use crate::domain::sale::{SaleRecord, ServiceLine};

/// Bucket name for service lines that arrive without one.
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// Treats a missing or non-finite amount as zero.
pub fn amount_or_zero(value: Option<f64>) -> f64 {
    value.filter(|amount| amount.is_finite()).unwrap_or(0.0)
}

/// Percentage ratio guarded against division by zero.
///
/// Defined as `0` whenever `whole` is not strictly positive; never NaN or
/// infinity, for any `part` including nonzero.
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

impl SaleRecord {
    /// Normalized `totalSalePrice`.
    pub fn revenue(&self) -> f64 {
        amount_or_zero(self.total_sale_price)
    }

    /// Normalized `totalCost`.
    pub fn cost(&self) -> f64 {
        amount_or_zero(self.total_cost)
    }

    /// Normalized stored `profit`. The engine trusts the stored value and
    /// never recomputes revenue minus cost on the record's behalf.
    pub fn profit_amount(&self) -> f64 {
        amount_or_zero(self.profit)
    }

    /// Profit as a percentage of revenue, zero when revenue is zero.
    pub fn profit_margin(&self) -> f64 {
        ratio_percent(self.profit_amount(), self.revenue())
    }
}

impl ServiceLine {
    /// Normalized client price per unit.
    pub fn unit_price(&self) -> f64 {
        amount_or_zero(self.price_client)
    }

    /// Normalized provider cost per unit.
    pub fn unit_cost(&self) -> f64 {
        amount_or_zero(self.cost_provider)
    }

    /// Quantity, defaulting to one unit when missing.
    pub fn units(&self) -> f64 {
        self.quantity.filter(|value| value.is_finite()).unwrap_or(1.0)
    }

    /// Service name for bucketing; blank or missing names collapse into
    /// [`UNKNOWN_SERVICE`].
    pub fn label(&self) -> &str {
        self.service_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_SERVICE)
    }
}
