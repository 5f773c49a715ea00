//! Filter Stage: currency partition, then period window, then custom
//! predicates.
//!
//! The order is load-bearing. Clearing the period filter from the
//! dashboard resets only the period dimension, so the currency partition
//! must already have happened by the time the period filter runs.

use chrono::{DateTime, Utc};

use crate::currency::Currency;
use crate::domain::period::PeriodFilter;
use crate::domain::sale::SaleRecord;

/// Parameters for the composed filter pipeline.
#[derive(Debug, Clone, Copy)]
pub struct FilterParams {
    pub currency: Option<Currency>,
    pub period: PeriodFilter,
    /// Explicit reference instant; never read from ambient clock state.
    pub now: DateTime<Utc>,
}

impl FilterParams {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            currency: None,
            period: PeriodFilter::All,
            now,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_period(mut self, period: PeriodFilter) -> Self {
        self.period = period;
        self
    }

    /// Runs currency then period over `records`.
    pub fn apply(&self, records: &[SaleRecord]) -> Vec<SaleRecord> {
        filter_records(records, self, |_| true)
    }
}

/// Keeps exactly the records whose `saleCurrency` equals `currency`.
///
/// The match is exact; a record without a currency never matches, no
/// default is substituted. Applying the same filter twice is idempotent.
pub fn filter_by_currency(records: &[SaleRecord], currency: Currency) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|record| record.sale_currency == Some(currency))
        .cloned()
        .collect()
}

/// Keeps records created inside the period window ending at `now`.
///
/// [`PeriodFilter::All`] is the identity. Records without a parsable
/// creation instant are excluded from every bounded window but pass
/// through `All` (and currency-only pipelines) untouched.
pub fn filter_by_period(
    records: &[SaleRecord],
    period: PeriodFilter,
    now: DateTime<Utc>,
) -> Vec<SaleRecord> {
    let Some(window_start) = period.window_start(now) else {
        return records.to_vec();
    };
    records
        .iter()
        .filter(|record| match record.created_at {
            Some(created_at) => created_at >= window_start,
            None => {
                tracing::debug!(
                    sale_id = %record.id,
                    "record without creation instant excluded from period window"
                );
                false
            }
        })
        .cloned()
        .collect()
}

/// Applies the full pipeline: currency, then period, then `extra`.
pub fn filter_records<F>(records: &[SaleRecord], params: &FilterParams, extra: F) -> Vec<SaleRecord>
where
    F: Fn(&SaleRecord) -> bool,
{
    let by_currency = match params.currency {
        Some(currency) => filter_by_currency(records, currency),
        None => records.to_vec(),
    };
    let by_period = filter_by_period(&by_currency, params.period, params.now);
    by_period.into_iter().filter(|record| extra(record)).collect()
}
