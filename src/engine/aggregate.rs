//! Aggregation Stage: reduction of filtered sale collections into summary
//! totals, distributions, and grouped breakdowns.
//!
//! All functions here expect records that already passed the currency
//! partition; nothing in this module ever sums monetary amounts across
//! currencies. The one cross-currency entry point,
//! [`combine_currency_summaries`], flags mixed totals instead of summing.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::domain::api::CurrencySummary;
use crate::domain::sale::{SaleRecord, SaleStatus};
use crate::engine::normalize::ratio_percent;
use crate::engine::rank::top_and_worst;

/// Headline figures for a filtered, single-currency record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_sales: usize,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub average_profit_margin: f64,
    pub top_performing_sale: Option<SaleRecord>,
    pub worst_performing_sale: Option<SaleRecord>,
}

/// Computes counts, normalized sums, the guarded average margin, and both
/// extremal sales. Empty input yields all-zero stats with no extremes.
pub fn compute_summary(records: &[SaleRecord]) -> SummaryStats {
    let total_revenue: f64 = records.iter().map(SaleRecord::revenue).sum();
    let total_cost: f64 = records.iter().map(SaleRecord::cost).sum();
    let total_profit: f64 = records.iter().map(SaleRecord::profit_amount).sum();
    let extremes = top_and_worst(records);
    SummaryStats {
        total_sales: records.len(),
        total_revenue,
        total_cost,
        total_profit,
        average_profit_margin: ratio_percent(total_profit, total_revenue),
        top_performing_sale: extremes.top,
        worst_performing_sale: extremes.worst,
    }
}

/// One calendar month of aggregated sales for a selected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub total_sales: usize,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
}

impl MonthBucket {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_sales: 0,
            total_revenue: 0.0,
            total_cost: 0.0,
            total_profit: 0.0,
            profit_margin: 0.0,
        }
    }
}

/// Buckets a year of records into twelve calendar months, January first.
///
/// The output always has exactly 12 entries regardless of input order or
/// gaps; months without sales stay zero-filled. Records outside `year` or
/// without a parsable creation instant are ignored.
pub fn compute_monthly_breakdown(records: &[SaleRecord], year: i32) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (1..=12)
        .map(|month| MonthBucket::empty(year, month))
        .collect();
    for record in records {
        let Some(created_at) = record.created_at else {
            continue;
        };
        if created_at.year() != year {
            continue;
        }
        let bucket = &mut buckets[created_at.month0() as usize];
        bucket.total_sales += 1;
        bucket.total_revenue += record.revenue();
        bucket.total_cost += record.cost();
        bucket.total_profit += record.profit_amount();
    }
    for bucket in &mut buckets {
        bucket.profit_margin = ratio_percent(bucket.total_profit, bucket.total_revenue);
    }
    buckets
}

/// Aggregated totals for one distinct service name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBucket {
    pub name: String,
    pub count: usize,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

/// Groups every service line by name, weighting amounts by quantity.
///
/// Lines without a name land under `"Unknown Service"`; a record with no
/// services contributes nothing at all. Output is ordered by profit
/// descending, name ascending on equal profit.
pub fn compute_service_breakdown(records: &[SaleRecord]) -> Vec<ServiceBucket> {
    let mut by_name: BTreeMap<String, ServiceBucket> = BTreeMap::new();
    for record in records {
        for line in &record.services {
            let units = line.units();
            let revenue = line.unit_price() * units;
            let cost = line.unit_cost() * units;
            let bucket = by_name
                .entry(line.label().to_string())
                .or_insert_with_key(|name| ServiceBucket {
                    name: name.clone(),
                    count: 0,
                    total_revenue: 0.0,
                    total_cost: 0.0,
                    total_profit: 0.0,
                });
            bucket.count += 1;
            bucket.total_revenue += revenue;
            bucket.total_cost += cost;
            bucket.total_profit += revenue - cost;
        }
    }
    // BTreeMap iteration is name-ascending; the stable sort keeps that
    // order for equal profits.
    let mut buckets: Vec<ServiceBucket> = by_name.into_values().collect();
    buckets.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
    buckets
}

/// Counts of records by the sign of their normalized profit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitDistribution {
    pub profitable: usize,
    pub breakeven: usize,
    pub loss: usize,
}

/// Partitions records by profit sign. A missing profit normalizes to zero
/// and therefore counts as breakeven.
pub fn compute_profit_distribution(records: &[SaleRecord]) -> ProfitDistribution {
    let mut distribution = ProfitDistribution::default();
    for record in records {
        let profit = record.profit_amount();
        if profit > 0.0 {
            distribution.profitable += 1;
        } else if profit < 0.0 {
            distribution.loss += 1;
        } else {
            distribution.breakeven += 1;
        }
    }
    distribution
}

/// Counts of records by lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub open: usize,
    pub closed: usize,
    pub cancelled: usize,
}

pub fn compute_status_tally(records: &[SaleRecord]) -> StatusTally {
    let mut tally = StatusTally::default();
    for record in records {
        match record.status {
            SaleStatus::Open => tally.open += 1,
            SaleStatus::Closed => tally.closed += 1,
            SaleStatus::Cancelled => tally.cancelled += 1,
        }
    }
    tally
}

/// A monetary figure that may span currencies.
///
/// Totals across more than one currency are never summed; they surface as
/// [`MonetaryTotal::Mixed`] so the presentation layer can warn or suppress
/// the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MonetaryTotal {
    /// No amounts contributed.
    Empty,
    /// Every contributing amount shares one currency.
    Single { currency: Currency, amount: f64 },
    /// Amounts from different currencies; not comparable without an
    /// explicit conversion step, which this engine does not perform.
    Mixed,
}

impl MonetaryTotal {
    pub fn is_comparable(&self) -> bool {
        !matches!(self, MonetaryTotal::Mixed)
    }
}

/// Cross-currency combination of upstream per-currency summaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedTotals {
    /// Counting sales across currencies is meaningful; amounts are not.
    pub total_sales: usize,
    pub revenue: MonetaryTotal,
    pub cost: MonetaryTotal,
    pub profit: MonetaryTotal,
}

/// Combines the API's pre-aggregated per-currency summaries.
///
/// Counts add across currencies; each monetary leg stays a plain sum only
/// while a single currency is present and turns [`MonetaryTotal::Mixed`]
/// the moment a second one appears.
pub fn combine_currency_summaries(summaries: &[CurrencySummary]) -> CombinedTotals {
    CombinedTotals {
        total_sales: summaries.iter().map(|entry| entry.total_sales).sum(),
        revenue: combine_leg(summaries, |entry| entry.total_revenue),
        cost: combine_leg(summaries, |entry| entry.total_cost),
        profit: combine_leg(summaries, |entry| entry.total_profit),
    }
}

fn combine_leg<F>(summaries: &[CurrencySummary], amount: F) -> MonetaryTotal
where
    F: Fn(&CurrencySummary) -> f64,
{
    let mut total = MonetaryTotal::Empty;
    for entry in summaries {
        total = match total {
            MonetaryTotal::Empty => MonetaryTotal::Single {
                currency: entry.currency,
                amount: amount(entry),
            },
            MonetaryTotal::Single { currency, amount: sum } if currency == entry.currency => {
                MonetaryTotal::Single {
                    currency,
                    amount: sum + amount(entry),
                }
            }
            _ => return MonetaryTotal::Mixed,
        };
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
    }

    fn sale(price: f64, cost: f64, profit: f64) -> SaleRecord {
        SaleRecord::new(Currency::Usd, at(2024, 1, 15), price, cost, profit)
    }

    #[test]
    fn empty_summary_is_all_zero_with_no_extremes() {
        let summary = compute_summary(&[]);
        assert_eq!(summary, SummaryStats::default());
        assert_eq!(summary.average_profit_margin, 0.0);
        assert!(summary.top_performing_sale.is_none());
        assert!(summary.worst_performing_sale.is_none());
    }

    #[test]
    fn margin_is_zero_not_nan_when_revenue_is_zero() {
        let mut refund = sale(0.0, 0.0, -120.0);
        refund.total_sale_price = None;
        let summary = compute_summary(std::slice::from_ref(&refund));
        assert_eq!(summary.total_profit, -120.0);
        assert_eq!(summary.average_profit_margin, 0.0);
    }

    #[test]
    fn monthly_breakdown_always_has_twelve_ordered_entries() {
        let records = vec![
            SaleRecord::new(Currency::Usd, at(2024, 11, 2), 10.0, 5.0, 5.0),
            SaleRecord::new(Currency::Usd, at(2024, 3, 9), 10.0, 5.0, 5.0),
        ];
        let buckets = compute_monthly_breakdown(&records, 2024);
        assert_eq!(buckets.len(), 12);
        assert_eq!(
            buckets.iter().map(|bucket| bucket.month).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
        assert_eq!(buckets[2].total_sales, 1);
        assert_eq!(buckets[10].total_sales, 1);
        assert_eq!(buckets[0].total_sales, 0);
    }

    #[test]
    fn monthly_breakdown_ignores_other_years_and_undated_records() {
        let mut undated = sale(10.0, 5.0, 5.0);
        undated.created_at = None;
        let records = vec![
            SaleRecord::new(Currency::Usd, at(2023, 1, 2), 10.0, 5.0, 5.0),
            undated,
        ];
        let buckets = compute_monthly_breakdown(&records, 2024);
        assert!(buckets.iter().all(|bucket| bucket.total_sales == 0));
    }

    #[test]
    fn profit_distribution_counts_missing_profit_as_breakeven() {
        let mut unknown = sale(100.0, 100.0, 0.0);
        unknown.profit = None;
        let records = vec![sale(100.0, 60.0, 40.0), sale(100.0, 130.0, -30.0), unknown];
        let distribution = compute_profit_distribution(&records);
        assert_eq!(
            distribution,
            ProfitDistribution {
                profitable: 1,
                breakeven: 1,
                loss: 1,
            }
        );
    }

    #[test]
    fn status_tally_follows_the_lifecycle_field() {
        let records = vec![
            sale(1.0, 0.0, 1.0),
            sale(1.0, 0.0, 1.0).with_status(SaleStatus::Closed),
            sale(1.0, 0.0, 1.0).with_status(SaleStatus::Cancelled),
            sale(1.0, 0.0, 1.0).with_status(SaleStatus::Closed),
        ];
        let tally = compute_status_tally(&records);
        assert_eq!(
            tally,
            StatusTally {
                open: 1,
                closed: 2,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn combining_a_single_currency_sums_plainly() {
        let summaries = vec![
            CurrencySummary {
                currency: Currency::Usd,
                total_sales: 2,
                total_revenue: 1500.0,
                total_cost: 900.0,
                total_profit: 600.0,
            },
            CurrencySummary {
                currency: Currency::Usd,
                total_sales: 1,
                total_revenue: 500.0,
                total_cost: 300.0,
                total_profit: 200.0,
            },
        ];
        let combined = combine_currency_summaries(&summaries);
        assert_eq!(combined.total_sales, 3);
        assert_eq!(
            combined.revenue,
            MonetaryTotal::Single {
                currency: Currency::Usd,
                amount: 2000.0,
            }
        );
        assert!(combined.profit.is_comparable());
    }

    #[test]
    fn mixing_currencies_flags_every_monetary_leg() {
        let summaries = vec![
            CurrencySummary {
                currency: Currency::Usd,
                total_sales: 2,
                total_revenue: 1500.0,
                total_cost: 900.0,
                total_profit: 600.0,
            },
            CurrencySummary {
                currency: Currency::Ars,
                total_sales: 4,
                total_revenue: 900000.0,
                total_cost: 700000.0,
                total_profit: 200000.0,
            },
        ];
        let combined = combine_currency_summaries(&summaries);
        assert_eq!(combined.total_sales, 6);
        assert_eq!(combined.revenue, MonetaryTotal::Mixed);
        assert_eq!(combined.cost, MonetaryTotal::Mixed);
        assert_eq!(combined.profit, MonetaryTotal::Mixed);
        assert!(!combined.profit.is_comparable());
    }

    #[test]
    fn combining_nothing_is_empty() {
        let combined = combine_currency_summaries(&[]);
        assert_eq!(combined.total_sales, 0);
        assert_eq!(combined.revenue, MonetaryTotal::Empty);
    }
}
