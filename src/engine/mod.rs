//! Pure analytics stages over sale records.
//!
//! Data flows normalizer → filter → {sort, aggregate, rank}. Every stage
//! allocates fresh output and never mutates its source; recomputation with
//! the same inputs is bit-identical.

pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod rank;
pub mod sort;

pub use aggregate::{
    combine_currency_summaries, compute_monthly_breakdown, compute_profit_distribution,
    compute_service_breakdown, compute_status_tally, compute_summary, CombinedTotals,
    MonetaryTotal, MonthBucket, ProfitDistribution, ServiceBucket, StatusTally, SummaryStats,
};
pub use filter::{filter_by_currency, filter_by_period, filter_records, FilterParams};
pub use normalize::{amount_or_zero, ratio_percent, UNKNOWN_SERVICE};
pub use rank::{top_and_worst, SaleExtremes};
pub use sort::{sort_by, sort_by_with, SortKey, SortOrder, TieBreak};
