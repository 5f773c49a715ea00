//! Sort Stage: deterministic ordering of sale records by stored or derived
//! keys.

use std::cmp::Ordering;

use crate::domain::sale::SaleRecord;

/// Sortable columns exposed by the dashboard tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    TotalSalePrice,
    TotalCost,
    Profit,
    /// Derived on the fly as `profit / totalSalePrice * 100`.
    ProfitMargin,
    /// Creation instants compared as timestamps; missing dates order first.
    CreatedAt,
    /// Any other column name; resolves the stored numeric fields and falls
    /// back to zero for everything else.
    Field(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Tie handling for exactly-equal keys.
///
/// The historical table comparator had no equality branch, so equal keys
/// fell through its "less" arm; [`TieBreak::Legacy`] reproduces that
/// outcome deterministically for callers that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Equal keys keep their original relative order.
    #[default]
    Stable,
    /// Equal keys emerge in reversed source order.
    Legacy,
}

/// Returns a sorted copy with stable tie handling; the source slice is
/// never mutated.
pub fn sort_by(records: &[SaleRecord], key: SortKey, order: SortOrder) -> Vec<SaleRecord> {
    sort_by_with(records, key, order, TieBreak::default())
}

/// [`sort_by`] with an explicit tie-break choice.
pub fn sort_by_with(
    records: &[SaleRecord],
    key: SortKey,
    order: SortOrder,
    tie_break: TieBreak,
) -> Vec<SaleRecord> {
    let mut sorted: Vec<SaleRecord> = records.to_vec();
    if tie_break == TieBreak::Legacy {
        // Reversing before a stable sort flips the relative order of equal
        // keys without disturbing distinct ones.
        sorted.reverse();
    }
    sorted.sort_by(|a, b| compare(a, b, &key, order));
    sorted
}

fn compare(a: &SaleRecord, b: &SaleRecord, key: &SortKey, order: SortOrder) -> Ordering {
    let ordering = key_value(a, key).total_cmp(&key_value(b, key));
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn key_value(record: &SaleRecord, key: &SortKey) -> f64 {
    match key {
        SortKey::TotalSalePrice => record.revenue(),
        SortKey::TotalCost => record.cost(),
        SortKey::Profit => record.profit_amount(),
        SortKey::ProfitMargin => record.profit_margin(),
        SortKey::CreatedAt => record
            .created_at
            .map(|instant| instant.timestamp_millis() as f64)
            .unwrap_or(f64::MIN),
        SortKey::Field(name) => match name.as_str() {
            "totalSalePrice" => record.revenue(),
            "totalCost" => record.cost(),
            "profit" => record.profit_amount(),
            "profitMargin" => record.profit_margin(),
            _ => 0.0,
        },
    }
}
