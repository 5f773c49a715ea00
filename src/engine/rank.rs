//! Ranking Stage: extremal sale identification.

use crate::domain::sale::SaleRecord;
use crate::engine::sort::{sort_by, SortKey, SortOrder};

/// Best and worst performing sales of a filtered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleExtremes {
    pub top: Option<SaleRecord>,
    pub worst: Option<SaleRecord>,
}

/// Ranks a copy of `records` by profit descending and picks both ends.
///
/// A single-record input yields the same record for both ends; this is
/// intended, not a bug. Empty input yields neither.
pub fn top_and_worst(records: &[SaleRecord]) -> SaleExtremes {
    let ranked = sort_by(records, SortKey::Profit, SortOrder::Desc);
    SaleExtremes {
        top: ranked.first().cloned(),
        worst: ranked.last().cloned(),
    }
}
