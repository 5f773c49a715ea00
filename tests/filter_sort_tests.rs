mod common;

use common::{instant, sale};
use sales_core::currency::Currency;
use sales_core::domain::PeriodFilter;
use sales_core::engine::{
    filter_by_currency, filter_by_period, filter_records, sort_by, sort_by_with, top_and_worst,
    FilterParams, SortKey, SortOrder, TieBreak,
};

#[test]
fn currency_filter_is_idempotent() {
    let records = vec![
        sale(Currency::Usd, instant(2024, 1, 1), 100.0, 60.0, 40.0),
        sale(Currency::Ars, instant(2024, 1, 2), 900.0, 800.0, 100.0),
    ];
    let once = filter_by_currency(&records, Currency::Ars);
    let twice = filter_by_currency(&once, Currency::Ars);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
}

#[test]
fn period_window_boundaries_are_deterministic_under_a_fixed_now() {
    let now = instant(2024, 6, 15);
    let records = vec![
        sale(Currency::Usd, instant(2024, 6, 15), 1.0, 0.0, 1.0),
        sale(Currency::Usd, instant(2024, 5, 15), 2.0, 0.0, 2.0),
        sale(Currency::Usd, instant(2024, 5, 14), 3.0, 0.0, 3.0),
        sale(Currency::Usd, instant(2023, 6, 20), 4.0, 0.0, 4.0),
    ];
    // One calendar month back from June 15 is May 15, inclusive.
    let month = filter_by_period(&records, PeriodFilter::Month, now);
    assert_eq!(month.len(), 2);
    let year = filter_by_period(&records, PeriodFilter::Year, now);
    assert_eq!(year.len(), 4);
    let week = filter_by_period(&records, PeriodFilter::Week, now);
    assert_eq!(week.len(), 1);
}

#[test]
fn unparsable_dates_stay_in_currency_only_aggregates() {
    let mut undated = sale(Currency::Usd, instant(2024, 6, 1), 100.0, 60.0, 40.0);
    undated.created_at = None;
    let records = vec![undated, sale(Currency::Usd, instant(2024, 6, 1), 1.0, 0.0, 1.0)];

    let by_currency = filter_by_currency(&records, Currency::Usd);
    assert_eq!(by_currency.len(), 2);

    let params = FilterParams::new(instant(2024, 6, 15))
        .with_currency(Currency::Usd)
        .with_period(PeriodFilter::Quarter);
    assert_eq!(params.apply(&records).len(), 1);
}

#[test]
fn custom_predicates_run_after_currency_and_period() {
    let now = instant(2024, 6, 15);
    let records = vec![
        sale(Currency::Usd, instant(2024, 6, 10), 1000.0, 400.0, 600.0),
        sale(Currency::Usd, instant(2024, 6, 11), 100.0, 150.0, -50.0),
        sale(Currency::Ars, instant(2024, 6, 12), 5000.0, 1000.0, 4000.0),
    ];
    let params = FilterParams::new(now)
        .with_currency(Currency::Usd)
        .with_period(PeriodFilter::Week);
    let winners = filter_records(&records, &params, |record| record.profit_amount() > 0.0);
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].profit_amount(), 600.0);
}

#[test]
fn sorting_by_created_at_orders_instants() {
    let oldest = sale(Currency::Usd, instant(2023, 1, 1), 1.0, 0.0, 1.0);
    let newest = sale(Currency::Usd, instant(2024, 6, 1), 2.0, 0.0, 2.0);
    let records = vec![oldest.clone(), newest.clone()];
    let sorted = sort_by(&records, SortKey::CreatedAt, SortOrder::Desc);
    assert_eq!(sorted, vec![newest, oldest]);
}

#[test]
fn both_tie_breaks_are_deterministic_and_differ_only_on_equal_keys() {
    let a = sale(Currency::Usd, instant(2024, 1, 1), 100.0, 50.0, 50.0);
    let b = sale(Currency::Usd, instant(2024, 1, 2), 200.0, 150.0, 50.0);
    let records = vec![a.clone(), b.clone()];

    let stable = sort_by_with(&records, SortKey::Profit, SortOrder::Desc, TieBreak::Stable);
    let legacy = sort_by_with(&records, SortKey::Profit, SortOrder::Desc, TieBreak::Legacy);
    assert_eq!(stable, vec![a.clone(), b.clone()]);
    assert_eq!(legacy, vec![b, a]);

    // Re-running either mode reproduces the same order bit for bit.
    assert_eq!(
        sort_by_with(&records, SortKey::Profit, SortOrder::Desc, TieBreak::Legacy),
        legacy
    );
}

#[test]
fn ranking_single_record_returns_it_for_both_ends() {
    let only = sale(Currency::Ars, instant(2024, 3, 3), 800.0, 500.0, 300.0);
    let extremes = top_and_worst(std::slice::from_ref(&only));
    assert_eq!(extremes.top, extremes.worst);
    assert_eq!(extremes.top, Some(only));
}

#[test]
fn ranking_keeps_the_head_of_an_already_sorted_input() {
    let records = vec![
        sale(Currency::Usd, instant(2024, 1, 1), 900.0, 300.0, 600.0),
        sale(Currency::Usd, instant(2024, 1, 2), 500.0, 300.0, 200.0),
        sale(Currency::Usd, instant(2024, 1, 3), 100.0, 300.0, -200.0),
    ];
    let extremes = top_and_worst(&records);
    assert_eq!(extremes.top, Some(records[0].clone()));
    assert_eq!(extremes.worst, Some(records[2].clone()));
}
