use chrono::{DateTime, TimeZone, Utc};
use sales_core::currency::Currency;
use sales_core::domain::{SaleRecord, ServiceLine};

pub fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn sale(
    currency: Currency,
    created_at: DateTime<Utc>,
    price: f64,
    cost: f64,
    profit: f64,
) -> SaleRecord {
    SaleRecord::new(currency, created_at, price, cost, profit)
}

pub fn usd_sale(price: f64, cost: f64, profit: f64) -> SaleRecord {
    sale(Currency::Usd, instant(2024, 1, 15), price, cost, profit)
}

pub fn service(name: &str, price: f64, cost: f64, quantity: f64) -> ServiceLine {
    ServiceLine::new(name, price, cost).with_quantity(quantity)
}
