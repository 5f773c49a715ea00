//! Sale records, period windows, and the upstream payload envelope.

pub mod api;
pub mod period;
pub mod sale;

pub use api::{parse_sales_response, CurrencySummary, Pagination, SalesPayload, SalesResponse};
pub use period::PeriodFilter;
pub use sale::{Passenger, SaleRecord, SaleStatus, ServiceLine};
