#![doc(test(attr(deny(warnings))))]

//! Sales Core provides the pure financial-analytics primitives behind a
//! travel-agency sales dashboard: filtering, sorting, aggregation, and
//! ranking over collections of sale records.
//!
//! Every stage is a pure function of its inputs. Data-quality problems
//! (missing amounts, unparsable dates, empty collections) never raise;
//! each has a defined zero or `None` result so the dashboard can always
//! render something sensible.

pub mod currency;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sales Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
