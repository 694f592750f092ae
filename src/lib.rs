#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense events in a JSON ledger and derives the
//! net balance and per-category expense totals behind a small interactive menu.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}
