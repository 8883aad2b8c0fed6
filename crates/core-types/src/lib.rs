//! # Core Types
//!
//! Layer 0 of the valuation workspace: the immutable value records every other
//! crate speaks in. Historical statements, peer multiples, precedent deals and
//! the shared market assumptions are all plain data here, with no behaviour
//! beyond a few accessors for the latest fiscal year.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::CompanySelector;
pub use error::CoreError;
pub use structs::{
    BalanceSheet, CashFlowStatement, ComparableCompany, CompanyFinancials, IncomeStatement,
    KeyMetrics, MarketAssumptions, PrecedentTransaction,
};
