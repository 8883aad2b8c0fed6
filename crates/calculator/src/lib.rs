//! # Valuation Calculator
//!
//! The pure formula layer of the deal model: WACC, discounting, multi-year
//! projections, the full DCF, valuation multiples, synergies and EPS
//! accretion/dilution, plus the descriptive statistics used on peer multiples.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** No I/O and no knowledge of which companies are involved.
//!   Callers pass numbers in and get numbers back.
//! - **Stateless Calculation:** `FinancialCalculator` holds no state, so a single
//!   instance can be shared by any number of concurrent requests.
//! - **Explicit Guards:** The multiples substitute the zero sentinel for
//!   non-positive denominators. Every other formula reports an exact-zero
//!   denominator as `CalculatorError::DivisionByZero` and a result outside the
//!   `Decimal` range as `CalculatorError::Overflow` instead of panicking. Negative
//!   denominators pass through unchanged.
//!
//! ## Public API
//!
//! - `FinancialCalculator`: the formulas.
//! - `stats`: min/max/mean/median/percentile over multiple samples.
//! - `report`: the result records (`Projections`, `DcfResult`, `Multiples`, ...).
//! - `CalculatorError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

pub use engine::FinancialCalculator;
pub use error::CalculatorError;
pub use report::{
    AccretionDilution, DcfInputs, DcfResult, Multiples, ProjectionAssumptions, Projections,
    SynergyEstimate,
};
pub use stats::{DistributionSummary, RangeSummary};
