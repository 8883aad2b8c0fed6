//! # Configuration
//!
//! Everything the valuation engine treats as fixed input is loaded here, once, at
//! process start: the reference datasets (both companies, trading comparables,
//! precedent transactions, market assumptions and the deal narrative), the deal
//! assumptions that parameterise the analyses, the server settings, and the
//! tracing subscriber.
//!
//! The loaded values are immutable; callers wrap them in `Arc` and inject them.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod deal;
pub mod error;
pub mod logging;
pub mod reference_data;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use deal::{
    BreakdownShare, DcfSettings, DealAssumptions, DealStructure, RealizationStep,
    SynergySettings, ValuationWeights,
};
pub use reference_data::{DealNarrative, Recommendation, ReferenceData};
pub use settings::ServerSettings;

/// Loads the reference datasets bundled with this crate.
pub fn load_reference_data() -> Result<ReferenceData, ConfigError> {
    let data = ReferenceData::bundled()?;
    data.validate()?;
    Ok(data)
}

/// Loads the reference datasets from `acquirer.toml`, `target.toml`, `market.toml`
/// and `narrative.toml` inside `dir`.
pub fn load_reference_data_from(dir: &Path) -> Result<ReferenceData, ConfigError> {
    let data = ReferenceData::from_dir(dir)?;
    data.validate()?;
    Ok(data)
}

/// Loads the deal assumptions.
///
/// With no path every field takes its default. A path that does not exist is an
/// error; a file that only sets some fields keeps the defaults for the rest.
pub fn load_deal_assumptions(path: Option<&Path>) -> Result<DealAssumptions, ConfigError> {
    let assumptions = match path {
        Some(path) => config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize::<DealAssumptions>()?,
        None => DealAssumptions::default(),
    };
    assumptions.validate()?;
    Ok(assumptions)
}
