use crate::error::ConfigError;
use config::{Config, File, FileFormat};
use core_types::{
    ComparableCompany, CompanyFinancials, CompanySelector, MarketAssumptions, PrecedentTransaction,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

const ACQUIRER_TOML: &str = include_str!("../data/acquirer.toml");
const TARGET_TOML: &str = include_str!("../data/target.toml");
const MARKET_TOML: &str = include_str!("../data/market.toml");
const NARRATIVE_TOML: &str = include_str!("../data/narrative.toml");

/// Number of annual statements each company must carry.
pub const FISCAL_YEARS: usize = 5;

/// The closing recommendation reported with the deal.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Recommendation {
    /// Action line of the valuation summary.
    pub summary_action: String,
    /// Action line of the executive summary.
    pub action: String,
    pub confidence: String,
    pub rationale: String,
}

/// Descriptive text reported alongside the numbers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DealNarrative {
    pub strategic_fit: Vec<String>,
    pub market_opportunity: Vec<String>,
    pub financial_benefits: Vec<String>,
    pub strategic_rationale: Vec<String>,
    pub key_risks: Vec<String>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Deserialize)]
struct MarketDocument {
    market: MarketAssumptions,
    comparable_companies: Vec<ComparableCompany>,
    precedent_transactions: Vec<PrecedentTransaction>,
}

/// Everything the analyses read and never write.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub acquirer: CompanyFinancials,
    pub target: CompanyFinancials,
    pub comparable_companies: Vec<ComparableCompany>,
    pub precedent_transactions: Vec<PrecedentTransaction>,
    pub market: MarketAssumptions,
    pub narrative: DealNarrative,
}

fn parse_str<T: DeserializeOwned>(name: &str, contents: &str) -> Result<T, ConfigError> {
    tracing::debug!(document = name, "Parsing bundled reference document.");
    let parsed = Config::builder()
        .add_source(File::from_str(contents, FileFormat::Toml))
        .build()?
        .try_deserialize::<T>()?;
    Ok(parsed)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    tracing::debug!(path = %path.display(), "Reading reference document.");
    let parsed = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml))
        .build()?
        .try_deserialize::<T>()?;
    Ok(parsed)
}

impl ReferenceData {
    /// Builds the datasets compiled into this crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        let market: MarketDocument = parse_str("market", MARKET_TOML)?;
        Ok(Self {
            acquirer: parse_str("acquirer", ACQUIRER_TOML)?,
            target: parse_str("target", TARGET_TOML)?,
            comparable_companies: market.comparable_companies,
            precedent_transactions: market.precedent_transactions,
            market: market.market,
            narrative: parse_str("narrative", NARRATIVE_TOML)?,
        })
    }

    /// Builds the datasets from a directory holding the same four documents.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let market: MarketDocument = parse_file(&dir.join("market.toml"))?;
        Ok(Self {
            acquirer: parse_file(&dir.join("acquirer.toml"))?,
            target: parse_file(&dir.join("target.toml"))?,
            comparable_companies: market.comparable_companies,
            precedent_transactions: market.precedent_transactions,
            market: market.market,
            narrative: parse_file(&dir.join("narrative.toml"))?,
        })
    }

    pub fn company(&self, selector: CompanySelector) -> &CompanyFinancials {
        match selector {
            CompanySelector::Target => &self.target,
            CompanySelector::Acquirer => &self.acquirer,
        }
    }

    /// Checks the shape the analyses rely on: five strictly ascending fiscal years
    /// per statement kind and non-empty comparable sets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for company in [&self.acquirer, &self.target] {
            validate_years(company, "income_statements", company.income_statements.iter().map(|s| s.year))?;
            validate_years(company, "balance_sheets", company.balance_sheets.iter().map(|s| s.year))?;
            validate_years(
                company,
                "cash_flow_statements",
                company.cash_flow_statements.iter().map(|s| s.year),
            )?;
        }

        if self.comparable_companies.is_empty() {
            return Err(ConfigError::ValidationError(
                "comparable_companies must not be empty".to_string(),
            ));
        }
        if self.precedent_transactions.is_empty() {
            return Err(ConfigError::ValidationError(
                "precedent_transactions must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_years(
    company: &CompanyFinancials,
    statement: &str,
    years: impl Iterator<Item = i32>,
) -> Result<(), ConfigError> {
    let years: Vec<i32> = years.collect();
    if years.len() != FISCAL_YEARS {
        return Err(ConfigError::ValidationError(format!(
            "{} has {} {statement}, expected {FISCAL_YEARS}",
            company.ticker,
            years.len()
        )));
    }
    if years.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::ValidationError(format!(
            "{} {statement} are not in ascending fiscal-year order: {years:?}",
            company.ticker
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    #[test]
    fn bundled_data_loads_and_validates() {
        let data = ReferenceData::bundled().unwrap();
        data.validate().unwrap();

        assert_eq!(data.acquirer.ticker, "CRM");
        assert_eq!(data.target.ticker, "NOW");
        assert_eq!(data.comparable_companies.len(), 10);
        assert_eq!(data.precedent_transactions.len(), 8);
        assert_eq!(data.market.tax_rate, dec!(0.2));
        assert_eq!(data.narrative.key_risks.len(), 5);
    }

    #[test]
    fn latest_target_figures_match_reference() {
        let data = ReferenceData::bundled().unwrap();
        let latest = data.target.latest_income_statement().unwrap();
        assert_eq!(latest.year, 2024);
        assert_eq!(latest.revenue, dec!(10945));
        assert_eq!(latest.ebitda, dec!(2345));
        assert_eq!(data.target.net_debt().unwrap(), dec!(-3162));
    }

    #[test]
    fn selector_picks_the_company() {
        let data = ReferenceData::bundled().unwrap();
        assert_eq!(data.company(CompanySelector::Target).ticker, "NOW");
        assert_eq!(data.company(CompanySelector::Acquirer).ticker, "CRM");
    }

    #[test]
    fn unordered_years_are_rejected() {
        let mut data = ReferenceData::bundled().unwrap();
        data.target.balance_sheets.swap(0, 1);
        assert!(matches!(data.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_statement_is_rejected() {
        let mut data = ReferenceData::bundled().unwrap();
        data.acquirer.cash_flow_statements.pop();
        assert!(data.validate().is_err());
    }

    #[test]
    fn directory_override_is_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("acquirer.toml"), ACQUIRER_TOML).unwrap();
        fs::write(dir.path().join("target.toml"), TARGET_TOML).unwrap();
        fs::write(dir.path().join("market.toml"), MARKET_TOML).unwrap();
        fs::write(dir.path().join("narrative.toml"), NARRATIVE_TOML).unwrap();

        let data = ReferenceData::from_dir(dir.path()).unwrap();
        assert_eq!(data, ReferenceData::bundled().unwrap());
    }

    #[test]
    fn missing_directory_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::from_dir(&dir.path().join("nowhere")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
