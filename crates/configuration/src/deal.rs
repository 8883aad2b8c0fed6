use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The assumptions that parameterise every analysis of the deal.
///
/// Each section falls back to its `Default` when absent from `deal.toml`, so a
/// file only has to name the values it changes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DealAssumptions {
    pub dcf: DcfSettings,
    pub synergies: SynergySettings,
    pub structure: DealStructure,
    pub valuation: ValuationWeights,
}

/// Operating assumptions for the five-year free cash flow projection.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DcfSettings {
    /// Year-over-year revenue growth, one entry per projected year.
    pub growth_rates: Vec<Decimal>,
    pub ebitda_margin: Decimal,
    pub da_percent_revenue: Decimal,
    pub capex_percent_revenue: Decimal,
    pub nwc_percent_revenue: Decimal,
    /// Pre-tax cost of debt fed into the WACC.
    pub cost_of_debt: Decimal,
}

impl Default for DcfSettings {
    fn default() -> Self {
        Self {
            growth_rates: vec![dec!(0.18), dec!(0.16), dec!(0.14), dec!(0.12), dec!(0.10)],
            ebitda_margin: dec!(0.215),
            da_percent_revenue: dec!(0.06),
            capex_percent_revenue: dec!(0.045),
            nwc_percent_revenue: dec!(0.12),
            cost_of_debt: dec!(0.05),
        }
    }
}

/// A labelled share of a synergy pool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BreakdownShare {
    pub label: String,
    pub share: Decimal,
}

impl BreakdownShare {
    fn new(label: &str, share: Decimal) -> Self {
        Self { label: label.to_string(), share }
    }
}

/// Cumulative fraction of run-rate synergies realized by a point in time.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RealizationStep {
    pub label: String,
    pub cumulative_share: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SynergySettings {
    pub cross_sell_rate: Decimal,
    pub cost_synergy_percent: Decimal,
    /// Integration costs, in millions.
    pub one_time_costs: Decimal,
    pub revenue_breakdown: Vec<BreakdownShare>,
    pub cost_breakdown: Vec<BreakdownShare>,
    pub realization: Vec<RealizationStep>,
}

impl Default for SynergySettings {
    fn default() -> Self {
        Self {
            cross_sell_rate: dec!(0.15),
            cost_synergy_percent: dec!(0.18),
            one_time_costs: dec!(2500),
            revenue_breakdown: vec![
                BreakdownShare::new("Cross-selling to Salesforce customers", dec!(0.6)),
                BreakdownShare::new("Upsell of ServiceNow to CRM users", dec!(0.4)),
            ],
            cost_breakdown: vec![
                BreakdownShare::new("Elimination of duplicate functions", dec!(0.35)),
                BreakdownShare::new("Technology platform consolidation", dec!(0.25)),
                BreakdownShare::new("Real estate and facility optimization", dec!(0.20)),
                BreakdownShare::new("Vendor and procurement savings", dec!(0.20)),
            ],
            realization: vec![
                RealizationStep { label: "Year 1".to_string(), cumulative_share: dec!(0.25) },
                RealizationStep { label: "Year 2".to_string(), cumulative_share: dec!(0.65) },
                RealizationStep { label: "Year 3+".to_string(), cumulative_share: dec!(1.0) },
            ],
        }
    }
}

/// How the proposed consideration is paid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DealStructure {
    /// Proposed deal value, in millions.
    pub total_consideration: Decimal,
    pub cash_percent: Decimal,
    pub stock_percent: Decimal,
}

impl Default for DealStructure {
    fn default() -> Self {
        Self {
            total_consideration: dec!(165000),
            cash_percent: dec!(0.90),
            stock_percent: dec!(0.10),
        }
    }
}

impl DealStructure {
    pub fn cash_component(&self) -> Decimal {
        self.total_consideration * self.cash_percent
    }

    pub fn stock_component(&self) -> Decimal {
        self.total_consideration * self.stock_percent
    }

    /// Human-readable mix, e.g. "90% Cash / 10% Stock".
    pub fn describe(&self) -> String {
        let cash = (self.cash_percent * dec!(100)).normalize();
        let stock = (self.stock_percent * dec!(100)).normalize();
        format!("{cash}% Cash / {stock}% Stock")
    }
}

/// Method weights and bands used by the valuation summary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ValuationWeights {
    pub dcf_weight: Decimal,
    pub comps_weight: Decimal,
    pub precedents_weight: Decimal,
    pub acquisition_premium: Decimal,
    /// Half-width of the low/high valuation range around the weighted value.
    pub range_band: Decimal,
    /// Half-width of the recommended offer price range.
    pub offer_band: Decimal,
}

impl Default for ValuationWeights {
    fn default() -> Self {
        Self {
            dcf_weight: dec!(0.40),
            comps_weight: dec!(0.35),
            precedents_weight: dec!(0.25),
            acquisition_premium: dec!(0.30),
            range_band: dec!(0.10),
            offer_band: dec!(0.05),
        }
    }
}

impl DealAssumptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dcf.growth_rates.is_empty() {
            return Err(ConfigError::ValidationError(
                "dcf.growth_rates must name at least one projection year".to_string(),
            ));
        }

        let weights = &self.valuation;
        let total_weight = weights.dcf_weight + weights.comps_weight + weights.precedents_weight;
        if total_weight != Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "valuation weights must sum to 1, got {total_weight}"
            )));
        }

        let mix = self.structure.cash_percent + self.structure.stock_percent;
        if mix != Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "structure.cash_percent and structure.stock_percent must sum to 1, got {mix}"
            )));
        }

        if self.synergies.realization.is_empty() {
            return Err(ConfigError::ValidationError(
                "synergies.realization must contain at least one step".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DealAssumptions::default().validate().is_ok());
    }

    #[test]
    fn structure_describes_the_mix() {
        let structure = DealStructure::default();
        assert_eq!(structure.describe(), "90% Cash / 10% Stock");
        assert_eq!(structure.cash_component(), dec!(148500));
        assert_eq!(structure.stock_component(), dec!(16500));
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut assumptions = DealAssumptions::default();
        assumptions.valuation.dcf_weight = dec!(0.5);
        assert!(matches!(
            assumptions.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn mix_must_sum_to_one() {
        let mut assumptions = DealAssumptions::default();
        assumptions.structure.stock_percent = dec!(0.2);
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn empty_growth_schedule_is_rejected() {
        let mut assumptions = DealAssumptions::default();
        assumptions.dcf.growth_rates.clear();
        assert!(assumptions.validate().is_err());
    }
}
