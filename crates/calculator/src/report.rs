use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operating assumptions applied to every forecast year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// One entry per forecast year, applied in order.
    pub growth_rates: Vec<Decimal>,
    pub ebitda_margin: Decimal,
    pub tax_rate: Decimal,
    pub da_percent_revenue: Decimal,
    pub capex_percent_revenue: Decimal,
    pub nwc_percent_revenue: Decimal,
}

/// Everything a full DCF needs beyond the projection assumptions.
#[derive(Debug, Clone, PartialEq)]
pub struct DcfInputs {
    pub base_revenue: Decimal,
    pub projection: ProjectionAssumptions,
    pub wacc: Decimal,
    pub terminal_growth_rate: Decimal,
    pub net_debt: Decimal,
    pub shares_outstanding: Decimal,
}

/// Year-by-year forecast. Every vector has one entry per growth rate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projections {
    pub revenue: Vec<Decimal>,
    pub ebitda: Vec<Decimal>,
    pub ebit: Vec<Decimal>,
    pub nopat: Vec<Decimal>,
    pub da: Vec<Decimal>,
    pub capex: Vec<Decimal>,
    pub nwc_change: Vec<Decimal>,
    pub fcf: Vec<Decimal>,
}

impl Projections {
    pub fn with_capacity(years: usize) -> Self {
        Self {
            revenue: Vec::with_capacity(years),
            ebitda: Vec::with_capacity(years),
            ebit: Vec::with_capacity(years),
            nopat: Vec::with_capacity(years),
            da: Vec::with_capacity(years),
            capex: Vec::with_capacity(years),
            nwc_change: Vec::with_capacity(years),
            fcf: Vec::with_capacity(years),
        }
    }

    pub fn years(&self) -> usize {
        self.revenue.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfResult {
    pub projections: Projections,
    pub pv_fcf: Vec<Decimal>,
    pub terminal_value: Decimal,
    pub pv_terminal_value: Decimal,
    pub enterprise_value: Decimal,
    pub equity_value: Decimal,
    pub value_per_share: Decimal,
}

impl DcfResult {
    pub fn sum_pv_fcf(&self) -> Decimal {
        self.pv_fcf.iter().sum()
    }
}

/// Trading multiples. Zero marks a multiple that is not meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multiples {
    pub ev_revenue: Decimal,
    pub ev_ebitda: Decimal,
    pub pe_ratio: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyEstimate {
    pub revenue_synergies: Decimal,
    pub cost_synergies: Decimal,
    pub total_synergies: Decimal,
    pub one_time_costs: Decimal,
    pub net_synergy_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccretionDilution {
    pub acquirer_standalone_eps: Decimal,
    /// Target earnings spread over the acquirer's share count.
    pub target_standalone_eps: Decimal,
    pub combined_eps_no_synergies: Decimal,
    pub combined_eps_with_synergies: Decimal,
    pub accretion_dilution_percent: Decimal,
    pub is_accretive: bool,
    /// Extra income needed for the pro forma EPS to match standalone EPS.
    pub break_even_synergies: Decimal,
}
