//! Serializable results of each analysis. Field names are the JSON keys served by the API.

use calculator::{DistributionSummary, RangeSummary};
use core_types::{
    BalanceSheet, CashFlowStatement, ComparableCompany, CompanySelector, IncomeStatement,
    PrecedentTransaction,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;

// --- Overview & statements ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompanyProfile {
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub market_cap: Decimal,
    pub current_price: Decimal,
    pub shares_outstanding: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DealRationale {
    pub strategic_fit: Vec<String>,
    pub market_opportunity: Vec<String>,
    pub financial_benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompanyOverview {
    pub acquirer: CompanyProfile,
    pub target: CompanyProfile,
    pub deal_rationale: DealRationale,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StatementHistory {
    pub income_statements: Vec<IncomeStatement>,
    pub balance_sheets: Vec<BalanceSheet>,
    pub cash_flow_statements: Vec<CashFlowStatement>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FinancialStatements {
    pub acquirer: StatementHistory,
    pub target: StatementHistory,
}

// --- DCF ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DcfAssumptionsView {
    pub base_revenue: Decimal,
    pub growth_rates: Vec<Decimal>,
    pub ebitda_margin: Decimal,
    pub tax_rate: Decimal,
    pub wacc: Decimal,
    pub terminal_growth_rate: Decimal,
    pub net_debt: Decimal,
    pub shares_outstanding: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProjectionView {
    pub years: Vec<i32>,
    pub revenue: Vec<Decimal>,
    pub ebitda: Vec<Decimal>,
    pub ebit: Vec<Decimal>,
    pub nopat: Vec<Decimal>,
    pub fcf: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DcfValuationView {
    pub pv_fcf: Vec<Decimal>,
    pub sum_pv_fcf: Decimal,
    pub terminal_value: Decimal,
    pub pv_terminal_value: Decimal,
    pub enterprise_value: Decimal,
    pub equity_value: Decimal,
    pub value_per_share: Decimal,
    pub current_price: Decimal,
    /// Percent difference of the DCF value per share to the current price.
    pub upside_downside: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DcfAnalysis {
    pub company: CompanySelector,
    pub assumptions: DcfAssumptionsView,
    pub projections: ProjectionView,
    pub valuation: DcfValuationView,
}

// --- Comparable companies ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TradingMultiples {
    pub ev_revenue: DistributionSummary,
    pub ev_ebitda: DistributionSummary,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComparableImpliedValuations {
    pub target_revenue: Decimal,
    pub target_ebitda: Decimal,
    pub ev_revenue_median: Decimal,
    pub ev_revenue_mean: Decimal,
    pub ev_ebitda_median: Decimal,
    pub ev_ebitda_mean: Decimal,
    pub blended_valuation: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComparableCompaniesAnalysis {
    pub comparable_companies: Vec<ComparableCompany>,
    pub multiples_analysis: TradingMultiples,
    pub implied_valuations: ComparableImpliedValuations,
}

// --- Precedent transactions ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TransactionMultiples {
    pub ev_revenue: RangeSummary,
    pub ev_ebitda: RangeSummary,
    /// In percent.
    pub acquisition_premium: RangeSummary,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PrecedentImpliedValuations {
    pub target_revenue: Decimal,
    pub target_ebitda: Decimal,
    pub ev_revenue: Decimal,
    pub ev_ebitda: Decimal,
    pub blended_valuation: Decimal,
    /// In percent.
    pub median_premium: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PrecedentTransactionsAnalysis {
    pub precedent_transactions: Vec<PrecedentTransaction>,
    pub multiples_analysis: TransactionMultiples,
    pub implied_valuations: PrecedentImpliedValuations,
}

// --- Synergies & accretion ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SynergyAnalysis {
    pub revenue_synergies: Decimal,
    pub cost_synergies: Decimal,
    pub total_synergies: Decimal,
    pub one_time_costs: Decimal,
    pub net_synergy_value: Decimal,
    /// Category to amount, in configuration order.
    pub synergy_breakdown: IndexMap<String, Decimal>,
    /// Cumulative run-rate synergies by period.
    pub synergy_realization_timeline: IndexMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DealStructureView {
    pub total_consideration: Decimal,
    pub cash_component: Decimal,
    pub stock_component: Decimal,
    pub new_shares_issued: Decimal,
    pub pro_forma_shares: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AccretionDilutionAnalysis {
    pub acquirer_standalone_eps: Decimal,
    pub target_standalone_eps: Decimal,
    pub combined_eps_no_synergies: Decimal,
    pub combined_eps_with_synergies: Decimal,
    pub accretion_dilution_percent: Decimal,
    pub is_accretive: bool,
    pub break_even_synergies: Decimal,
    pub deal_structure: DealStructureView,
    /// After-tax net synergies added to combined earnings.
    pub synergies_impact: Decimal,
}

// --- Valuation summary ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValuationMethods {
    pub dcf: Decimal,
    pub comparable_companies: Decimal,
    pub precedent_transactions: Decimal,
    pub weighted_average: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValuationRange {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OfferAnalysis {
    pub implied_offer_ev: Decimal,
    pub implied_equity_value: Decimal,
    pub implied_price_per_share: Decimal,
    pub current_share_price: Decimal,
    /// In percent, relative to the current share price.
    pub implied_premium: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OfferRecommendation {
    pub action: String,
    pub target_offer_price: Decimal,
    pub offer_range_low: Decimal,
    pub offer_range_high: Decimal,
    pub total_deal_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValuationSummary {
    pub valuation_methods: ValuationMethods,
    pub valuation_range: ValuationRange,
    pub offer_analysis: OfferAnalysis,
    pub recommendation: OfferRecommendation,
}

// --- Executive summary ---

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TransactionOverview {
    pub acquirer: String,
    pub target: String,
    pub proposed_deal_value: Decimal,
    pub offer_price_per_share: Decimal,
    pub premium_to_current: Decimal,
    pub structure: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FinancialHighlights {
    pub total_synergies: Decimal,
    pub revenue_synergies: Decimal,
    pub cost_synergies: Decimal,
    pub eps_accretion_year2: Decimal,
    pub is_accretive: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValuationHighlights {
    pub dcf_valuation: Decimal,
    pub comps_valuation: Decimal,
    pub precedents_valuation: Decimal,
    pub implied_enterprise_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExecutiveRecommendation {
    pub action: String,
    pub confidence: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExecutiveSummary {
    pub transaction_overview: TransactionOverview,
    pub strategic_rationale: Vec<String>,
    pub financial_highlights: FinancialHighlights,
    pub valuation_summary: ValuationHighlights,
    pub key_risks: Vec<String>,
    pub recommendation: ExecutiveRecommendation,
}
