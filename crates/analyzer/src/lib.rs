//! # Deal Analyzer
//!
//! Composes the calculator's formulas over the reference datasets into the nine
//! reports of the deal model: company overview, historical statements, DCF,
//! comparable companies, precedent transactions, synergies, EPS
//! accretion/dilution, the weighted valuation summary and the executive summary.
//!
//! Every report is recomputed from the same immutable inputs on each call, so
//! repeated calls return identical results and one `MaAnalyzer` can serve any
//! number of concurrent requests.

use crate::error::AnalyzerError;
use calculator::{
    CalculatorError, DcfInputs, DistributionSummary, FinancialCalculator, ProjectionAssumptions,
    RangeSummary, SynergyEstimate,
};
use configuration::{DealAssumptions, ReferenceData};
use core_types::{CompanyFinancials, CompanySelector};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub mod error;
pub mod views;

pub use views::*;

const HUNDRED: Decimal = dec!(100);

/// Percentage change from `base` to `value`.
fn percent_change(value: Decimal, base: Decimal, metric: &str) -> Result<Decimal, CalculatorError> {
    checked_ratio(value - base, base, metric)?
        .checked_mul(HUNDRED)
        .ok_or_else(|| CalculatorError::Overflow(metric.to_string()))
}

fn checked_ratio(numerator: Decimal, denominator: Decimal, metric: &str) -> Result<Decimal, CalculatorError> {
    if denominator.is_zero() {
        return Err(CalculatorError::DivisionByZero(metric.to_string()));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalculatorError::Overflow(metric.to_string()))
}

/// The deal analysis engine.
pub struct MaAnalyzer {
    data: Arc<ReferenceData>,
    assumptions: DealAssumptions,
    calc: FinancialCalculator,
}

impl MaAnalyzer {
    pub fn new(data: Arc<ReferenceData>, assumptions: DealAssumptions) -> Self {
        Self {
            data,
            assumptions,
            calc: FinancialCalculator::new(),
        }
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn assumptions(&self) -> &DealAssumptions {
        &self.assumptions
    }

    /// Profiles of both companies and the deal rationale.
    pub fn company_overview(&self) -> CompanyOverview {
        let profile = |company: &CompanyFinancials| CompanyProfile {
            name: company.company_name.clone(),
            ticker: company.ticker.clone(),
            description: company.description.clone(),
            market_cap: company.market_cap,
            current_price: company.current_share_price,
            shares_outstanding: company.shares_outstanding,
        };
        let narrative = &self.data.narrative;

        CompanyOverview {
            acquirer: profile(&self.data.acquirer),
            target: profile(&self.data.target),
            deal_rationale: DealRationale {
                strategic_fit: narrative.strategic_fit.clone(),
                market_opportunity: narrative.market_opportunity.clone(),
                financial_benefits: narrative.financial_benefits.clone(),
            },
        }
    }

    /// The full statement history of both companies, unchanged.
    pub fn financial_statements(&self) -> FinancialStatements {
        let history = |company: &CompanyFinancials| StatementHistory {
            income_statements: company.income_statements.clone(),
            balance_sheets: company.balance_sheets.clone(),
            cash_flow_statements: company.cash_flow_statements.clone(),
        };

        FinancialStatements {
            acquirer: history(&self.data.acquirer),
            target: history(&self.data.target),
        }
    }

    /// Five-year DCF of either company, discounted at its own WACC.
    pub fn dcf_valuation(&self, selector: CompanySelector) -> Result<DcfAnalysis, AnalyzerError> {
        let company = self.data.company(selector);
        let market = &self.data.market;
        let settings = &self.assumptions.dcf;

        let latest_is = company.latest_income_statement()?;
        let net_debt = company.net_debt()?;

        let wacc = self.calc.wacc(
            market.risk_free_rate,
            company.key_metrics.beta,
            market.market_risk_premium,
            settings.cost_of_debt,
            market.tax_rate,
            company.key_metrics.debt_to_equity,
        )?;

        let inputs = DcfInputs {
            base_revenue: latest_is.revenue,
            projection: ProjectionAssumptions {
                growth_rates: settings.growth_rates.clone(),
                ebitda_margin: settings.ebitda_margin,
                tax_rate: market.tax_rate,
                da_percent_revenue: settings.da_percent_revenue,
                capex_percent_revenue: settings.capex_percent_revenue,
                nwc_percent_revenue: settings.nwc_percent_revenue,
            },
            wacc,
            terminal_growth_rate: market.terminal_growth_rate,
            net_debt,
            shares_outstanding: company.shares_outstanding,
        };
        let result = self.calc.dcf_valuation(&inputs)?;

        let upside_downside = percent_change(
            result.value_per_share,
            company.current_share_price,
            "upside_downside",
        )?;

        tracing::debug!(
            company = %selector,
            %wacc,
            enterprise_value = %result.enterprise_value,
            "DCF valuation computed."
        );

        let years = (1..=settings.growth_rates.len() as i32)
            .map(|offset| latest_is.year + offset)
            .collect();
        let sum_pv_fcf = result.sum_pv_fcf();
        let projections = result.projections;

        Ok(DcfAnalysis {
            company: selector,
            assumptions: DcfAssumptionsView {
                base_revenue: inputs.base_revenue,
                growth_rates: inputs.projection.growth_rates,
                ebitda_margin: inputs.projection.ebitda_margin,
                tax_rate: inputs.projection.tax_rate,
                wacc,
                terminal_growth_rate: inputs.terminal_growth_rate,
                net_debt,
                shares_outstanding: inputs.shares_outstanding,
            },
            projections: ProjectionView {
                years,
                revenue: projections.revenue,
                ebitda: projections.ebitda,
                ebit: projections.ebit,
                nopat: projections.nopat,
                fcf: projections.fcf,
            },
            valuation: DcfValuationView {
                pv_fcf: result.pv_fcf,
                sum_pv_fcf,
                terminal_value: result.terminal_value,
                pv_terminal_value: result.pv_terminal_value,
                enterprise_value: result.enterprise_value,
                equity_value: result.equity_value,
                value_per_share: result.value_per_share,
                current_price: company.current_share_price,
                upside_downside,
            },
        })
    }

    /// Trading-multiple valuation of the target.
    ///
    /// Peers are kept only when both EV/Revenue and EV/EBITDA are positive, so
    /// both statistics are computed over the same set.
    pub fn comparable_companies_analysis(&self) -> Result<ComparableCompaniesAnalysis, AnalyzerError> {
        let valid_comps: Vec<_> = self
            .data
            .comparable_companies
            .iter()
            .filter(|c| c.ev_revenue > Decimal::ZERO && c.ev_ebitda > Decimal::ZERO)
            .cloned()
            .collect();

        let ev_revenue: Vec<Decimal> = valid_comps.iter().map(|c| c.ev_revenue).collect();
        let ev_ebitda: Vec<Decimal> = valid_comps.iter().map(|c| c.ev_ebitda).collect();

        let ev_revenue_stats = DistributionSummary::from_sample(&ev_revenue, "comparable ev_revenue")?;
        let ev_ebitda_stats = DistributionSummary::from_sample(&ev_ebitda, "comparable ev_ebitda")?;

        let latest_is = self.data.target.latest_income_statement()?;
        let target_revenue = latest_is.revenue;
        let target_ebitda = latest_is.ebitda;

        let ev_revenue_median = target_revenue * ev_revenue_stats.median;
        let ev_ebitda_median = target_ebitda * ev_ebitda_stats.median;

        tracing::debug!(peers = valid_comps.len(), "Comparable companies analysed.");

        Ok(ComparableCompaniesAnalysis {
            comparable_companies: valid_comps,
            multiples_analysis: TradingMultiples {
                ev_revenue: ev_revenue_stats,
                ev_ebitda: ev_ebitda_stats,
            },
            implied_valuations: ComparableImpliedValuations {
                target_revenue,
                target_ebitda,
                ev_revenue_median,
                ev_revenue_mean: target_revenue * ev_revenue_stats.mean,
                ev_ebitda_median,
                ev_ebitda_mean: target_ebitda * ev_ebitda_stats.mean,
                blended_valuation: (ev_revenue_median + ev_ebitda_median) / dec!(2),
            },
        })
    }

    /// Transaction-multiple valuation of the target.
    ///
    /// Deals need a positive EV/Revenue to be considered at all; within those,
    /// EV/EBITDA and premium statistics each skip their own zero sentinels.
    pub fn precedent_transactions_analysis(
        &self,
    ) -> Result<PrecedentTransactionsAnalysis, AnalyzerError> {
        let valid_txns: Vec<_> = self
            .data
            .precedent_transactions
            .iter()
            .filter(|t| t.ev_revenue > Decimal::ZERO)
            .cloned()
            .collect();

        let ev_revenue: Vec<Decimal> = valid_txns.iter().map(|t| t.ev_revenue).collect();
        let ev_ebitda: Vec<Decimal> = valid_txns
            .iter()
            .map(|t| t.ev_ebitda)
            .filter(|m| *m > Decimal::ZERO)
            .collect();
        let premiums: Vec<Decimal> = valid_txns
            .iter()
            .map(|t| t.premium)
            .filter(|p| *p > Decimal::ZERO)
            .collect();

        let ev_revenue_stats = RangeSummary::from_sample(&ev_revenue, "precedent ev_revenue")?;
        let ev_ebitda_stats = RangeSummary::from_sample(&ev_ebitda, "precedent ev_ebitda")?;
        let premium_stats = RangeSummary::from_sample(&premiums, "precedent premium")?;

        let latest_is = self.data.target.latest_income_statement()?;
        let target_revenue = latest_is.revenue;
        let target_ebitda = latest_is.ebitda;

        let implied_ev_revenue = target_revenue * ev_revenue_stats.median;
        let implied_ev_ebitda = target_ebitda * ev_ebitda_stats.median;

        tracing::debug!(
            transactions = valid_txns.len(),
            ev_revenue_median = %ev_revenue_stats.median,
            ev_ebitda_median = %ev_ebitda_stats.median,
            "Precedent transactions analysis computed."
        );

        Ok(PrecedentTransactionsAnalysis {
            precedent_transactions: valid_txns,
            multiples_analysis: TransactionMultiples {
                ev_revenue: ev_revenue_stats,
                ev_ebitda: ev_ebitda_stats,
                acquisition_premium: premium_stats.scaled(HUNDRED),
            },
            implied_valuations: PrecedentImpliedValuations {
                target_revenue,
                target_ebitda,
                ev_revenue: implied_ev_revenue,
                ev_ebitda: implied_ev_ebitda,
                blended_valuation: (implied_ev_revenue + implied_ev_ebitda) / dec!(2),
                median_premium: premium_stats.median * HUNDRED,
            },
        })
    }

    fn synergy_estimate(&self) -> Result<SynergyEstimate, AnalyzerError> {
        let settings = &self.assumptions.synergies;
        let target_is = self.data.target.latest_income_statement()?;
        let acquirer_is = self.data.acquirer.latest_income_statement()?;

        Ok(self.calc.synergies(
            acquirer_is.revenue,
            target_is.revenue,
            settings.cross_sell_rate,
            settings.cost_synergy_percent,
            target_is.operating_expenses,
            settings.one_time_costs,
        ))
    }

    /// Run-rate synergies with their category breakdown and realization timeline.
    pub fn synergies(&self) -> Result<SynergyAnalysis, AnalyzerError> {
        let settings = &self.assumptions.synergies;
        let estimate = self.synergy_estimate()?;

        let mut breakdown = IndexMap::new();
        for item in &settings.revenue_breakdown {
            breakdown.insert(item.label.clone(), estimate.revenue_synergies * item.share);
        }
        for item in &settings.cost_breakdown {
            breakdown.insert(item.label.clone(), estimate.cost_synergies * item.share);
        }

        let mut timeline = IndexMap::new();
        for step in &settings.realization {
            timeline.insert(step.label.clone(), estimate.total_synergies * step.cumulative_share);
        }

        tracing::debug!(
            total_synergies = %estimate.total_synergies,
            categories = breakdown.len(),
            "Synergies computed."
        );

        Ok(SynergyAnalysis {
            revenue_synergies: estimate.revenue_synergies,
            cost_synergies: estimate.cost_synergies,
            total_synergies: estimate.total_synergies,
            one_time_costs: estimate.one_time_costs,
            net_synergy_value: estimate.net_synergy_value,
            synergy_breakdown: breakdown,
            synergy_realization_timeline: timeline,
        })
    }

    /// Pro forma EPS impact of the proposed cash/stock consideration.
    pub fn accretion_dilution(&self) -> Result<AccretionDilutionAnalysis, AnalyzerError> {
        let acquirer = &self.data.acquirer;
        let structure = &self.assumptions.structure;

        let acquirer_ni = acquirer.latest_income_statement()?.net_income;
        let target_ni = self.data.target.latest_income_statement()?.net_income;

        let synergies_after_tax =
            self.synergy_estimate()?.net_synergy_value * (Decimal::ONE - self.data.market.tax_rate);

        let stock_component = structure.stock_component();
        let new_shares_issued = checked_ratio(
            stock_component,
            acquirer.current_share_price,
            "new_shares_issued",
        )?;

        let analysis = self.calc.accretion_dilution(
            acquirer_ni,
            target_ni,
            acquirer.shares_outstanding,
            synergies_after_tax,
            new_shares_issued,
        )?;

        tracing::debug!(
            accretion_dilution_percent = %analysis.accretion_dilution_percent,
            is_accretive = analysis.is_accretive,
            %new_shares_issued,
            "Accretion/dilution computed."
        );

        Ok(AccretionDilutionAnalysis {
            acquirer_standalone_eps: analysis.acquirer_standalone_eps,
            target_standalone_eps: analysis.target_standalone_eps,
            combined_eps_no_synergies: analysis.combined_eps_no_synergies,
            combined_eps_with_synergies: analysis.combined_eps_with_synergies,
            accretion_dilution_percent: analysis.accretion_dilution_percent,
            is_accretive: analysis.is_accretive,
            break_even_synergies: analysis.break_even_synergies,
            deal_structure: DealStructureView {
                total_consideration: structure.total_consideration,
                cash_component: structure.cash_component(),
                stock_component,
                new_shares_issued,
                pro_forma_shares: acquirer.shares_outstanding + new_shares_issued,
            },
            synergies_impact: synergies_after_tax,
        })
    }

    /// Weighted enterprise value across the three methods and the implied offer for the target.
    pub fn valuation_summary(&self) -> Result<ValuationSummary, AnalyzerError> {
        let weights = &self.assumptions.valuation;
        let target = &self.data.target;

        let dcf_val = self.dcf_valuation(CompanySelector::Target)?.valuation.enterprise_value;
        let comps_val = self.comparable_companies_analysis()?.implied_valuations.blended_valuation;
        let precedents_val = self
            .precedent_transactions_analysis()?
            .implied_valuations
            .blended_valuation;

        let weighted_ev = dcf_val * weights.dcf_weight
            + comps_val * weights.comps_weight
            + precedents_val * weights.precedents_weight;

        let implied_offer_ev = weighted_ev * (Decimal::ONE + weights.acquisition_premium);
        let target_net_debt = target.net_debt()?;
        let implied_equity_value = implied_offer_ev - target_net_debt;
        let implied_price_per_share = checked_ratio(
            implied_equity_value,
            target.shares_outstanding,
            "implied_price_per_share",
        )?;
        let current_price = target.current_share_price;
        let implied_premium = percent_change(implied_price_per_share, current_price, "implied_premium")?;

        tracing::info!(
            %weighted_ev,
            %implied_price_per_share,
            "Valuation summary computed."
        );

        Ok(ValuationSummary {
            valuation_methods: ValuationMethods {
                dcf: dcf_val,
                comparable_companies: comps_val,
                precedent_transactions: precedents_val,
                weighted_average: weighted_ev,
            },
            valuation_range: ValuationRange {
                low: weighted_ev * (Decimal::ONE - weights.range_band),
                mid: weighted_ev,
                high: weighted_ev * (Decimal::ONE + weights.range_band),
            },
            offer_analysis: OfferAnalysis {
                implied_offer_ev,
                implied_equity_value,
                implied_price_per_share,
                current_share_price: current_price,
                implied_premium,
            },
            recommendation: OfferRecommendation {
                action: self.data.narrative.recommendation.summary_action.clone(),
                target_offer_price: implied_price_per_share,
                offer_range_low: implied_price_per_share * (Decimal::ONE - weights.offer_band),
                offer_range_high: implied_price_per_share * (Decimal::ONE + weights.offer_band),
                total_deal_value: implied_equity_value + target_net_debt,
            },
        })
    }

    /// One-page summary drawing on the valuation, synergy and accretion reports.
    pub fn executive_summary(&self) -> Result<ExecutiveSummary, AnalyzerError> {
        let valuation = self.valuation_summary()?;
        let synergies = self.synergies()?;
        let accretion = self.accretion_dilution()?;
        let narrative = &self.data.narrative;

        Ok(ExecutiveSummary {
            transaction_overview: TransactionOverview {
                acquirer: self.data.acquirer.company_name.clone(),
                target: self.data.target.company_name.clone(),
                proposed_deal_value: valuation.recommendation.total_deal_value,
                offer_price_per_share: valuation.recommendation.target_offer_price,
                premium_to_current: valuation.offer_analysis.implied_premium,
                structure: self.assumptions.structure.describe(),
            },
            strategic_rationale: narrative.strategic_rationale.clone(),
            financial_highlights: FinancialHighlights {
                total_synergies: synergies.total_synergies,
                revenue_synergies: synergies.revenue_synergies,
                cost_synergies: synergies.cost_synergies,
                eps_accretion_year2: accretion.accretion_dilution_percent,
                is_accretive: accretion.is_accretive,
            },
            valuation_summary: ValuationHighlights {
                dcf_valuation: valuation.valuation_methods.dcf,
                comps_valuation: valuation.valuation_methods.comparable_companies,
                precedents_valuation: valuation.valuation_methods.precedent_transactions,
                implied_enterprise_value: valuation.offer_analysis.implied_offer_ev,
            },
            key_risks: narrative.key_risks.clone(),
            recommendation: ExecutiveRecommendation {
                action: narrative.recommendation.action.clone(),
                confidence: narrative.recommendation.confidence.clone(),
                rationale: narrative.recommendation.rationale.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[fixture]
    fn analyzer() -> MaAnalyzer {
        let data = configuration::load_reference_data().unwrap();
        MaAnalyzer::new(Arc::new(data), DealAssumptions::default())
    }

    #[rstest]
    fn overview_reports_both_companies(analyzer: MaAnalyzer) {
        let overview = analyzer.company_overview();
        assert_eq!(overview.acquirer.ticker, "CRM");
        assert_eq!(overview.target.ticker, "NOW");
        assert_eq!(overview.target.current_price, dec!(685.25));
        assert_eq!(overview.deal_rationale.strategic_fit.len(), 4);
    }

    #[rstest]
    fn statements_are_passed_through(analyzer: MaAnalyzer) {
        let statements = analyzer.financial_statements();
        assert_eq!(statements.target.income_statements.len(), 5);
        assert_eq!(
            statements.acquirer.balance_sheets,
            analyzer.reference_data().acquirer.balance_sheets
        );
    }

    #[rstest]
    fn target_dcf_uses_its_own_wacc(analyzer: MaAnalyzer) {
        let dcf = analyzer.dcf_valuation(CompanySelector::Target).unwrap();

        assert_eq!(dcf.company, CompanySelector::Target);
        assert_close(dcf.assumptions.wacc, dec!(0.118409), dec!(0.000001));
        assert_eq!(dcf.assumptions.net_debt, dec!(-3162));
        assert_eq!(dcf.projections.years, vec![2025, 2026, 2027, 2028, 2029]);
        assert_close(dcf.projections.revenue[0], dec!(12915.1), dec!(0.0001));
        assert_close(dcf.valuation.enterprise_value, dec!(24361.1473), dec!(0.01));
        assert_close(dcf.valuation.value_per_share, dec!(132.9621), dec!(0.001));
        assert_close(dcf.valuation.upside_downside, dec!(-80.5966), dec!(0.001));
        assert_eq!(
            dcf.valuation.sum_pv_fcf,
            dcf.valuation.pv_fcf.iter().copied().sum::<Decimal>()
        );
    }

    #[rstest]
    fn acquirer_dcf_differs_from_target(analyzer: MaAnalyzer) {
        let acquirer = analyzer.dcf_valuation(CompanySelector::Acquirer).unwrap();
        let target = analyzer.dcf_valuation(CompanySelector::Target).unwrap();

        assert_eq!(acquirer.company, CompanySelector::Acquirer);
        assert_ne!(acquirer.assumptions.wacc, target.assumptions.wacc);
        assert_close(acquirer.valuation.enterprise_value, dec!(96127.9252), dec!(0.05));
    }

    #[rstest]
    fn comps_exclude_sentinel_peers(analyzer: MaAnalyzer) {
        let comps = analyzer.comparable_companies_analysis().unwrap();

        assert_eq!(comps.comparable_companies.len(), 9);
        assert!(comps.comparable_companies.iter().all(|c| c.ticker != "SNOW"));

        let ev_revenue = &comps.multiples_analysis.ev_revenue;
        assert_eq!(ev_revenue.median, dec!(12.47));
        assert_eq!(ev_revenue.percentile_25, dec!(7.27));
        assert_eq!(ev_revenue.percentile_75, dec!(13.60));
        assert_eq!(comps.multiples_analysis.ev_ebitda.median, dec!(34.0));

        let implied = &comps.implied_valuations;
        assert_eq!(implied.ev_revenue_median, dec!(136484.15));
        assert_eq!(implied.ev_ebitda_median, dec!(79730));
        assert_eq!(implied.blended_valuation, dec!(108107.075));
    }

    #[rstest]
    fn precedents_filter_each_statistic(analyzer: MaAnalyzer) {
        let precedents = analyzer.precedent_transactions_analysis().unwrap();

        assert_eq!(precedents.precedent_transactions.len(), 8);
        let multiples = &precedents.multiples_analysis;
        assert_eq!(multiples.ev_revenue.median, dec!(12.39));
        assert_eq!(multiples.ev_ebitda.median, dec!(59.6));
        assert_eq!(multiples.acquisition_premium.median, dec!(30.4));
        assert_eq!(multiples.acquisition_premium.min, dec!(18.8));

        let implied = &precedents.implied_valuations;
        assert_eq!(implied.ev_revenue, dec!(135608.55));
        assert_eq!(implied.ev_ebitda, dec!(139762));
        assert_eq!(implied.blended_valuation, dec!(137685.275));
        assert_eq!(implied.median_premium, dec!(30.4));
    }

    #[rstest]
    fn synergy_breakdown_and_timeline(analyzer: MaAnalyzer) {
        let synergies = analyzer.synergies().unwrap();

        assert_eq!(synergies.revenue_synergies, dec!(1641.75));
        assert_eq!(synergies.cost_synergies, dec!(1240.56));
        assert_eq!(synergies.total_synergies, dec!(2882.31));
        assert_eq!(synergies.net_synergy_value, dec!(382.31));

        let breakdown = &synergies.synergy_breakdown;
        assert_eq!(breakdown.len(), 6);
        assert_eq!(
            breakdown.get_index(0).map(|(label, _)| label.as_str()),
            Some("Cross-selling to Salesforce customers")
        );
        assert_eq!(breakdown.get("Cross-selling to Salesforce customers"), Some(&dec!(985.05)));
        let breakdown_total: Decimal = breakdown.values().copied().sum();
        assert_eq!(breakdown_total, synergies.total_synergies);

        let timeline = &synergies.synergy_realization_timeline;
        assert_eq!(timeline.get("Year 1"), Some(&dec!(720.5775)));
        assert_eq!(timeline.get("Year 2"), Some(&dec!(1873.5015)));
        assert_eq!(timeline.get("Year 3+"), Some(&synergies.total_synergies));
        assert_eq!(
            timeline.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Year 1", "Year 2", "Year 3+"]
        );
    }

    #[rstest]
    fn deal_is_accretive(analyzer: MaAnalyzer) {
        let accretion = analyzer.accretion_dilution().unwrap();

        assert!(accretion.is_accretive);
        assert_close(accretion.accretion_dilution_percent, dec!(42.4721), dec!(0.001));
        assert_eq!(accretion.synergies_impact, dec!(305.848));
        assert_eq!(accretion.deal_structure.cash_component, dec!(148500));
        assert_eq!(accretion.deal_structure.stock_component, dec!(16500));
        assert_close(accretion.deal_structure.new_shares_issued, dec!(62.1469), dec!(0.0001));
        assert_close(accretion.break_even_synergies, dec!(-1189.7160), dec!(0.001));
    }

    #[rstest]
    fn valuation_summary_weights_the_methods(analyzer: MaAnalyzer) {
        let summary = analyzer.valuation_summary().unwrap();
        let methods = &summary.valuation_methods;

        assert_close(methods.weighted_average, dec!(82003.2539), dec!(0.01));
        assert_eq!(summary.valuation_range.mid, methods.weighted_average);
        assert_eq!(summary.valuation_range.low, methods.weighted_average * dec!(0.90));

        let offer = &summary.offer_analysis;
        assert_eq!(offer.implied_offer_ev, methods.weighted_average * dec!(1.30));
        assert_close(offer.implied_equity_value, offer.implied_offer_ev + dec!(3162), dec!(0.000001));
        assert_close(offer.implied_price_per_share, dec!(530.2716), dec!(0.001));
        assert!(offer.implied_premium < Decimal::ZERO);

        let recommendation = &summary.recommendation;
        assert_eq!(recommendation.action, "PROCEED WITH ACQUISITION");
        assert_close(recommendation.total_deal_value, offer.implied_offer_ev, dec!(0.000001));
        assert_eq!(
            recommendation.offer_range_high,
            recommendation.target_offer_price * dec!(1.05)
        );
    }

    #[rstest]
    fn executive_summary_is_consistent(analyzer: MaAnalyzer) {
        let summary = analyzer.executive_summary().unwrap();
        let valuation = analyzer.valuation_summary().unwrap();

        assert_eq!(summary.transaction_overview.structure, "90% Cash / 10% Stock");
        assert_eq!(
            summary.transaction_overview.proposed_deal_value,
            valuation.recommendation.total_deal_value
        );
        assert_eq!(
            summary.valuation_summary.implied_enterprise_value,
            valuation.offer_analysis.implied_offer_ev
        );
        assert!(summary.financial_highlights.is_accretive);
        assert_eq!(summary.key_risks.len(), 5);
        assert_eq!(summary.recommendation.confidence, "HIGH");
    }

    #[rstest]
    fn npv_of_projected_fcf_matches_discounted_sum(analyzer: MaAnalyzer) {
        let dcf = analyzer.dcf_valuation(CompanySelector::Target).unwrap();
        let npv = FinancialCalculator::new()
            .npv(&dcf.projections.fcf, dcf.assumptions.wacc)
            .unwrap();
        assert_eq!(npv, dcf.valuation.sum_pv_fcf);
    }

    #[rstest]
    fn empty_growth_schedule_is_not_enough_data(analyzer: MaAnalyzer) {
        let mut assumptions = DealAssumptions::default();
        assumptions.dcf.growth_rates.clear();
        let analyzer = MaAnalyzer::new(Arc::new(analyzer.reference_data().clone()), assumptions);

        let err = analyzer.dcf_valuation(CompanySelector::Target).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Calculation(CalculatorError::NotEnoughData(_))
        ));
    }

    #[rstest]
    fn all_peers_filtered_is_not_enough_data(analyzer: MaAnalyzer) {
        let mut data = analyzer.reference_data().clone();
        for comp in &mut data.comparable_companies {
            comp.ev_ebitda = Decimal::ZERO;
        }
        let analyzer = MaAnalyzer::new(Arc::new(data), DealAssumptions::default());

        assert!(matches!(
            analyzer.comparable_companies_analysis(),
            Err(AnalyzerError::Calculation(CalculatorError::NotEnoughData(_)))
        ));
    }

    #[rstest]
    fn zero_share_price_is_a_division_error(analyzer: MaAnalyzer) {
        let mut data = analyzer.reference_data().clone();
        data.acquirer.current_share_price = Decimal::ZERO;
        let analyzer = MaAnalyzer::new(Arc::new(data), DealAssumptions::default());

        assert!(matches!(
            analyzer.accretion_dilution(),
            Err(AnalyzerError::Calculation(CalculatorError::DivisionByZero(_)))
        ));
    }

    #[rstest]
    #[case::zero_base(dec!(10), dec!(0), CalculatorError::DivisionByZero("m".to_string()))]
    #[case::quotient_too_large(Decimal::MAX, dec!(0.5), CalculatorError::Overflow("m".to_string()))]
    fn ratio_failures_are_classified(
        #[case] numerator: Decimal,
        #[case] denominator: Decimal,
        #[case] expected: CalculatorError,
    ) {
        assert_eq!(checked_ratio(numerator, denominator, "m"), Err(expected));
    }

    #[rstest]
    #[case::zero_base(dec!(10), dec!(0), CalculatorError::DivisionByZero("m".to_string()))]
    #[case::percent_too_large(Decimal::MAX, dec!(1), CalculatorError::Overflow("m".to_string()))]
    fn percent_change_failures_are_classified(
        #[case] value: Decimal,
        #[case] base: Decimal,
        #[case] expected: CalculatorError,
    ) {
        assert_eq!(percent_change(value, base, "m"), Err(expected));
    }

    #[test]
    fn percent_change_of_a_doubling_is_one_hundred() {
        assert_eq!(percent_change(dec!(20), dec!(10), "m"), Ok(dec!(100)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[rstest]
    fn each_report_logs_at_debug(analyzer: MaAnalyzer) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            analyzer.precedent_transactions_analysis().unwrap();
            analyzer.synergies().unwrap();
            analyzer.accretion_dilution().unwrap();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Precedent transactions analysis computed."));
        assert!(output.contains("Synergies computed."));
        assert!(output.contains("Accretion/dilution computed."));
    }
}
