use crate::error::CalculatorError;
use crate::report::{
    AccretionDilution, DcfInputs, DcfResult, Multiples, ProjectionAssumptions, Projections,
    SynergyEstimate,
};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// A stateless calculator for the corporate-finance formulas behind a deal model.
#[derive(Debug, Default, Clone, Copy)]
pub struct FinancialCalculator {}

impl FinancialCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// CAPM cost of equity: `risk_free_rate + beta * market_risk_premium`.
    pub fn cost_of_equity(
        &self,
        risk_free_rate: Decimal,
        beta: Decimal,
        market_risk_premium: Decimal,
    ) -> Decimal {
        risk_free_rate + beta * market_risk_premium
    }

    /// Weighted average cost of capital.
    ///
    /// Capital weights are derived from the debt-to-equity ratio, so they always sum to one.
    /// Downstream DCF math additionally needs the result to exceed the terminal growth rate;
    /// that is left to the caller.
    pub fn wacc(
        &self,
        risk_free_rate: Decimal,
        beta: Decimal,
        market_risk_premium: Decimal,
        cost_of_debt: Decimal,
        tax_rate: Decimal,
        debt_to_equity: Decimal,
    ) -> Result<Decimal, CalculatorError> {
        let cost_of_equity = self.cost_of_equity(risk_free_rate, beta, market_risk_premium);

        let total_capital = Decimal::ONE + debt_to_equity;
        let weight_equity = checked_quotient(Decimal::ONE, total_capital, "wacc")?;
        let weight_debt = debt_to_equity * weight_equity;

        Ok(weight_equity * cost_of_equity + weight_debt * cost_of_debt * (Decimal::ONE - tax_rate))
    }

    /// Perpetuity-growth (Gordon) terminal value: `final_fcf * (1 + g) / (wacc - g)`.
    ///
    /// A negative denominator is not rejected and yields a sign-inverted value.
    pub fn terminal_value(
        &self,
        final_fcf: Decimal,
        wacc: Decimal,
        terminal_growth_rate: Decimal,
    ) -> Result<Decimal, CalculatorError> {
        checked_quotient(
            final_fcf * (Decimal::ONE + terminal_growth_rate),
            wacc - terminal_growth_rate,
            "terminal_value",
        )
    }

    /// Discounts a value received at the end of year `periods` (counted from 1).
    ///
    /// A rate of exactly -1 is a `DivisionByZero`. A discount factor `(1 + rate)^periods`
    /// that leaves the `Decimal` range is an `Overflow`.
    ///
    /// Results keep at most 28 decimal places, so a present value smaller than `1e-28`
    /// rounds to zero. Over very long horizons the value therefore stops decreasing
    /// with `periods` and stays at zero.
    pub fn present_value(
        &self,
        future_value: Decimal,
        rate: Decimal,
        periods: u32,
    ) -> Result<Decimal, CalculatorError> {
        const METRIC: &str = "present_value";
        let base = Decimal::ONE + rate;
        if base.is_zero() && periods > 0 {
            return Err(CalculatorError::DivisionByZero(METRIC.to_string()));
        }

        let factor = base
            .checked_powi(i64::from(periods))
            .ok_or_else(|| CalculatorError::Overflow(METRIC.to_string()))?;
        // A non-zero base whose power rounds to zero has underflowed.
        if factor.is_zero() {
            return Err(CalculatorError::Overflow(METRIC.to_string()));
        }
        future_value
            .checked_div(factor)
            .ok_or_else(|| CalculatorError::Overflow(METRIC.to_string()))
    }

    /// Net present value of a stream of end-of-year cash flows, the first one
    /// arriving at the end of year 1.
    pub fn npv(&self, cash_flows: &[Decimal], rate: Decimal) -> Result<Decimal, CalculatorError> {
        let mut npv = Decimal::ZERO;
        for (period, cash_flow) in (1u32..).zip(cash_flows) {
            npv += self.present_value(*cash_flow, rate, period)?;
        }
        Ok(npv)
    }

    /// Projects revenue and free cash flow forward, one year per growth rate.
    ///
    /// The working-capital baseline for the first forecast year is
    /// `base_revenue * nwc_percent_revenue`.
    pub fn project_financials(
        &self,
        base_revenue: Decimal,
        assumptions: &ProjectionAssumptions,
    ) -> Projections {
        let mut projections = Projections::with_capacity(assumptions.growth_rates.len());

        let mut prev_revenue = base_revenue;
        let mut prev_nwc = base_revenue * assumptions.nwc_percent_revenue;

        for &growth_rate in &assumptions.growth_rates {
            let revenue = prev_revenue * (Decimal::ONE + growth_rate);
            let ebitda = revenue * assumptions.ebitda_margin;
            let da = revenue * assumptions.da_percent_revenue;
            let ebit = ebitda - da;
            let nopat = ebit * (Decimal::ONE - assumptions.tax_rate);
            let capex = revenue * assumptions.capex_percent_revenue;

            let nwc = revenue * assumptions.nwc_percent_revenue;
            let nwc_change = nwc - prev_nwc;

            // FCF = NOPAT + D&A - CapEx - change in NWC
            let fcf = nopat + da - capex - nwc_change;

            projections.revenue.push(revenue);
            projections.ebitda.push(ebitda);
            projections.da.push(da);
            projections.ebit.push(ebit);
            projections.nopat.push(nopat);
            projections.capex.push(capex);
            projections.nwc_change.push(nwc_change);
            projections.fcf.push(fcf);

            prev_revenue = revenue;
            prev_nwc = nwc;
        }

        projections
    }

    /// The complete discounted-cash-flow valuation.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Base revenue, projection assumptions, discount rate, terminal growth,
    ///   net debt and share count.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DcfResult` or a `CalculatorError` when there is nothing
    /// to project or a denominator is exactly zero.
    pub fn dcf_valuation(&self, inputs: &DcfInputs) -> Result<DcfResult, CalculatorError> {
        let projections = self.project_financials(inputs.base_revenue, &inputs.projection);

        let final_fcf = projections
            .fcf
            .last()
            .copied()
            .ok_or_else(|| CalculatorError::NotEnoughData("growth_rates".to_string()))?;

        let pv_fcf = (1u32..)
            .zip(&projections.fcf)
            .map(|(period, fcf)| self.present_value(*fcf, inputs.wacc, period))
            .collect::<Result<Vec<_>, _>>()?;

        let terminal_value =
            self.terminal_value(final_fcf, inputs.wacc, inputs.terminal_growth_rate)?;
        let horizon = u32::try_from(projections.years())
            .map_err(|_| CalculatorError::NotEnoughData("growth_rates".to_string()))?;
        let pv_terminal_value = self.present_value(terminal_value, inputs.wacc, horizon)?;

        let enterprise_value = pv_fcf.iter().sum::<Decimal>() + pv_terminal_value;
        let equity_value = enterprise_value - inputs.net_debt;
        let value_per_share =
            checked_quotient(equity_value, inputs.shares_outstanding, "value_per_share")?;

        tracing::debug!(%enterprise_value, %value_per_share, "DCF valuation computed.");

        Ok(DcfResult {
            projections,
            pv_fcf,
            terminal_value,
            pv_terminal_value,
            enterprise_value,
            equity_value,
            value_per_share,
        })
    }

    /// Valuation multiples, each zero when its denominator is not positive.
    pub fn multiples(
        &self,
        market_cap: Decimal,
        enterprise_value: Decimal,
        revenue: Decimal,
        ebitda: Decimal,
        net_income: Decimal,
    ) -> Multiples {
        Multiples {
            ev_revenue: ratio_or_zero(enterprise_value, revenue),
            ev_ebitda: ratio_or_zero(enterprise_value, ebitda),
            pe_ratio: ratio_or_zero(market_cap, net_income),
        }
    }

    /// Run-rate merger synergies.
    ///
    /// `_acquirer_revenue` does not enter the current formula; it is part of the
    /// signature so that acquirer-side cross-selling can be modelled without
    /// changing callers.
    pub fn synergies(
        &self,
        _acquirer_revenue: Decimal,
        target_revenue: Decimal,
        cross_sell_rate: Decimal,
        cost_synergy_percent: Decimal,
        target_opex: Decimal,
        one_time_costs: Decimal,
    ) -> SynergyEstimate {
        let revenue_synergies = target_revenue * cross_sell_rate;
        let cost_synergies = target_opex * cost_synergy_percent;
        let total_synergies = revenue_synergies + cost_synergies;

        SynergyEstimate {
            revenue_synergies,
            cost_synergies,
            total_synergies,
            one_time_costs,
            net_synergy_value: total_synergies - one_time_costs,
        }
    }

    /// Pro forma EPS accretion/dilution.
    ///
    /// `target_standalone_eps` spreads the target's earnings over the acquirer's share
    /// count, not the target's own. `break_even_synergies` is the additional income the
    /// combined company needs to match standalone EPS at the diluted share count.
    pub fn accretion_dilution(
        &self,
        acquirer_net_income: Decimal,
        target_net_income: Decimal,
        acquirer_shares: Decimal,
        synergies_after_tax: Decimal,
        new_shares_issued: Decimal,
    ) -> Result<AccretionDilution, CalculatorError> {
        let acquirer_standalone_eps =
            checked_quotient(acquirer_net_income, acquirer_shares, "acquirer_standalone_eps")?;
        let target_standalone_eps =
            checked_quotient(target_net_income, acquirer_shares, "target_standalone_eps")?;

        let combined_net_income_no_synergies = acquirer_net_income + target_net_income;
        let total_shares = acquirer_shares + new_shares_issued;
        let combined_eps_no_synergies = checked_quotient(
            combined_net_income_no_synergies,
            total_shares,
            "combined_eps_no_synergies",
        )?;

        let combined_net_income_with_synergies =
            combined_net_income_no_synergies + synergies_after_tax;
        let combined_eps_with_synergies = checked_quotient(
            combined_net_income_with_synergies,
            total_shares,
            "combined_eps_with_synergies",
        )?;

        let accretion_dilution_percent = checked_quotient(
            combined_eps_with_synergies - acquirer_standalone_eps,
            acquirer_standalone_eps,
            "accretion_dilution_percent",
        )?
        .checked_mul(dec!(100))
        .ok_or_else(|| CalculatorError::Overflow("accretion_dilution_percent".to_string()))?;

        let break_even_synergies =
            acquirer_standalone_eps * total_shares - combined_net_income_no_synergies;

        Ok(AccretionDilution {
            acquirer_standalone_eps,
            target_standalone_eps,
            combined_eps_no_synergies,
            combined_eps_with_synergies,
            accretion_dilution_percent,
            is_accretive: accretion_dilution_percent > Decimal::ZERO,
            break_even_synergies,
        })
    }
}

/// `numerator / denominator`, telling a zero denominator apart from a quotient
/// outside the `Decimal` range.
fn checked_quotient(
    numerator: Decimal,
    denominator: Decimal,
    metric: &str,
) -> Result<Decimal, CalculatorError> {
    if denominator.is_zero() {
        return Err(CalculatorError::DivisionByZero(metric.to_string()));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalculatorError::Overflow(metric.to_string()))
}

fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}
