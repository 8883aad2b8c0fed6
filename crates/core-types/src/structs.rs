use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fiscal year of income statement data. Amounts are in millions.
///
/// The accounting identities (gross_profit = revenue - cogs, ebit = ebitda - D&A, ...)
/// are the responsibility of whoever builds the record; nothing re-derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub year: i32,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses: Decimal,
    pub ebitda: Decimal,
    pub depreciation_amortization: Decimal,
    pub ebit: Decimal,
    pub interest_expense: Decimal,
    pub ebt: Decimal,
    pub tax_expense: Decimal,
    pub net_income: Decimal,
    pub shares_outstanding: Decimal,
    pub eps: Decimal,
}

/// Year-end balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub year: i32,
    pub cash: Decimal,
    pub accounts_receivable: Decimal,
    pub inventory: Decimal,
    pub current_assets: Decimal,
    pub ppe: Decimal,
    pub intangibles: Decimal,
    pub total_assets: Decimal,
    pub accounts_payable: Decimal,
    pub short_term_debt: Decimal,
    pub current_liabilities: Decimal,
    pub long_term_debt: Decimal,
    pub total_liabilities: Decimal,
    pub shareholders_equity: Decimal,
}

impl BalanceSheet {
    /// Total debt less cash.
    pub fn net_debt(&self) -> Decimal {
        self.long_term_debt + self.short_term_debt - self.cash
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub year: i32,
    pub operating_cash_flow: Decimal,
    pub capex: Decimal,
    pub free_cash_flow: Decimal,
    pub financing_cash_flow: Decimal,
    pub investing_cash_flow: Decimal,
    pub net_change_cash: Decimal,
}

/// Market-derived ratios. Only `beta` and `debt_to_equity` feed a formula (the WACC);
/// the rest are descriptive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub beta: Decimal,
    pub debt_to_equity: Decimal,
    pub current_ratio: Decimal,
    pub roe: Decimal,
    pub roa: Decimal,
    pub revenue_growth_5yr_cagr: Decimal,
    pub gross_margin: Decimal,
    pub operating_margin: Decimal,
    pub net_margin: Decimal,
    pub fcf_margin: Decimal,
}

/// Everything known about one side of the deal.
///
/// Statement sequences are ordered by fiscal year, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    pub company_name: String,
    pub ticker: String,
    pub description: String,
    pub market_cap: Decimal,
    pub current_share_price: Decimal,
    pub shares_outstanding: Decimal,
    pub fiscal_year_end: String,
    pub key_metrics: KeyMetrics,
    pub income_statements: Vec<IncomeStatement>,
    pub balance_sheets: Vec<BalanceSheet>,
    pub cash_flow_statements: Vec<CashFlowStatement>,
}

impl CompanyFinancials {
    pub fn latest_income_statement(&self) -> Result<&IncomeStatement, CoreError> {
        self.income_statements
            .last()
            .ok_or_else(|| self.missing("income statement"))
    }

    pub fn latest_balance_sheet(&self) -> Result<&BalanceSheet, CoreError> {
        self.balance_sheets
            .last()
            .ok_or_else(|| self.missing("balance sheet"))
    }

    /// Net debt taken from the most recent balance sheet.
    pub fn net_debt(&self) -> Result<Decimal, CoreError> {
        Ok(self.latest_balance_sheet()?.net_debt())
    }

    fn missing(&self, statement: &'static str) -> CoreError {
        CoreError::MissingStatement {
            company: self.ticker.clone(),
            statement,
        }
    }
}

/// A trading peer. A multiple of exactly zero means "not meaningful"
/// (negative EBITDA or earnings) and must never enter a statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableCompany {
    pub ticker: String,
    pub company_name: String,
    pub market_cap: Decimal,
    pub enterprise_value: Decimal,
    pub revenue: Decimal,
    pub ebitda: Decimal,
    pub net_income: Decimal,
    pub ev_revenue: Decimal,
    pub ev_ebitda: Decimal,
    pub pe_ratio: Decimal,
    pub revenue_growth: Decimal,
}

/// A historical deal. `ev_ebitda` and `premium` follow the same zero-sentinel
/// convention as `ComparableCompany`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecedentTransaction {
    pub date: String,
    pub acquirer: String,
    pub target: String,
    pub deal_value: Decimal,
    pub target_revenue: Decimal,
    pub target_ebitda: Decimal,
    pub ev_revenue: Decimal,
    pub ev_ebitda: Decimal,
    pub premium: Decimal,
}

/// Process-wide market inputs shared read-only by every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub risk_free_rate: Decimal,
    pub market_risk_premium: Decimal,
    pub tax_rate: Decimal,
    pub terminal_growth_rate: Decimal,
    pub inflation_rate: Decimal,
    // Sector benchmarks, informational only.
    pub saas_median_ev_revenue: Decimal,
    pub saas_median_ev_ebitda: Decimal,
    pub saas_median_premium: Decimal,
}
