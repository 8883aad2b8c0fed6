use crate::{AppState, error::AppError};
use analyzer::{
    AccretionDilutionAnalysis, CompanyOverview, ComparableCompaniesAnalysis, DcfAnalysis,
    ExecutiveSummary, FinancialStatements, PrecedentTransactionsAnalysis, SynergyAnalysis,
    ValuationSummary,
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use core_types::CompanySelector;
use database::{StatusCheck, StatusCheckCreate};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DcfQuery {
    pub company: Option<String>,
}

/// # GET /api/
/// Lists every analytical route.
pub async fn api_index(State(state): State<Arc<AppState>>) -> Json<Value> {
    let data = state.analyzer.reference_data();
    Json(json!({
        "message": format!(
            "M&A Analysis API - {} acquiring {}",
            data.acquirer.company_name, data.target.company_name
        ),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "overview": "/api/ma/overview",
            "financials": "/api/ma/financials",
            "dcf": "/api/ma/dcf",
            "comps": "/api/ma/comparable-companies",
            "precedents": "/api/ma/precedent-transactions",
            "synergies": "/api/ma/synergies",
            "accretion": "/api/ma/accretion-dilution",
            "valuation": "/api/ma/valuation-summary",
            "executive": "/api/ma/executive-summary"
        }
    }))
}

/// # GET /api/ma/overview
pub async fn get_overview(State(state): State<Arc<AppState>>) -> Json<CompanyOverview> {
    Json(state.analyzer.company_overview())
}

/// # GET /api/ma/financials
pub async fn get_financials(State(state): State<Arc<AppState>>) -> Json<FinancialStatements> {
    Json(state.analyzer.financial_statements())
}

/// # GET /api/ma/dcf?company=target|acquirer
/// Anything other than `target` values the acquirer; a missing parameter values the target.
pub async fn get_dcf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DcfQuery>,
) -> Result<Json<DcfAnalysis>, AppError> {
    let selector = query
        .company
        .as_deref()
        .map(CompanySelector::from_param)
        .unwrap_or_default();
    Ok(Json(state.analyzer.dcf_valuation(selector)?))
}

/// # GET /api/ma/comparable-companies
pub async fn get_comparable_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ComparableCompaniesAnalysis>, AppError> {
    Ok(Json(state.analyzer.comparable_companies_analysis()?))
}

/// # GET /api/ma/precedent-transactions
pub async fn get_precedent_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecedentTransactionsAnalysis>, AppError> {
    Ok(Json(state.analyzer.precedent_transactions_analysis()?))
}

/// # GET /api/ma/synergies
pub async fn get_synergies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SynergyAnalysis>, AppError> {
    Ok(Json(state.analyzer.synergies()?))
}

/// # GET /api/ma/accretion-dilution
pub async fn get_accretion_dilution(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccretionDilutionAnalysis>, AppError> {
    Ok(Json(state.analyzer.accretion_dilution()?))
}

/// # GET /api/ma/valuation-summary
pub async fn get_valuation_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ValuationSummary>, AppError> {
    Ok(Json(state.analyzer.valuation_summary()?))
}

/// # GET /api/ma/executive-summary
pub async fn get_executive_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExecutiveSummary>, AppError> {
    Ok(Json(state.analyzer.executive_summary()?))
}

/// # POST /api/status
/// Records a client ping with a fresh id and the current UTC time.
pub async fn create_status_check(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    let check = StatusCheck::from(input);
    state.status_store.insert(&check).await?;
    tracing::info!(id = %check.id, client = %check.client_name, "Status check recorded.");
    Ok(Json(check))
}

/// # GET /api/status
pub async fn list_status_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    Ok(Json(state.status_store.list().await?))
}
