use analyzer::MaAnalyzer;
use configuration::{DealAssumptions, load_deal_assumptions, load_reference_data};
use core_types::CompanySelector;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn reference_analyzer() -> MaAnalyzer {
    let data = load_reference_data().expect("bundled reference data loads");
    MaAnalyzer::new(Arc::new(data), DealAssumptions::default())
}

#[test]
fn reports_are_deterministic() {
    let analyzer = reference_analyzer();

    let first = serde_json::to_value(analyzer.executive_summary().unwrap()).unwrap();
    let second = serde_json::to_value(analyzer.executive_summary().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_uses_the_published_keys() {
    let analyzer = reference_analyzer();

    let comps = serde_json::to_value(analyzer.comparable_companies_analysis().unwrap()).unwrap();
    let ev_revenue = &comps["multiples_analysis"]["ev_revenue"];
    assert!(ev_revenue.get("25th_percentile").is_some());
    assert!(ev_revenue.get("75th_percentile").is_some());

    let synergies = serde_json::to_value(analyzer.synergies().unwrap()).unwrap();
    let timeline: Vec<&String> = synergies["synergy_realization_timeline"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(timeline.len(), 3);
    assert!(synergies["synergy_realization_timeline"].get("Year 3+").is_some());

    let dcf = serde_json::to_value(analyzer.dcf_valuation(CompanySelector::Acquirer).unwrap()).unwrap();
    assert_eq!(dcf["company"], "acquirer");
    assert_eq!(dcf["projections"]["years"][0], 2025);
}

#[test]
fn weighted_value_sits_between_the_methods() {
    let summary = reference_analyzer().valuation_summary().unwrap();
    let methods = &summary.valuation_methods;

    let lowest = methods.dcf.min(methods.comparable_companies).min(methods.precedent_transactions);
    let highest = methods.dcf.max(methods.comparable_companies).max(methods.precedent_transactions);
    assert!(methods.weighted_average > lowest);
    assert!(methods.weighted_average < highest);
    assert!(summary.valuation_range.low < summary.valuation_range.high);
}

#[test]
fn deal_file_overrides_only_what_it_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deal.toml");
    std::fs::write(
        &path,
        "[structure]\ncash_percent = 0.5\nstock_percent = 0.5\n",
    )
    .unwrap();

    let assumptions = load_deal_assumptions(Some(&path)).unwrap();
    assert_eq!(assumptions.structure.total_consideration, dec!(165000));
    assert_eq!(assumptions.dcf, DealAssumptions::default().dcf);

    let data = load_reference_data().unwrap();
    let analyzer = MaAnalyzer::new(Arc::new(data), assumptions);
    let accretion = analyzer.accretion_dilution().unwrap();
    let baseline = reference_analyzer().accretion_dilution().unwrap();

    assert_eq!(accretion.deal_structure.stock_component, dec!(82500));
    assert!(accretion.deal_structure.new_shares_issued > baseline.deal_structure.new_shares_issued);
    assert!(accretion.accretion_dilution_percent < baseline.accretion_dilution_percent);

    let summary = analyzer.executive_summary().unwrap();
    assert_eq!(summary.transaction_overview.structure, "50% Cash / 50% Stock");
}

#[test]
fn invalid_deal_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deal.toml");
    std::fs::write(&path, "[valuation]\ndcf_weight = 0.9\n").unwrap();

    assert!(load_deal_assumptions(Some(&path)).is_err());
}

#[test]
fn higher_growth_raises_the_dcf() {
    let data = Arc::new(load_reference_data().unwrap());
    let mut assumptions = DealAssumptions::default();
    assumptions.dcf.growth_rates = vec![dec!(0.25); 5];

    let boosted = MaAnalyzer::new(data.clone(), assumptions)
        .dcf_valuation(CompanySelector::Target)
        .unwrap();
    let baseline = MaAnalyzer::new(data, DealAssumptions::default())
        .dcf_valuation(CompanySelector::Target)
        .unwrap();

    assert!(boosted.valuation.enterprise_value > baseline.valuation.enterprise_value);
    assert!(boosted.valuation.value_per_share > Decimal::ZERO);
}
