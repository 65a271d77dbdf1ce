mod common;

use bankability_core::credit::{assess, RiskCategory, Severity};
use bankability_core::params::{CreditRating, OfftakeType};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference projects
// ===========================================================================

#[test]
fn test_solar_credit_profile() {
    let ca = assess(&common::solar());

    assert_eq!(ca.probability_of_default, dec!(0.002114035));
    assert_eq!(ca.loss_given_default, dec!(0.19509336));
    assert_eq!(ca.exposure_at_default, dec!(73_500_000));
    assert!((ca.expected_loss - dec!(30_313.91)).abs() < dec!(0.01));
    assert_eq!(ca.credit_rating_equivalent, CreditRating::A);
    assert_eq!(ca.risk_category, RiskCategory::Low);
    assert_eq!(ca.credit_spread_bps, 100);
    assert_eq!(ca.counterparty_risk_score, dec!(72));
    assert_eq!(ca.structural_risk_score, dec!(97.5));
    assert_eq!(ca.market_risk_score, dec!(74));
    assert_eq!(ca.overall_credit_score, dec!(80.25));
}

#[test]
fn test_solar_factors_and_mitigants() {
    let ca = assess(&common::solar());

    let factors: Vec<&str> = ca.risk_factors.iter().map(|f| f.factor.as_str()).collect();
    assert_eq!(factors, vec!["Revenue concentration"]);
    assert_eq!(ca.risk_factors[0].severity, Severity::Medium);

    let mitigants: Vec<&str> = ca.mitigants.iter().map(|m| m.mitigant.as_str()).collect();
    assert_eq!(
        mitigants,
        vec![
            "Contracted revenue stream",
            "Fixed-price turnkey EPC",
            "Performance guarantee",
            "Completion guarantee",
            "Funded reserve accounts",
            "Comprehensive insurance",
            "Credit support",
            "Strong debt service coverage",
        ]
    );
}

#[test]
fn test_storage_credit_profile() {
    let ca = assess(&common::storage());

    assert_eq!(ca.probability_of_default, dec!(0.00092775375));
    assert_eq!(ca.loss_given_default, dec!(0.1967328));
    assert!((ca.expected_loss - dec!(7_118.26)).abs() < dec!(0.01));
    assert_eq!(ca.credit_rating_equivalent, CreditRating::AaMinus);
    assert_eq!(ca.risk_category, RiskCategory::Minimal);
    assert_eq!(ca.credit_spread_bps, 65);
    assert_eq!(ca.counterparty_risk_score, dec!(61.5));
    assert_eq!(ca.overall_credit_score, dec!(76.35));
}

#[test]
fn test_wind_credit_profile() {
    let ca = assess(&common::wind());

    assert_eq!(ca.probability_of_default, dec!(0.0007868025));
    assert_eq!(ca.loss_given_default, dec!(0.25083432));
    assert_eq!(ca.credit_rating_equivalent, CreditRating::AaMinus);
    assert_eq!(ca.credit_spread_bps, 65);
    assert_eq!(ca.overall_credit_score, dec!(81.75));
}

// ===========================================================================
// PD direction
// ===========================================================================

#[test]
fn test_weaker_coverage_raises_pd() {
    let base = common::solar();
    let mut stressed = base.clone();
    stressed.financial.interest_rate = dec!(0.12);
    assert!(assess(&stressed).probability_of_default > assess(&base).probability_of_default);
}

#[test]
fn test_lower_rating_raises_pd() {
    let base = common::solar();
    let mut downgraded = base.clone();
    downgraded.credit.offtaker_credit_rating = CreditRating::B;
    assert!(assess(&downgraded).probability_of_default > assess(&base).probability_of_default);
}

#[test]
fn test_merchant_offtake_raises_pd() {
    let base = common::solar();
    let mut merchant = base.clone();
    merchant.credit.offtake_type = OfftakeType::Merchant;

    let ca = assess(&merchant);
    assert!(ca.probability_of_default > assess(&base).probability_of_default);
    assert!(ca
        .risk_factors
        .iter()
        .any(|f| f.factor == "Merchant exposure" && f.severity == Severity::High));
}
