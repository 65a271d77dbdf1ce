mod common;

use bankability_core::params::{CreditRating, OfftakeType, ProjectParameters};
use bankability_core::scoring::{score, Grade, ScoreCategory, WEIGHTS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn close(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() < tolerance
}

// ===========================================================================
// Reference projects
// ===========================================================================

#[test]
fn test_solar_is_investment_grade() {
    let result = score(&common::solar());

    assert!(
        close(result.overall_score, dec!(89.15), dec!(0.01)),
        "overall {}",
        result.overall_score
    );
    assert_eq!(result.grade, Grade::InvestmentGrade);
    assert_eq!(result.grade_label, "Strong bankability");
    assert_eq!(result.grade_color, "#1a7a3a");

    let expected = [
        (ScoreCategory::Technology, dec!(100)),
        (ScoreCategory::Financial, dec!(90)),
        (ScoreCategory::Credit, dec!(80.25)),
        (ScoreCategory::Structure, dec!(97.5)),
        (ScoreCategory::Market, dec!(74)),
    ];
    for (category, value) in expected {
        let sub = result.sub_score(category).unwrap();
        assert!(close(sub.score, value, dec!(0.01)), "{category}: {}", sub.score);
    }
}

#[test]
fn test_solar_narrative() {
    let result = score(&common::solar());

    assert_eq!(result.strengths.len(), 8);
    assert_eq!(
        result.strengths[0],
        "Strong technology & performance profile (score: 100/100)."
    );
    assert!(result
        .strengths
        .contains(&"Debt coverage of 1.77x exceeds typical lender minimums.".to_string()));
    assert!(result
        .strengths
        .contains(&"Project returns (11.0% IRR) support equity investment.".to_string()));
    assert!(result.weaknesses.is_empty());

    // strong coverage leaves only the program pointers
    assert_eq!(result.recommendations.len(), 2);
    assert!(result.recommendations[0].starts_with("Project appears eligible for USDA RUS"));
    assert!(result.recommendations[1].starts_with("Project may qualify for DOE LPO"));
}

#[test]
fn test_solar_program_screens() {
    let result = score(&common::solar());
    assert!(result.rus_eligibility.eligible);
    assert!(result.lpo_eligibility.eligible);
}

#[test]
fn test_storage_is_near_investment_grade() {
    let result = score(&common::storage());
    assert!(
        close(result.overall_score, dec!(78.0444), dec!(0.01)),
        "overall {}",
        result.overall_score
    );
    assert_eq!(result.grade, Grade::NearInvestmentGrade);
    assert!(!result.rus_eligibility.eligible);
    assert!(result.recommendations[0].starts_with("Commission an independent resource assessment"));
}

#[test]
fn test_wind_financial_drag() {
    let result = score(&common::wind());
    assert!(close(result.overall_score, dec!(79.40), dec!(0.01)));
    assert_eq!(result.grade, Grade::NearInvestmentGrade);
    let financial = result.sub_score(ScoreCategory::Financial).unwrap();
    assert!(close(financial.score, dec!(51), dec!(0.01)));
    // IPPs cannot borrow from RUS even in rural areas
    assert!(!result.rus_eligibility.eligible);
}

// ===========================================================================
// Directional behaviour
// ===========================================================================

#[test]
fn test_poorly_structured_project_scores_lower() {
    let base = common::solar();
    let mut poor = base.clone();
    poor.financial.debt_percent = dec!(0.95);
    poor.financial.equity_percent = dec!(0.05);
    poor.financial.interest_rate = dec!(0.12);
    poor.credit.offtake_type = OfftakeType::Merchant;
    poor.credit.offtaker_credit_rating = CreditRating::B;

    let base_result = score(&base);
    let poor_result = score(&poor);

    assert!(poor_result.overall_score < base_result.overall_score);
    assert!(close(poor_result.overall_score, dec!(76.55), dec!(0.01)));
    assert!(close(
        poor_result.financial_summary.minimum_dscr,
        dec!(0.8162),
        dec!(0.0001)
    ));
    assert!(!poor_result.weaknesses.is_empty());
}

#[test]
fn test_default_scenario_clears_bankability_floor() {
    let mut p = ProjectParameters::default();
    p.technical.nameplate_capacity_mw = dec!(100);
    p.technical.annual_generation_mwh = dec!(236_520);
    p.technical.capacity_factor = dec!(0.27);
    p.financial.total_project_cost = dec!(105_000_000);
    p.financial.total_hard_costs = dec!(84_000_000);
    p.financial.annual_revenue = dec!(13_000_000);
    p.financial.annual_opex = dec!(2_100_000);
    p.credit.offtake_tenor_years = 20;

    let result = score(&p);
    assert!(result.overall_score >= dec!(65));
    assert!(result.financial_summary.minimum_dscr > Decimal::ONE);
}

#[test]
fn test_rus_requires_rural_location() {
    let mut p = common::solar();
    p.is_rural = false;
    assert!(!score(&p).rus_eligibility.eligible);
}

#[test]
fn test_weights_sum_to_one() {
    let total: Decimal = WEIGHTS.iter().map(|(_, w)| *w).sum();
    assert_eq!(total, Decimal::ONE);
}

// ===========================================================================
// Bounds over arbitrary inputs
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_overall_score_is_bounded(
        capacity in 0u64..2_000,
        generation in 0u64..5_000_000,
        cost in 0u64..2_000_000_000,
        revenue in 0u64..300_000_000,
        opex in 0u64..100_000_000,
        debt_pct in 0u32..=100,
        rate_bps in 0u32..1_500,
        rural in any::<bool>(),
    ) {
        let mut p = ProjectParameters::default();
        p.is_rural = rural;
        p.technical.nameplate_capacity_mw = Decimal::from(capacity);
        p.technical.annual_generation_mwh = Decimal::from(generation);
        p.financial.total_project_cost = Decimal::from(cost);
        p.financial.total_hard_costs = Decimal::from(cost) * dec!(0.8);
        p.financial.annual_revenue = Decimal::from(revenue);
        p.financial.annual_opex = Decimal::from(opex);
        p.financial.debt_percent = Decimal::new(debt_pct as i64, 2);
        p.financial.equity_percent = Decimal::ONE - p.financial.debt_percent;
        p.financial.interest_rate = Decimal::new(rate_bps as i64, 4);

        let result = score(&p);
        prop_assert!(result.overall_score >= Decimal::ZERO);
        prop_assert!(result.overall_score <= dec!(100));
        for sub in &result.sub_scores {
            prop_assert!(sub.score >= Decimal::ZERO && sub.score <= dec!(100));
        }
        prop_assert_eq!(result.grade, Grade::from_score(result.overall_score));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_long_escalating_projects_stay_bounded(
        life in 1u32..=100,
        revenue_escalation_bps in 0u32..=10_000,
        opex_escalation_bps in 0u32..=10_000,
        degradation_bps in 0u32..=10_000,
        discount_bps in 0u32..=10_000,
    ) {
        let mut p = common::solar();
        p.technical.expected_useful_life_years = life;
        p.technical.degradation_rate_annual = Decimal::new(degradation_bps as i64, 4);
        p.financial.revenue_escalation = Decimal::new(revenue_escalation_bps as i64, 4);
        p.financial.annual_opex_escalation = Decimal::new(opex_escalation_bps as i64, 4);
        p.financial.discount_rate = Decimal::new(discount_bps as i64, 4);

        let result = score(&p);
        prop_assert!(result.overall_score >= Decimal::ZERO);
        prop_assert!(result.overall_score <= dec!(100));
        for sub in &result.sub_scores {
            prop_assert!(sub.score >= Decimal::ZERO && sub.score <= dec!(100));
        }
    }
}
