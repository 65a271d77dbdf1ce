//! Techno-economic benchmarking: installed cost, fixed O&M, performance and
//! unit economics against representative market ranges.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::display::percent;
use crate::params::{ProjectParameters, TechnologyType};
use crate::types::{Money, Rate};

const HOURS_PER_YEAR: Decimal = dec!(8760);
const KW_PER_MW: Decimal = dec!(1000);

// ---------------------------------------------------------------------------
// Benchmark tables
// ---------------------------------------------------------------------------

/// Low / mid / high market range for a cost metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBand {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
}

const fn band(low: Decimal, mid: Decimal, high: Decimal) -> CostBand {
    CostBand { low, mid, high }
}

/// Installed cost, $/kW ($/kVA for substations).
pub fn capital_cost_benchmark(technology: TechnologyType) -> CostBand {
    use TechnologyType::*;
    match technology {
        SolarPv => band(dec!(800), dec!(1050), dec!(1400)),
        OnshoreWind => band(dec!(1100), dec!(1400), dec!(1800)),
        OffshoreWind => band(dec!(2800), dec!(3500), dec!(4500)),
        BatteryStorage => band(dec!(800), dec!(1200), dec!(1800)),
        SolarPlusStorage => band(dec!(1400), dec!(1900), dec!(2600)),
        TransmissionLine => band(dec!(1500), dec!(2500), dec!(4000)),
        DistributionUpgrade => band(dec!(500), dec!(1000), dec!(2000)),
        Substation => band(dec!(80), dec!(150), dec!(300)),
        HydroSmall | Microgrids => band(dec!(2000), dec!(3500), dec!(6000)),
        Geothermal => band(dec!(2500), dec!(4000), dec!(6500)),
        Biomass => band(dec!(2000), dec!(3500), dec!(5000)),
        NaturalGasPeaker => band(dec!(600), dec!(900), dec!(1300)),
        CombinedCycle => band(dec!(800), dec!(1100), dec!(1500)),
        GridModernization => band(dec!(500), dec!(1500), dec!(3000)),
        Other => band(dec!(1000), dec!(2000), dec!(3000)),
    }
}

/// Fixed O&M, $/kW-year.
pub fn om_cost_benchmark(technology: TechnologyType) -> CostBand {
    use TechnologyType::*;
    match technology {
        SolarPv => band(dec!(8), dec!(14), dec!(22)),
        OnshoreWind => band(dec!(25), dec!(38), dec!(55)),
        OffshoreWind => band(dec!(60), dec!(90), dec!(130)),
        BatteryStorage => band(dec!(6), dec!(12), dec!(20)),
        SolarPlusStorage => band(dec!(14), dec!(22), dec!(35)),
        HydroSmall => band(dec!(20), dec!(40), dec!(65)),
        Geothermal => band(dec!(30), dec!(50), dec!(80)),
        Biomass => band(dec!(50), dec!(80), dec!(120)),
        NaturalGasPeaker => band(dec!(10), dec!(18), dec!(30)),
        CombinedCycle => band(dec!(12), dec!(20), dec!(35)),
        _ => band(dec!(10), dec!(25), dec!(50)),
    }
}

/// Capacity factor percentiles as `(p10, p50, p90)`.
pub fn capacity_factor_range(technology: TechnologyType) -> (Rate, Rate, Rate) {
    use TechnologyType::*;
    match technology {
        SolarPv => (dec!(0.15), dec!(0.22), dec!(0.30)),
        OnshoreWind => (dec!(0.25), dec!(0.33), dec!(0.45)),
        OffshoreWind => (dec!(0.35), dec!(0.42), dec!(0.52)),
        BatteryStorage => (dec!(0.10), dec!(0.15), dec!(0.25)),
        HydroSmall => (dec!(0.30), dec!(0.42), dec!(0.55)),
        Geothermal => (dec!(0.80), dec!(0.88), dec!(0.93)),
        CombinedCycle => (dec!(0.40), dec!(0.55), dec!(0.70)),
        _ => (dec!(0.15), dec!(0.30), dec!(0.50)),
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalCostAssessment {
    Favorable,
    Competitive,
    Acceptable,
    Elevated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingCostAssessment {
    BelowBenchmark,
    Competitive,
    AboveAverage,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalCostAnalysis {
    pub cost_per_kw: Money,
    pub benchmark_low: Money,
    pub benchmark_mid: Money,
    pub benchmark_high: Money,
    pub position: String,
    pub assessment: CapitalCostAssessment,
    /// Hard costs as a percent of total cost
    pub hard_cost_ratio: Decimal,
    pub contingency_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCostAnalysis {
    pub om_per_kw_year: Money,
    pub benchmark_low: Money,
    pub benchmark_mid: Money,
    pub benchmark_high: Money,
    pub assessment: OperatingCostAssessment,
    /// Percent
    pub opex_to_revenue_ratio: Decimal,
    /// Display string, e.g. "2.5%"
    pub annual_escalation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub implied_capacity_factor: Rate,
    pub stated_capacity_factor: Rate,
    pub cf_benchmark_p10: Rate,
    pub cf_benchmark_p50: Rate,
    pub cf_benchmark_p90: Rate,
    pub availability_factor: Rate,
    pub annual_generation_mwh: Decimal,
    pub lifetime_generation_mwh: Decimal,
    /// Output at end of life relative to year one
    pub end_of_life_output_ratio: Rate,
    pub degradation_rate: String,
    pub technology_readiness_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCompetitiveness {
    pub revenue_per_mwh: Money,
    pub cost_per_mwh: Money,
    pub margin_per_mwh: Money,
    /// Total cost per MWh of annual generation
    pub capital_intensity: Money,
    /// Percent
    pub operating_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnoEconomicAnalysis {
    pub capital_cost_analysis: CapitalCostAnalysis,
    pub operating_cost_analysis: OperatingCostAnalysis,
    pub performance_analysis: PerformanceAnalysis,
    pub cost_competitiveness: CostCompetitiveness,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

pub fn analyze(params: &ProjectParameters) -> TechnoEconomicAnalysis {
    let analysis = TechnoEconomicAnalysis {
        capital_cost_analysis: capital_costs(params),
        operating_cost_analysis: operating_costs(params),
        performance_analysis: performance(params),
        cost_competitiveness: cost_competitiveness(params),
    };
    debug!(
        project = %params.project_name,
        cost_per_kw = %analysis.capital_cost_analysis.cost_per_kw,
        "techno-economic analysis complete"
    );
    analysis
}

/// `numerator / denominator`, zero when the denominator is not positive.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

fn capacity_kw(params: &ProjectParameters) -> Decimal {
    params.technical.nameplate_capacity_mw * KW_PER_MW
}

pub fn capital_costs(params: &ProjectParameters) -> CapitalCostAnalysis {
    let fp = &params.financial;
    let bench = capital_cost_benchmark(params.technical.technology_type);
    let cost_per_kw = ratio(fp.total_project_cost, capacity_kw(params));

    let (position, assessment) = if cost_per_kw <= bench.low {
        ("Below market low", CapitalCostAssessment::Favorable)
    } else if cost_per_kw <= bench.mid {
        ("Below market midpoint", CapitalCostAssessment::Competitive)
    } else if cost_per_kw <= bench.high {
        ("Above market midpoint", CapitalCostAssessment::Acceptable)
    } else {
        ("Above market high", CapitalCostAssessment::Elevated)
    };

    CapitalCostAnalysis {
        cost_per_kw: cost_per_kw.round_dp(0),
        benchmark_low: bench.low,
        benchmark_mid: bench.mid,
        benchmark_high: bench.high,
        position: position.into(),
        assessment,
        hard_cost_ratio: (ratio(fp.total_hard_costs, fp.total_project_cost) * dec!(100))
            .round_dp(1),
        contingency_amount: (fp.total_project_cost * fp.contingency_percent).round_dp(0),
    }
}

pub fn operating_costs(params: &ProjectParameters) -> OperatingCostAnalysis {
    let fp = &params.financial;
    let bench = om_cost_benchmark(params.technical.technology_type);
    let om_per_kw = ratio(fp.annual_opex, capacity_kw(params));

    let assessment = if om_per_kw <= bench.low {
        OperatingCostAssessment::BelowBenchmark
    } else if om_per_kw <= bench.mid {
        OperatingCostAssessment::Competitive
    } else if om_per_kw <= bench.high {
        OperatingCostAssessment::AboveAverage
    } else {
        OperatingCostAssessment::High
    };

    OperatingCostAnalysis {
        om_per_kw_year: om_per_kw.round_dp(2),
        benchmark_low: bench.low,
        benchmark_mid: bench.mid,
        benchmark_high: bench.high,
        assessment,
        opex_to_revenue_ratio: (ratio(fp.annual_opex, fp.annual_revenue) * dec!(100)).round_dp(1),
        annual_escalation: percent(fp.annual_opex_escalation, 1),
    }
}

pub fn performance(params: &ProjectParameters) -> PerformanceAnalysis {
    let tp = &params.technical;
    let implied_cf =
        if tp.nameplate_capacity_mw > Decimal::ZERO && tp.annual_generation_mwh > Decimal::ZERO {
            tp.annual_generation_mwh / (tp.nameplate_capacity_mw * HOURS_PER_YEAR)
        } else {
            tp.capacity_factor
        };
    let (p10, p50, p90) = capacity_factor_range(tp.technology_type);

    // ── Degradation over life ────────────────────────────────────────
    let retention = Decimal::ONE - tp.degradation_rate_annual;
    let mut factor = Decimal::ONE;
    let mut lifetime_generation = Decimal::ZERO;
    for _ in 0..tp.expected_useful_life_years {
        lifetime_generation += tp.annual_generation_mwh * factor;
        factor *= retention;
    }

    PerformanceAnalysis {
        implied_capacity_factor: implied_cf.round_dp(3),
        stated_capacity_factor: tp.capacity_factor.round_dp(3),
        cf_benchmark_p10: p10,
        cf_benchmark_p50: p50,
        cf_benchmark_p90: p90,
        availability_factor: tp.availability_factor.round_dp(3),
        annual_generation_mwh: tp.annual_generation_mwh.round_dp(0),
        lifetime_generation_mwh: lifetime_generation.round_dp(0),
        end_of_life_output_ratio: factor.round_dp(3),
        degradation_rate: percent(tp.degradation_rate_annual, 2),
        technology_readiness_level: tp.technology_readiness_level,
    }
}

pub fn cost_competitiveness(params: &ProjectParameters) -> CostCompetitiveness {
    let fp = &params.financial;
    let generation = params.technical.annual_generation_mwh;
    let revenue_per_mwh = ratio(fp.annual_revenue, generation);
    let cost_per_mwh = ratio(fp.annual_opex, generation);

    CostCompetitiveness {
        revenue_per_mwh: revenue_per_mwh.round_dp(2),
        cost_per_mwh: cost_per_mwh.round_dp(2),
        margin_per_mwh: (revenue_per_mwh - cost_per_mwh).round_dp(2),
        capital_intensity: ratio(fp.total_project_cost, generation).round_dp(0),
        operating_margin: (ratio(fp.annual_revenue - fp.annual_opex, fp.annual_revenue)
            * dec!(100))
        .round_dp(1),
    }
}
