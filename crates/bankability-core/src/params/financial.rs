use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::annuity_payment;
use crate::types::{Coverage, Money, Rate};

/// Tax depreciation method applied to hard costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum DepreciationSchedule {
    /// 5-year MACRS; also used for unrecognized method names
    #[default]
    #[serde(rename = "macrs_5")]
    Macrs5,
    #[serde(rename = "macrs_7")]
    Macrs7,
    #[serde(rename = "straight_line")]
    StraightLine,
}

impl From<String> for DepreciationSchedule {
    fn from(name: String) -> Self {
        match name.as_str() {
            "macrs_7" => DepreciationSchedule::Macrs7,
            "straight_line" => DepreciationSchedule::StraightLine,
            _ => DepreciationSchedule::Macrs5,
        }
    }
}

const MACRS_5: [Rate; 6] = [
    dec!(0.20),
    dec!(0.32),
    dec!(0.192),
    dec!(0.1152),
    dec!(0.1152),
    dec!(0.0576),
];

const MACRS_7: [Rate; 8] = [
    dec!(0.1429),
    dec!(0.2449),
    dec!(0.1749),
    dec!(0.1249),
    dec!(0.0893),
    dec!(0.0892),
    dec!(0.0893),
    dec!(0.0446),
];

impl DepreciationSchedule {
    /// Fraction of depreciable basis taken in each year, year 1 first.
    pub fn fractions(&self, useful_life_years: u32) -> Vec<Rate> {
        match self {
            DepreciationSchedule::Macrs5 => MACRS_5.to_vec(),
            DepreciationSchedule::Macrs7 => MACRS_7.to_vec(),
            DepreciationSchedule::StraightLine if useful_life_years > 0 => {
                let annual = Decimal::ONE / Decimal::from(useful_life_years);
                vec![annual; useful_life_years as usize]
            }
            DepreciationSchedule::StraightLine => Vec::new(),
        }
    }
}

/// Capital cost, capital structure, operating economics and tax inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialParameters {
    pub total_project_cost: Money,
    /// Depreciable basis
    pub total_hard_costs: Money,
    pub total_soft_costs: Money,
    pub contingency_percent: Rate,
    pub construction_period_months: u32,
    /// Debt share of total cost; debt + equity should sum to 1
    pub debt_percent: Rate,
    pub equity_percent: Rate,
    pub interest_rate: Rate,
    pub debt_tenor_years: u32,
    pub target_dscr: Decimal,
    /// Year-1 revenue before escalation
    pub annual_revenue: Money,
    /// Year-1 operating cost before escalation
    pub annual_opex: Money,
    pub annual_opex_escalation: Rate,
    pub revenue_escalation: Rate,
    pub tax_rate: Rate,
    /// Investment tax credit as a fraction of total cost
    pub itc_percent: Rate,
    /// Production tax credit in $/MWh for the first ten years
    pub ptc_per_mwh: Money,
    pub depreciation_schedule: DepreciationSchedule,
    pub discount_rate: Rate,
}

impl Default for FinancialParameters {
    fn default() -> Self {
        Self {
            total_project_cost: Decimal::ZERO,
            total_hard_costs: Decimal::ZERO,
            total_soft_costs: Decimal::ZERO,
            contingency_percent: dec!(0.10),
            construction_period_months: 24,
            debt_percent: dec!(0.70),
            equity_percent: dec!(0.30),
            interest_rate: dec!(0.055),
            debt_tenor_years: 20,
            target_dscr: dec!(1.40),
            annual_revenue: Decimal::ZERO,
            annual_opex: Decimal::ZERO,
            annual_opex_escalation: dec!(0.025),
            revenue_escalation: dec!(0.02),
            tax_rate: dec!(0.21),
            itc_percent: Decimal::ZERO,
            ptc_per_mwh: Decimal::ZERO,
            depreciation_schedule: DepreciationSchedule::Macrs5,
            discount_rate: dec!(0.08),
        }
    }
}

impl FinancialParameters {
    pub fn debt_amount(&self) -> Money {
        self.total_project_cost * self.debt_percent
    }

    pub fn equity_amount(&self) -> Money {
        self.total_project_cost * self.equity_percent
    }

    /// Level annuity payment on the senior debt.
    pub fn annual_debt_service(&self) -> Money {
        annuity_payment(self.debt_amount(), self.interest_rate, self.debt_tenor_years)
    }

    /// Year-1 NOI, before escalation.
    pub fn net_operating_income(&self) -> Money {
        self.annual_revenue - self.annual_opex
    }

    /// Year-1 NOI over the level debt service; unbounded without debt.
    pub fn dscr(&self) -> Coverage {
        let ads = self.annual_debt_service();
        if ads <= Decimal::ZERO {
            Coverage::Unbounded
        } else {
            Coverage::Finite(self.net_operating_income() / ads)
        }
    }

    pub fn leverage_ratio(&self) -> Rate {
        if self.total_project_cost <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.debt_amount() / self.total_project_cost
    }
}
