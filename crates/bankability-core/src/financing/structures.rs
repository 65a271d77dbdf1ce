//! Financing structure templates, eligibility, fit ranking and indicative
//! term sheets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProgramConfig;
use crate::display::{fixed, money, title_case};
use crate::params::{EntityType, ProjectParameters};
use crate::rubrics::cap;
use crate::types::{Money, Multiple, Rate, Score};

const BASE_FIT: Score = dec!(50);
const LEVERAGE_FIT_BAND: Rate = dec!(0.10);
/// Share of the DSCR minimum that still earns partial fit credit.
const NEAR_DSCR: Decimal = dec!(0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    ProjectFinance,
    UtilityCorporate,
    RusDirect,
    RusGuaranteed,
    DoeLpo,
    TaxEquity,
    MunicipalBond,
}

impl StructureKind {
    pub fn is_rus(&self) -> bool {
        matches!(self, StructureKind::RusDirect | StructureKind::RusGuaranteed)
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureTemplate {
    pub kind: StructureKind,
    pub name: String,
    pub description: String,
    pub typical_leverage: Rate,
    pub typical_tenor: u32,
    pub typical_dscr_min: Multiple,
    pub typical_spread_bps: u32,
    pub suitable_for: Vec<EntityType>,
    pub min_project_size: Money,
    pub requires_rural: bool,
    pub requires_tax_credits: bool,
}

/// The seven templates, in presentation order. Federal program tenor,
/// leverage and size limits come from `programs`.
pub fn templates(programs: &ProgramConfig) -> Vec<StructureTemplate> {
    use EntityType::*;

    let rus = |kind, name: &str, description: &str, spread| StructureTemplate {
        kind,
        name: name.into(),
        description: description.into(),
        typical_leverage: dec!(0.80),
        typical_tenor: programs.rus_max_term_years,
        typical_dscr_min: programs.rus_min_dscr,
        typical_spread_bps: spread,
        suitable_for: vec![Cooperative, MunicipalUtility, TribalUtility],
        min_project_size: Decimal::ZERO,
        requires_rural: true,
        requires_tax_credits: false,
    };

    vec![
        StructureTemplate {
            kind: StructureKind::ProjectFinance,
            name: "Non-Recourse Project Finance".into(),
            description: "Standard project finance structure with ring-fenced project company, \
                          non-recourse senior debt secured by project assets and cash flows, \
                          and sponsor equity."
                .into(),
            typical_leverage: dec!(0.70),
            typical_tenor: 18,
            typical_dscr_min: dec!(1.30),
            typical_spread_bps: 200,
            suitable_for: vec![IndependentPowerProducer, CommunityChoiceAggregator],
            min_project_size: dec!(25_000_000),
            requires_rural: false,
            requires_tax_credits: false,
        },
        StructureTemplate {
            kind: StructureKind::UtilityCorporate,
            name: "Utility Corporate Finance".into(),
            description: "On-balance-sheet financing by the utility borrower, secured by the \
                          utility's general credit and revenue stream rather than ring-fenced \
                          project assets."
                .into(),
            typical_leverage: dec!(0.55),
            typical_tenor: 20,
            typical_dscr_min: dec!(1.20),
            typical_spread_bps: 150,
            suitable_for: vec![InvestorOwnedUtility, MunicipalUtility, Cooperative],
            min_project_size: Decimal::ZERO,
            requires_rural: false,
            requires_tax_credits: false,
        },
        rus(
            StructureKind::RusDirect,
            "USDA RUS Direct Loan",
            "Direct federal loan from the Rural Utilities Service at Treasury rate plus a small \
             spread. Available to eligible rural electric cooperatives, municipal utilities, and \
             tribal entities.",
            25,
        ),
        rus(
            StructureKind::RusGuaranteed,
            "USDA RUS Loan Guarantee",
            "Federal guarantee on private-sector loans arranged through the Federal Financing \
             Bank or commercial lenders. Reduces borrowing costs through the government \
             guarantee.",
            50,
        ),
        StructureTemplate {
            kind: StructureKind::DoeLpo,
            name: "DOE LPO Title XVII Loan Guarantee".into(),
            description: "Federal loan guarantee for innovative energy projects under Title XVII \
                          of the Energy Policy Act. Covers up to 80% of project costs with long \
                          tenors and competitive rates."
                .into(),
            typical_leverage: programs.lpo_max_guarantee_pct,
            typical_tenor: 30,
            typical_dscr_min: programs.lpo_min_dscr,
            typical_spread_bps: 75,
            suitable_for: vec![IndependentPowerProducer, InvestorOwnedUtility, Cooperative],
            min_project_size: programs.lpo_min_project_cost,
            requires_rural: false,
            requires_tax_credits: false,
        },
        StructureTemplate {
            kind: StructureKind::TaxEquity,
            name: "Tax Equity Partnership Flip".into(),
            description: "Partnership structure where a tax equity investor receives the \
                          majority of tax benefits (ITC/PTC, MACRS depreciation) in exchange for \
                          upfront capital, with allocation ratios flipping after a target return \
                          is achieved."
                .into(),
            typical_leverage: dec!(0.40),
            typical_tenor: 10,
            typical_dscr_min: dec!(1.00),
            typical_spread_bps: 0,
            suitable_for: vec![IndependentPowerProducer],
            min_project_size: dec!(10_000_000),
            requires_rural: false,
            requires_tax_credits: true,
        },
        StructureTemplate {
            kind: StructureKind::MunicipalBond,
            name: "Tax-Exempt Municipal Revenue Bonds".into(),
            description: "Tax-exempt bonds issued by a municipal entity or authority, secured by \
                          project revenues. Lower cost of capital due to tax-exempt interest for \
                          bondholders."
                .into(),
            typical_leverage: dec!(0.75),
            typical_tenor: 30,
            typical_dscr_min: dec!(1.25),
            typical_spread_bps: 100,
            suitable_for: vec![MunicipalUtility, StateAuthority],
            min_project_size: dec!(10_000_000),
            requires_rural: false,
            requires_tax_credits: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureEligibility {
    pub eligible: bool,
    /// One line per failed requirement
    pub notes: Vec<String>,
}

/// Indicative terms for a structure, all as display text except the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSheet {
    pub structure: String,
    pub borrower: String,
    pub project: String,
    pub facility_type: String,
    pub amount: String,
    pub amount_numeric: Money,
    pub tenor: String,
    pub amortization: String,
    pub pricing: String,
    pub dscr_covenant: String,
    pub security: String,
    pub conditions_precedent: Vec<String>,
    pub covenants: Vec<String>,
    pub reserve_requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecommendation {
    pub structure_key: StructureKind,
    pub template: StructureTemplate,
    pub fit_score: Score,
    pub eligibility: StructureEligibility,
    pub term_sheet: TermSheet,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Eligible structures ranked by fit, best first. Ties keep template order.
pub fn recommend_structures(
    params: &ProjectParameters,
    programs: &ProgramConfig,
) -> Vec<StructureRecommendation> {
    let mut ranked: Vec<StructureRecommendation> = templates(programs)
        .into_iter()
        .filter_map(|template| {
            let eligibility = check_eligibility(params, &template);
            if !eligibility.eligible {
                return None;
            }
            Some(StructureRecommendation {
                structure_key: template.kind,
                fit_score: fit_score(params, &template),
                term_sheet: term_sheet(params, &template),
                eligibility,
                template,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));

    debug!(
        project = %params.project_name,
        eligible = ranked.len(),
        "financing structures ranked"
    );
    ranked
}

pub fn check_eligibility(
    params: &ProjectParameters,
    template: &StructureTemplate,
) -> StructureEligibility {
    let fp = &params.financial;
    let mut notes = Vec::new();

    if !template.suitable_for.contains(&params.entity_type) {
        notes.push(format!(
            "Entity type '{}' is not typically eligible.",
            params.entity_type.as_str()
        ));
    }
    if fp.total_project_cost < template.min_project_size {
        notes.push(format!(
            "Project size below minimum of {}.",
            money(template.min_project_size)
        ));
    }
    if template.requires_rural && !params.is_rural {
        notes.push("Project must be located in a designated rural area.".into());
    }
    if template.requires_tax_credits
        && fp.itc_percent <= Decimal::ZERO
        && fp.ptc_per_mwh <= Decimal::ZERO
    {
        notes.push("Structure requires ITC or PTC eligibility.".into());
    }

    StructureEligibility {
        eligible: notes.is_empty(),
        notes,
    }
}

/// 50 base, plus coverage, leverage and program-specific bonuses, capped.
pub fn fit_score(params: &ProjectParameters, template: &StructureTemplate) -> Score {
    let fp = &params.financial;
    let mut score = BASE_FIT;

    let dscr = fp.dscr();
    if dscr.meets(template.typical_dscr_min) {
        score += dec!(15);
    } else if dscr.meets(template.typical_dscr_min * NEAR_DSCR) {
        score += dec!(5);
    }

    if (fp.leverage_ratio() - template.typical_leverage).abs() <= LEVERAGE_FIT_BAND {
        score += dec!(10);
    }

    score += match template.kind {
        StructureKind::RusDirect | StructureKind::RusGuaranteed if params.is_rural => dec!(20),
        StructureKind::DoeLpo if params.technical.technology_type.is_innovative() => dec!(15),
        StructureKind::TaxEquity if fp.itc_percent >= dec!(0.30) => dec!(15),
        StructureKind::TaxEquity if fp.ptc_per_mwh > Decimal::ZERO => dec!(10),
        StructureKind::MunicipalBond
            if matches!(
                params.entity_type,
                EntityType::MunicipalUtility | EntityType::StateAuthority
            ) =>
        {
            dec!(15)
        }
        _ => Decimal::ZERO,
    };

    cap(score)
}

// ── Term sheet ───────────────────────────────────────────────────────

pub fn term_sheet(params: &ProjectParameters, template: &StructureTemplate) -> TermSheet {
    let amount = params.financial.total_project_cost * template.typical_leverage;
    let kind = template.kind;

    TermSheet {
        structure: template.name.clone(),
        borrower: title_case(params.entity_type.as_str()),
        project: if params.project_name.is_empty() {
            "TBD".into()
        } else {
            params.project_name.clone()
        },
        facility_type: if kind == StructureKind::MunicipalBond {
            "Tax-Exempt Revenue Bonds".into()
        } else {
            "Senior Secured Term Loan".into()
        },
        amount: money(amount),
        amount_numeric: amount,
        tenor: format!("{} years", template.typical_tenor),
        amortization: if kind == StructureKind::TaxEquity {
            "Sculpted".into()
        } else {
            "Fully amortizing".into()
        },
        pricing: format!("Reference rate + {} bps", template.typical_spread_bps),
        dscr_covenant: format!("Minimum {}x", fixed(template.typical_dscr_min, 2)),
        security: security(kind).into(),
        conditions_precedent: conditions_precedent(kind),
        covenants: covenants(template),
        reserve_requirements: reserves(kind),
    }
}

fn security(kind: StructureKind) -> &'static str {
    match kind {
        StructureKind::RusDirect | StructureKind::RusGuaranteed => {
            "First priority lien on all assets of the borrower system, including real property, \
             equipment, revenues, and accounts. Assignment of all material project contracts."
        }
        StructureKind::DoeLpo => {
            "First priority lien on project assets and assignment of project contracts. \
             Government guarantee secured by project cash flows."
        }
        StructureKind::ProjectFinance => {
            "First priority security interest in all project assets, assignment of project \
             contracts (EPC, O&M, PPA), pledge of equity interests in project company, and \
             assignment of insurance proceeds."
        }
        StructureKind::MunicipalBond => {
            "Revenue pledge from project operations and system revenues."
        }
        _ => "Security package to be determined based on lender requirements.",
    }
}

fn conditions_precedent(kind: StructureKind) -> Vec<String> {
    let mut cps = vec![
        "Execution of all material project contracts",
        "Receipt of all required permits and approvals",
        "Satisfactory independent engineer report",
        "Satisfactory legal opinions",
        "Evidence of required insurance coverage",
        "Funding of required reserve accounts",
    ];
    if kind.is_rus() {
        cps.extend([
            "Approved RUS Form 201 loan application",
            "Environmental review compliance (7 CFR 1970)",
            "USDA Rural Development area eligibility confirmation",
        ]);
    } else if kind == StructureKind::DoeLpo {
        cps.extend([
            "Completed LPO Part I and Part II application",
            "NEPA environmental review completion",
            "Credit subsidy cost payment",
            "Davis-Bacon Act compliance certification",
        ]);
    }
    cps.into_iter().map(String::from).collect()
}

fn covenants(template: &StructureTemplate) -> Vec<String> {
    let mut out = vec![
        format!(
            "Minimum DSCR: {}x (tested quarterly)",
            fixed(template.typical_dscr_min, 2)
        ),
        "Distribution lock-up DSCR: 1.10x".into(),
        "Annual audited financial statements within 120 days of fiscal year end".into(),
        "Quarterly unaudited financial statements within 45 days of quarter end".into(),
        "Maintenance of all material permits and approvals".into(),
        "Maintenance of required insurance coverage".into(),
        "No additional indebtedness without lender consent".into(),
    ];
    if template.kind.is_rus() {
        out.extend([
            "Compliance with RUS mortgage requirements".to_string(),
            "Annual RUS Operating Report (Form 7)".to_string(),
            "Maintain minimum TIER (Times Interest Earned Ratio) of 1.50x".to_string(),
        ]);
    }
    out
}

fn reserves(kind: StructureKind) -> Vec<String> {
    let mut out = vec![
        "Debt service reserve: 6 months of debt service".to_string(),
        "Major maintenance reserve: As determined by independent engineer".to_string(),
    ];
    if kind.is_rus() {
        out.push(
            "Cushion of credit reserve: Optional pre-payment account per RUS regulations".into(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TechnologyType;
    use pretty_assertions::assert_eq;

    fn rural_cooperative_solar() -> ProjectParameters {
        let mut p = ProjectParameters::default();
        p.project_name = "Prairie Solar".into();
        p.entity_type = EntityType::Cooperative;
        p.is_rural = true;
        p.financial.total_project_cost = dec!(105_000_000);
        p.financial.annual_revenue = dec!(13_000_000);
        p.financial.annual_opex = dec!(2_100_000);
        p.financial.itc_percent = dec!(0.30);
        p
    }

    #[test]
    fn test_seven_templates() {
        let all = templates(&ProgramConfig::default());
        assert_eq!(all.len(), 7);
        assert_eq!(all[2].typical_tenor, 35);
        assert_eq!(all[4].min_project_size, dec!(25_000_000));
    }

    #[test]
    fn test_rural_cooperative_ranking() {
        let ranked = recommend_structures(&rural_cooperative_solar(), &ProgramConfig::default());
        let keys: Vec<StructureKind> = ranked.iter().map(|r| r.structure_key).collect();
        assert_eq!(
            keys,
            vec![
                StructureKind::RusDirect,
                StructureKind::RusGuaranteed,
                StructureKind::DoeLpo,
                StructureKind::UtilityCorporate,
            ]
        );
        // 50 + 15 dscr + 10 leverage + 20 rural
        assert_eq!(ranked[0].fit_score, dec!(95));
        // 50 + 15 dscr, leverage 0.70 vs 0.55 misses the band
        assert_eq!(ranked[3].fit_score, dec!(65));
    }

    #[test]
    fn test_ineligibility_notes() {
        let p = rural_cooperative_solar();
        let all = templates(&ProgramConfig::default());
        let tax_equity = check_eligibility(&p, &all[5]);
        assert!(!tax_equity.eligible);
        assert_eq!(
            tax_equity.notes,
            vec!["Entity type 'cooperative' is not typically eligible.".to_string()]
        );

        let mut small = p.clone();
        small.financial.total_project_cost = dec!(5_000_000);
        let lpo = check_eligibility(&small, &all[4]);
        assert_eq!(lpo.notes, vec!["Project size below minimum of $25,000,000.".to_string()]);
    }

    #[test]
    fn test_innovation_bonus_for_lpo() {
        let mut p = rural_cooperative_solar();
        p.technical.technology_type = TechnologyType::BatteryStorage;
        let lpo = &templates(&ProgramConfig::default())[4];
        assert_eq!(fit_score(&p, lpo), dec!(90));
    }

    #[test]
    fn test_term_sheet_text() {
        let p = rural_cooperative_solar();
        let rus = &templates(&ProgramConfig::default())[2];
        let sheet = term_sheet(&p, rus);
        assert_eq!(sheet.borrower, "Cooperative");
        assert_eq!(sheet.amount, "$84,000,000");
        assert_eq!(sheet.tenor, "35 years");
        assert_eq!(sheet.dscr_covenant, "Minimum 1.00x");
        assert_eq!(sheet.conditions_precedent.len(), 9);
        assert_eq!(sheet.covenants.len(), 10);
        assert_eq!(sheet.reserve_requirements.len(), 3);
    }
}
