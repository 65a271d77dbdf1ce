use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::debug;

use super::eligibility::{lpo_eligibility, rus_eligibility, ProgramEligibility};
use super::narrative;
use crate::config::EngineConfig;
use crate::credit::{self, CreditAssessment};
use crate::financial::{build_pro_forma, financial_strength_score, FinancialSummary};
use crate::params::ProjectParameters;
use crate::rubrics::{cap, market_score, structure_score, technology_score, weighted_sum};
use crate::types::{Rate, Score};

// ---------------------------------------------------------------------------
// Categories and grades
// ---------------------------------------------------------------------------

/// The five assessment dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "Technology & Performance")]
    Technology,
    #[serde(rename = "Financial Strength")]
    Financial,
    #[serde(rename = "Credit & Counterparty")]
    Credit,
    #[serde(rename = "Project Structure")]
    Structure,
    #[serde(rename = "Market & Resource")]
    Market,
}

/// Composite weights. They sum to exactly one.
pub const WEIGHTS: [(ScoreCategory, Rate); 5] = [
    (ScoreCategory::Technology, dec!(0.20)),
    (ScoreCategory::Financial, dec!(0.25)),
    (ScoreCategory::Credit, dec!(0.20)),
    (ScoreCategory::Structure, dec!(0.20)),
    (ScoreCategory::Market, dec!(0.15)),
];

impl ScoreCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Technology => "Technology & Performance",
            ScoreCategory::Financial => "Financial Strength",
            ScoreCategory::Credit => "Credit & Counterparty",
            ScoreCategory::Structure => "Project Structure",
            ScoreCategory::Market => "Market & Resource",
        }
    }

    pub fn weight(&self) -> Rate {
        WEIGHTS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, w)| *w)
            .unwrap_or(Decimal::ZERO)
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Investment Grade")]
    InvestmentGrade,
    #[serde(rename = "Near Investment Grade")]
    NearInvestmentGrade,
    #[serde(rename = "Sub-Investment Grade")]
    SubInvestmentGrade,
    Speculative,
    #[serde(rename = "Pre-Bankable")]
    PreBankable,
}

/// Minimum overall score for each grade, best grade first.
const GRADE_THRESHOLDS: [(Score, Grade); 4] = [
    (dec!(80), Grade::InvestmentGrade),
    (dec!(65), Grade::NearInvestmentGrade),
    (dec!(50), Grade::SubInvestmentGrade),
    (dec!(35), Grade::Speculative),
];

impl Grade {
    pub fn from_score(score: Score) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::PreBankable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::InvestmentGrade => "Investment Grade",
            Grade::NearInvestmentGrade => "Near Investment Grade",
            Grade::SubInvestmentGrade => "Sub-Investment Grade",
            Grade::Speculative => "Speculative",
            Grade::PreBankable => "Pre-Bankable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::InvestmentGrade => "Strong bankability",
            Grade::NearInvestmentGrade => "Adequate with conditions",
            Grade::SubInvestmentGrade => "Requires significant enhancement",
            Grade::Speculative => "Major structural gaps",
            Grade::PreBankable => "Not ready for financing",
        }
    }

    /// Display colour as a hex triplet.
    pub fn color(&self) -> &'static str {
        match self {
            Grade::InvestmentGrade => "#1a7a3a",
            Grade::NearInvestmentGrade => "#2d8f4e",
            Grade::SubInvestmentGrade => "#b8860b",
            Grade::Speculative => "#cc6600",
            Grade::PreBankable => "#b22222",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A named display value backing a sub-score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub value: String,
}

impl ScoreComponent {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub category: ScoreCategory,
    /// Raw 0-100 score
    pub score: Score,
    pub weight: Rate,
    /// score * weight
    pub weighted_score: Score,
    pub components: Vec<ScoreComponent>,
    pub commentary: String,
}

impl SubScore {
    fn new(
        category: ScoreCategory,
        score: Score,
        components: Vec<ScoreComponent>,
        commentary: String,
    ) -> Self {
        let weight = category.weight();
        Self {
            category,
            score,
            weight,
            weighted_score: score * weight,
            components,
            commentary,
        }
    }
}

/// Complete scoring outcome for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankabilityResult {
    pub overall_score: Score,
    pub grade: Grade,
    pub grade_label: String,
    pub grade_color: String,
    pub sub_scores: Vec<SubScore>,
    pub financial_summary: FinancialSummary,
    pub credit_assessment: CreditAssessment,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub rus_eligibility: ProgramEligibility,
    pub lpo_eligibility: ProgramEligibility,
}

impl BankabilityResult {
    pub fn sub_score(&self, category: ScoreCategory) -> Option<&SubScore> {
        self.sub_scores.iter().find(|s| s.category == category)
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Score a project with the default engine configuration.
pub fn score(params: &ProjectParameters) -> BankabilityResult {
    score_with_config(params, &EngineConfig::default())
}

/// Run the financial and credit engines and the three rubrics, blend them
/// into the composite, then derive the narrative and program screens.
pub fn score_with_config(params: &ProjectParameters, config: &EngineConfig) -> BankabilityResult {
    let start = Instant::now();

    let financial_summary = build_pro_forma(params);
    let credit_assessment = credit::assess(params);

    // ── Sub-scores ───────────────────────────────────────────────────
    let tech = technology_score(&params.technical);
    let fin = financial_strength_score(&financial_summary, params);
    let cred = credit_assessment.overall_credit_score;
    let structure = structure_score(&params.structure);
    let market = market_score(&params.market);

    let sub_scores = vec![
        SubScore::new(
            ScoreCategory::Technology,
            tech,
            narrative::technology_components(&params.technical),
            narrative::technology_commentary(tech).into(),
        ),
        SubScore::new(
            ScoreCategory::Financial,
            fin,
            narrative::financial_components(&financial_summary),
            narrative::financial_commentary(&financial_summary),
        ),
        SubScore::new(
            ScoreCategory::Credit,
            cred,
            narrative::credit_components(&credit_assessment),
            narrative::credit_commentary(&credit_assessment),
        ),
        SubScore::new(
            ScoreCategory::Structure,
            structure,
            narrative::structure_components(&params.structure),
            narrative::structure_commentary(structure).into(),
        ),
        SubScore::new(
            ScoreCategory::Market,
            market,
            narrative::market_components(&params.market),
            narrative::market_commentary(market).into(),
        ),
    ];

    let overall_score = cap(weighted_sum(
        sub_scores.iter().map(|s| (s.score, s.weight)),
    ));
    let grade = Grade::from_score(overall_score);

    // ── Narrative ────────────────────────────────────────────────────
    let rus = rus_eligibility(params, &config.programs);
    let lpo = lpo_eligibility(params, &config.programs);

    let strengths = narrative::strengths(params, &sub_scores, &financial_summary);
    let weaknesses = narrative::weaknesses(&sub_scores, &financial_summary, &credit_assessment);
    let recommendations = narrative::recommendations(
        params,
        &financial_summary,
        &credit_assessment,
        &rus,
        &lpo,
    );

    debug!(
        project = %params.project_name,
        overall = %overall_score.round_dp(2),
        grade = %grade,
        elapsed_us = start.elapsed().as_micros() as u64,
        "bankability score complete"
    );

    BankabilityResult {
        overall_score,
        grade,
        grade_label: grade.label().into(),
        grade_color: grade.color().into(),
        sub_scores,
        financial_summary,
        credit_assessment,
        strengths,
        weaknesses,
        recommendations,
        rus_eligibility: rus,
        lpo_eligibility: lpo,
    }
}
