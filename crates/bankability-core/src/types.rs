use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Multiples (e.g., 1.35x DSCR, 2.1x equity multiple)
pub type Multiple = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Rubric and composite scores on a 0-100 scale
pub type Score = Decimal;

/// Value reported in place of an unbounded coverage ratio.
pub const UNBOUNDED_COVERAGE_REPORT: Decimal = dec!(999.99);

/// A coverage ratio (NOI / debt service) that is unbounded when there is
/// no debt service to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Finite(Multiple),
    Unbounded,
}

impl Coverage {
    /// Coverage of `numerator` over `denominator`. A non-positive denominator
    /// is unbounded when there is something to cover with, zero otherwise.
    pub fn ratio(numerator: Money, denominator: Money) -> Self {
        if denominator > Decimal::ZERO {
            match numerator.checked_div(denominator) {
                Some(ratio) => Coverage::Finite(ratio),
                None if numerator > Decimal::ZERO => Coverage::Unbounded,
                None => Coverage::Finite(Decimal::MIN),
            }
        } else if numerator > Decimal::ZERO {
            Coverage::Unbounded
        } else {
            Coverage::Finite(Decimal::ZERO)
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Coverage::Unbounded)
    }

    /// Finite value, if any.
    pub fn finite(&self) -> Option<Multiple> {
        match self {
            Coverage::Finite(v) => Some(*v),
            Coverage::Unbounded => None,
        }
    }

    /// Value used for threshold comparisons; unbounded clears every threshold.
    pub fn saturating_value(&self) -> Multiple {
        match self {
            Coverage::Finite(v) => *v,
            Coverage::Unbounded => Decimal::MAX,
        }
    }

    pub fn meets(&self, threshold: Multiple) -> bool {
        self.saturating_value() >= threshold
    }

    /// Rounded value for reports, with unbounded coverage shown as 999.99.
    pub fn report_value(&self, dp: u32) -> Decimal {
        match self {
            Coverage::Finite(v) => v.round_dp(dp),
            Coverage::Unbounded => UNBOUNDED_COVERAGE_REPORT,
        }
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Coverage::Finite(Decimal::ZERO)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coverage::Finite(v) => write!(f, "{:.2}", v.round_dp(2)),
            Coverage::Unbounded => f.write_str("inf"),
        }
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coverage::Finite(v) => Serialize::serialize(v, serializer),
            Coverage::Unbounded => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for Coverage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(Decimal),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(v) => Ok(Coverage::Finite(v)),
            Raw::Text(s) if s.eq_ignore_ascii_case("inf") => Ok(Coverage::Unbounded),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a coverage ratio or \"inf\", got \"{s}\""
            ))),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
