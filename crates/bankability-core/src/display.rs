//! Text renderings of decimal values used in narrative strings and score
//! component lists. Rounding is half-to-even throughout.

use rust_decimal::Decimal;

use crate::types::{Money, Rate};

/// `value` rounded to `dp` places and zero-padded, e.g. `fixed(1.5, 2)` is "1.50".
pub fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

/// Fraction shown as a percentage, e.g. `percent(0.0275, 1)` is "2.8%".
pub fn percent(value: Rate, dp: u32) -> String {
    format!("{}%", fixed(value * Decimal::ONE_HUNDRED, dp))
}

/// Fraction shown as a signed whole percentage, e.g. "+10%", "-5%", "+0%".
pub fn signed_percent(value: Rate) -> String {
    let pct = fixed(value * Decimal::ONE_HUNDRED, 0);
    if pct.starts_with('-') {
        format!("{pct}%")
    } else {
        format!("+{pct}%")
    }
}

/// Absolute rate change in percentage points with one decimal, e.g. "+0.5%".
pub fn signed_points(value: Rate) -> String {
    let pts = fixed(value * Decimal::ONE_HUNDRED, 1);
    if pts.starts_with('-') {
        format!("{pts}%")
    } else {
        format!("+{pts}%")
    }
}

/// `value` rounded to `dp` places with comma thousands separators.
pub fn grouped(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + whole.len() / 3);
    out.push_str(sign);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Whole dollars with separators, e.g. "$105,000,000".
pub fn money(value: Money) -> String {
    format!("${}", grouped(value, 0))
}

/// Multiple with two decimals and an "x" suffix, e.g. "1.77x".
pub fn multiple(value: Decimal) -> String {
    format!("{}x", fixed(value, 2))
}

/// "solar_pv" -> "Solar Pv": underscores become spaces and each word is
/// capitalized with the rest lower-cased.
pub fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_pads_and_rounds_half_even() {
        assert_eq!(fixed(dec!(1.5), 2), "1.50");
        assert_eq!(fixed(dec!(1.772234), 2), "1.77");
        assert_eq!(fixed(dec!(2.5), 0), "2");
        assert_eq!(fixed(dec!(97.5), 0), "98");
    }

    #[test]
    fn test_percent_forms() {
        assert_eq!(percent(dec!(0.27), 1), "27.0%");
        assert_eq!(percent(dec!(0.1099434), 1), "11.0%");
        assert_eq!(signed_percent(dec!(0.10)), "+10%");
        assert_eq!(signed_percent(dec!(-0.05)), "-5%");
        assert_eq!(signed_percent(Decimal::ZERO), "+0%");
        assert_eq!(signed_points(dec!(-0.005)), "-0.5%");
        assert_eq!(signed_points(Decimal::ZERO), "+0.0%");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(money(dec!(105_000_000)), "$105,000,000");
        assert_eq!(money(dec!(30313.91)), "$30,314");
        assert_eq!(money(dec!(-1234567.4)), "$-1,234,567");
        assert_eq!(money(dec!(999)), "$999");
        assert_eq!(grouped(dec!(1234.5), 2), "1,234.50");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("solar_pv"), "Solar Pv");
        assert_eq!(title_case("fixed_price_turnkey"), "Fixed Price Turnkey");
        assert_eq!(title_case("established"), "Established");
    }
}
