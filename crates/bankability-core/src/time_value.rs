use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::types::{Money, Rate};

const IRR_INITIAL_GUESS: Rate = dec!(0.10);
const IRR_TOLERANCE: Decimal = dec!(0.0000001);
const IRR_FLAT_DERIVATIVE: Decimal = dec!(0.000000000000001);
const IRR_MAX_ITERATIONS: u32 = 200;
const IRR_FLOOR: Rate = dec!(-0.99);
const IRR_CEILING: Rate = dec!(10.0);
const IRR_FLOOR_RESET: Rate = dec!(-0.5);
const IRR_CEILING_RESET: Rate = dec!(5.0);

/// Net Present Value of a series of cash flows, the first at t = 0.
///
/// Returns zero for an empty series or a negative rate. Periods whose
/// discount factor overflows contribute nothing.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> Money {
    if cash_flows.is_empty() || rate < Decimal::ZERO {
        return Decimal::ZERO;
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut result = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            match discount.checked_mul(one_plus_r) {
                Some(d) => discount = d,
                None => break,
            }
        }
        result += cf / discount;
    }

    result
}

/// Internal Rate of Return using Newton-Raphson.
///
/// Best effort: starts at 10%, resets overshoots to -50% / 500%, and returns
/// the last iterate when the derivative flattens, the iteration cap is hit,
/// or decimal arithmetic overflows. Series that cannot pay back (fewer than
/// two flows or a non-positive sum) return zero.
pub fn irr(cash_flows: &[Money]) -> Rate {
    if cash_flows.len() < 2 {
        return Decimal::ZERO;
    }

    let total: Money = cash_flows.iter().copied().sum();
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut guess = IRR_INITIAL_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let Some((npv_val, dnpv)) = npv_and_derivative(guess, cash_flows) else {
            warn!(rate = %guess, "IRR search overflowed; using last iterate");
            return guess;
        };

        if dnpv.abs() < IRR_FLAT_DERIVATIVE {
            return guess;
        }

        let Some(next) = npv_val
            .checked_div(dnpv)
            .and_then(|step| guess.checked_sub(step))
        else {
            warn!(rate = %guess, "IRR step overflowed; using last iterate");
            return guess;
        };

        let next = if next < IRR_FLOOR {
            IRR_FLOOR_RESET
        } else if next > IRR_CEILING {
            IRR_CEILING_RESET
        } else {
            next
        };

        if (next - guess).abs() < IRR_TOLERANCE {
            return next;
        }
        guess = next;
    }

    warn!(
        rate = %guess,
        iterations = IRR_MAX_ITERATIONS,
        "IRR did not converge; using last iterate"
    );
    guess
}

/// NPV and its derivative with respect to the rate, using iterative discount
/// factors. `None` on decimal overflow.
fn npv_and_derivative(rate: Rate, cash_flows: &[Money]) -> Option<(Decimal, Decimal)> {
    let one_plus_r = Decimal::ONE + rate;
    let mut npv_val = Decimal::ZERO;
    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = discount.checked_mul(one_plus_r)?;
        }
        if discount.is_zero() {
            continue;
        }
        npv_val = npv_val.checked_add(cf.checked_div(discount)?)?;

        if t > 0 {
            let next_discount = discount.checked_mul(one_plus_r)?;
            if !next_discount.is_zero() {
                let term = Decimal::from(t as u64)
                    .checked_mul(*cf)?
                    .checked_div(next_discount)?;
                dnpv = dnpv.checked_sub(term)?;
            }
        }
    }

    Some((npv_val, dnpv))
}

/// Compound growth factor (1 + rate)^periods, saturating at `Decimal::MAX`.
pub fn compound_factor(rate: Rate, periods: u32) -> Decimal {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        match factor.checked_mul(one_plus_r) {
            Some(f) => factor = f,
            None => return Decimal::MAX,
        }
    }
    factor
}

/// Level annual payment that fully amortizes `principal` over `periods`
/// years at `rate`. Zero when there is nothing to amortize.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> Money {
    if principal <= Decimal::ZERO || periods == 0 {
        return Decimal::ZERO;
    }
    if rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let factor = compound_factor(rate, periods);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return principal / Decimal::from(periods);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        // A saturated factor means the payment is effectively interest-only.
        .unwrap_or(principal * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv(dec!(0.10), &cfs);
        // -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_negative_rate_and_empty_series_are_zero() {
        assert_eq!(npv(dec!(-0.01), &[dec!(-100), dec!(200)]), Decimal::ZERO);
        assert_eq!(npv(dec!(0.08), &[]), Decimal::ZERO);
    }

    #[test]
    fn test_npv_zero_rate_is_plain_sum() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        assert_eq!(npv(Decimal::ZERO, &cfs), dec!(50));
    }

    #[test]
    fn test_irr_converges_to_npv_root() {
        let cfs = vec![dec!(-100), dec!(20), dec!(30), dec!(40), dec!(50)];
        let rate = irr(&cfs);
        assert!((rate - dec!(0.128257)).abs() < dec!(0.00001));
        assert!(npv(rate, &cfs).abs() < dec!(0.0001));
    }

    #[test]
    fn test_irr_level_annuity() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let rate = irr(&cfs);
        assert!((rate - dec!(0.0970)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_irr_non_positive_sum_is_zero() {
        assert_eq!(irr(&[dec!(-100), dec!(50), dec!(50)]), Decimal::ZERO);
        assert_eq!(irr(&[dec!(-100), dec!(20)]), Decimal::ZERO);
        assert_eq!(irr(&[dec!(100)]), Decimal::ZERO);
    }

    #[test]
    fn test_irr_survives_extreme_returns() {
        // Payback in the first year by a factor of 50 drives the search far
        // above 100%; it must end without panicking.
        let mut cfs = vec![dec!(-1_000_000), dec!(50_000_000)];
        cfs.extend(std::iter::repeat(dec!(10_000_000)).take(29));
        let rate = irr(&cfs);
        assert!(rate > Decimal::ONE);
    }

    #[test]
    fn test_annuity_payment_standard_loan() {
        // 73.5M at 5.5% over 20 years ≈ 6,150,430.76
        let pmt = annuity_payment(dec!(73_500_000), dec!(0.055), 20);
        assert!((pmt - dec!(6_150_430.76)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_rate_and_degenerate() {
        assert_eq!(annuity_payment(dec!(1000), Decimal::ZERO, 10), dec!(100));
        assert_eq!(annuity_payment(Decimal::ZERO, dec!(0.05), 10), Decimal::ZERO);
        assert_eq!(annuity_payment(dec!(1000), dec!(0.05), 0), Decimal::ZERO);
    }

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(0.10), 2), dec!(1.21));
        assert_eq!(compound_factor(dec!(0.10), 0), Decimal::ONE);
    }
}
