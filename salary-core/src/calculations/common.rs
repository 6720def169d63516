//! Rounding and clamping shared by the tax and payslip calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of pay periods in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds to the nearest currency sub-unit (two decimal places), with
/// midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2816.666)), dec!(2816.67));
/// assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_half_up(dec!(0.004)), dec!(0.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when it is negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Splits an annual amount into one monthly instalment, rounded half-up.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::monthly_share;
///
/// assert_eq!(monthly_share(dec!(33800)), dec!(2816.67));
/// ```
pub fn monthly_share(annual: Decimal) -> Decimal {
    round_half_up(annual / Decimal::from(MONTHS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_rounds_negative_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_keeps_whole_amounts() {
        assert_eq!(round_half_up(dec!(32500)), dec!(32500.00));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_below_zero() {
        assert_eq!(non_negative(dec!(-0.01)), dec!(0));
    }

    #[test]
    fn non_negative_passes_positive_through() {
        assert_eq!(non_negative(dec!(10.50)), dec!(10.50));
    }

    // =========================================================================
    // monthly_share tests
    // =========================================================================

    #[test]
    fn monthly_share_divides_evenly() {
        assert_eq!(monthly_share(dec!(12000)), dec!(1000.00));
    }

    #[test]
    fn monthly_share_rounds_half_up() {
        // 0.06 / 12 = 0.005
        assert_eq!(monthly_share(dec!(0.06)), dec!(0.01));
    }

    #[test]
    fn monthly_share_of_zero_is_zero() {
        assert_eq!(monthly_share(Decimal::ZERO), Decimal::ZERO);
    }
}
