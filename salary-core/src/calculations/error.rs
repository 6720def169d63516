use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Largest amount any calculation accepts (10^18).
///
/// Annualising, summing and taxing amounts up to this size stays far inside
/// the range of [`Decimal`], so the arithmetic downstream cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// The rule a rejected input broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NonNegative,
    AtMost(Decimal),
}

impl fmt::Display for Constraint {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NonNegative => f.write_str("non-negative"),
            Self::AtMost(limit) => write!(f, "at most {limit}"),
        }
    }
}

/// A numeric input was negative or beyond [`MAX_AMOUNT`].
///
/// This is the only runtime failure of the calculations; `field` names the
/// offending input so callers can point the user at it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid input: {field} must be {constraint}, got {value}")]
pub struct InvalidInputError {
    pub field: &'static str,
    pub value: Decimal,
    pub constraint: Constraint,
}

impl InvalidInputError {
    pub fn negative(
        field: &'static str,
        value: Decimal,
    ) -> Self {
        Self {
            field,
            value,
            constraint: Constraint::NonNegative,
        }
    }

    pub fn too_large(
        field: &'static str,
        value: Decimal,
    ) -> Self {
        Self {
            field,
            value,
            constraint: Constraint::AtMost(MAX_AMOUNT),
        }
    }
}

pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInputError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(InvalidInputError::negative(field, value))
    } else {
        Ok(value)
    }
}

/// Accepts a money amount in `0..=MAX_AMOUNT`.
pub fn ensure_amount(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInputError> {
    let value = ensure_non_negative(field, value)?;
    if value > MAX_AMOUNT {
        return Err(InvalidInputError::too_large(field, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(ensure_non_negative("basic", dec!(0)), Ok(dec!(0)));
        assert_eq!(ensure_non_negative("basic", dec!(1.5)), Ok(dec!(1.5)));
    }

    #[test]
    fn accepts_negative_zero() {
        assert!(ensure_non_negative("basic", -dec!(0.00)).is_ok());
    }

    #[test]
    fn rejects_negative_with_field_name() {
        let err = ensure_non_negative("housing_allowance", dec!(-5)).unwrap_err();

        assert_eq!(err.field, "housing_allowance");
        assert_eq!(
            err.to_string(),
            "invalid input: housing_allowance must be non-negative, got -5"
        );
    }

    #[test]
    fn max_amount_is_one_quintillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000000));
    }

    #[test]
    fn amount_at_limit_is_accepted() {
        assert_eq!(ensure_amount("basic", MAX_AMOUNT), Ok(MAX_AMOUNT));
    }

    #[test]
    fn amount_above_limit_names_the_limit() {
        let err = ensure_amount("gross_annual_income", MAX_AMOUNT + dec!(0.01)).unwrap_err();

        assert_eq!(err.constraint, Constraint::AtMost(MAX_AMOUNT));
        assert_eq!(
            err.to_string(),
            "invalid input: gross_annual_income must be at most 1000000000000000000, got 1000000000000000000.01"
        );
    }

    #[test]
    fn amount_rejects_negative_first() {
        let err = ensure_amount("section_80c", dec!(-1)).unwrap_err();
        assert_eq!(err.constraint, Constraint::NonNegative);
    }
}
