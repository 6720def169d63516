//! Decimal columns are read from their text form so no digits pass through a
//! float on the way in.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

fn parse<E: de::Error>(text: &str) -> Result<Decimal, E> {
    let text = text.trim();
    text.parse::<Decimal>()
        .map_err(|e| E::custom(format!("invalid decimal '{text}': {e}")))
}

pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text)
}

/// Empty cells read as `None`.
pub(crate) fn deserialize_optional_decimal<'de, D>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => parse(&text).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "deserialize_decimal")]
        amount: Decimal,
        #[serde(deserialize_with = "deserialize_optional_decimal")]
        limit: Option<Decimal>,
    }

    fn read(csv: &str) -> Result<Amounts, csv::Error> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes())
            .deserialize()
            .next()
            .expect("one row")
    }

    #[test]
    fn keeps_every_digit() {
        let row = read("amount,limit\n12345678901234.5678,0.123456789012345678\n").unwrap();

        assert_eq!(row.amount, dec!(12345678901234.5678));
        assert_eq!(row.limit, Some(dec!(0.123456789012345678)));
    }

    #[test]
    fn empty_optional_cell_is_none() {
        let row = read("amount,limit\n7,\n").unwrap();

        assert_eq!(row.amount, dec!(7));
        assert_eq!(row.limit, None);
    }

    #[test]
    fn garbage_names_the_value() {
        let err = read("amount,limit\n12x,\n").unwrap_err();

        assert!(err.to_string().contains("invalid decimal '12x'"));
    }
}
