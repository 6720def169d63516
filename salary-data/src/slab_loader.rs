use std::io::Read;

use rust_decimal::Decimal;
use salary_core::{RegimeRules, SlabTable, TaxConfig, TaxRegime, TaxSlab};
use serde::Deserialize;
use tracing::debug;

use crate::config::ConfigLoadError;

/// A single row of a slab CSV file.
///
/// - `regime`: `old` or `new`
/// - `upper_bound`: top of the slab (empty for unbounded)
/// - `rate`: marginal rate as a fraction (e.g. `0.05` for 5%)
///
/// Rows for a regime must be listed in ascending order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub regime: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Slab tables for both regimes, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeSlabs {
    pub old: SlabTable,
    pub new: SlabTable,
}

impl RegimeSlabs {
    /// Combines the slab tables with the scalar settings into a validated
    /// [`TaxConfig`].
    pub fn into_config(
        self,
        old_rebate_limit: Decimal,
        new_rebate_limit: Decimal,
        cess_rate: Decimal,
        standard_deduction: Decimal,
    ) -> Result<TaxConfig, ConfigLoadError> {
        let config = TaxConfig {
            cess_rate,
            standard_deduction,
            old: RegimeRules {
                rebate_limit: old_rebate_limit,
                slabs: self.old,
            },
            new: RegimeRules {
                rebate_limit: new_rebate_limit,
                slabs: self.new,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Loader for slab tables kept in CSV form.
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from any CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, ConfigLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records by regime, keeping file order within each group, and
    /// validates both tables.
    pub fn build(records: &[SlabRecord]) -> Result<RegimeSlabs, ConfigLoadError> {
        let mut old = Vec::new();
        let mut new = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let regime = TaxRegime::parse(&record.regime).ok_or_else(|| {
                ConfigLoadError::UnknownRegime {
                    value: record.regime.clone(),
                    row: idx + 1,
                }
            })?;
            let slab = TaxSlab {
                upper_bound: record.upper_bound,
                rate: record.rate,
            };
            match regime {
                TaxRegime::Old => old.push(slab),
                TaxRegime::New => new.push(slab),
            }
        }

        let slabs = RegimeSlabs {
            old: Self::table(TaxRegime::Old, old)?,
            new: Self::table(TaxRegime::New, new)?,
        };
        debug!(
            old = slabs.old.len(),
            new = slabs.new.len(),
            "built slab tables"
        );
        Ok(slabs)
    }

    fn table(
        regime: TaxRegime,
        slabs: Vec<TaxSlab>,
    ) -> Result<SlabTable, ConfigLoadError> {
        if slabs.is_empty() {
            return Err(ConfigLoadError::MissingRegime(regime));
        }
        SlabTable::new(slabs).map_err(|source| ConfigLoadError::InvalidSlabs { regime, source })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::ConfigError;

    use super::*;

    const TEST_CSV: &str = "\
regime,upper_bound,rate
old,250000,0
old,500000,0.05
old,1000000,0.20
old,,0.30
new,300000,0
new,600000,0.05
new,900000,0.10
new,1200000,0.15
new,1500000,0.20
new,,0.30
";

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn parse_keeps_long_fractional_rates() {
        let csv = "regime,upper_bound,rate\nold,12345678901234.5678,0.123456789012345678";

        let records = SlabTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_bound, Some(dec!(12345678901234.5678)));
        assert_eq!(records[0].rate, dec!(0.123456789012345678));
    }

    #[test]
    fn parse_single_row() {
        let csv = "regime,upper_bound,rate\nold,250000,0";

        let records = SlabTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![SlabRecord {
                regime: "old".to_string(),
                upper_bound: Some(dec!(250000)),
                rate: dec!(0),
            }]
        );
    }

    #[test]
    fn parse_empty_upper_bound_is_unbounded() {
        let csv = "regime,upper_bound,rate\nnew, ,0.30";

        let records = SlabTableLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].upper_bound, None);
        assert_eq!(records[0].rate, dec!(0.30));
    }

    #[test]
    fn parse_reports_missing_column() {
        let csv = "regime,upper_bound\nold,250000";

        let err = SlabTableLoader::parse(csv.as_bytes()).expect_err("missing rate column");

        let ConfigLoadError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn parse_reports_bad_decimal() {
        let csv = "regime,upper_bound,rate\nold,abc,0.05";

        assert!(matches!(
            SlabTableLoader::parse(csv.as_bytes()),
            Err(ConfigLoadError::CsvParse(_))
        ));
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn build_groups_rows_by_regime() {
        let records = SlabTableLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let slabs = SlabTableLoader::build(&records).expect("valid tables");

        assert_eq!(slabs.old.len(), 4);
        assert_eq!(slabs.new.len(), 6);
        assert_eq!(
            slabs.new.boundaries(),
            vec![
                dec!(300000),
                dec!(600000),
                dec!(900000),
                dec!(1200000),
                dec!(1500000)
            ]
        );
    }

    #[test]
    fn build_rejects_unknown_regime_with_row_number() {
        let records = SlabTableLoader::parse("regime,upper_bound,rate\nold,,0.1\nflat,,0.2".as_bytes())
            .unwrap();

        match SlabTableLoader::build(&records) {
            Err(ConfigLoadError::UnknownRegime { value, row }) => {
                assert_eq!(value, "flat");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnknownRegime, got {other:?}"),
        }
    }

    #[test]
    fn build_requires_both_regimes() {
        let records =
            SlabTableLoader::parse("regime,upper_bound,rate\nold,,0.1".as_bytes()).unwrap();

        assert!(matches!(
            SlabTableLoader::build(&records),
            Err(ConfigLoadError::MissingRegime(TaxRegime::New))
        ));
    }

    #[test]
    fn build_names_regime_of_invalid_table() {
        let csv = "regime,upper_bound,rate\nold,,0.1\nnew,500,0.2\nnew,,0.1";
        let records = SlabTableLoader::parse(csv.as_bytes()).unwrap();

        match SlabTableLoader::build(&records) {
            Err(ConfigLoadError::InvalidSlabs { regime, source }) => {
                assert_eq!(regime, TaxRegime::New);
                assert!(matches!(source, ConfigError::RatesDecreasing { index: 1, .. }));
            }
            other => panic!("expected InvalidSlabs, got {other:?}"),
        }
    }

    #[test]
    fn into_config_validates_scalars() {
        let records = SlabTableLoader::parse(TEST_CSV.as_bytes()).unwrap();
        let slabs = SlabTableLoader::build(&records).unwrap();

        let err = slabs
            .into_config(dec!(500000), dec!(-1), dec!(0.04), dec!(50000))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::Invalid(ConfigError::NegativeRebateLimit {
                regime: TaxRegime::New,
                ..
            })
        ));
    }

    #[test]
    fn into_config_matches_bundled_defaults() {
        let records = SlabTableLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let config = SlabTableLoader::build(&records)
            .unwrap()
            .into_config(dec!(500000), dec!(700000), dec!(0.04), dec!(50000))
            .unwrap();

        assert_eq!(config, crate::default_tax_config().unwrap());
    }
}
