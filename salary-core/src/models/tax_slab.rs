use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_config::ConfigError;

/// One bracket of a slab table. `upper_bound` of `None` covers all remaining income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// An ordered, validated sequence of [`TaxSlab`]s.
///
/// A `SlabTable` can only be built through [`SlabTable::new`] (or by
/// deserialising, which goes through the same checks), so holding one is
/// proof that:
///
/// - there is at least one slab,
/// - upper bounds are positive and strictly increasing,
/// - the last slab, and only the last slab, is unbounded,
/// - every rate is within `[0, 1]` and rates never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct SlabTable {
    slabs: Vec<TaxSlab>,
}

impl SlabTable {
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, ConfigError> {
        if slabs.is_empty() {
            return Err(ConfigError::EmptySlabTable);
        }

        let last = slabs.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange {
                    index,
                    rate: slab.rate,
                });
            }
            if index > 0 && slab.rate < previous_rate {
                return Err(ConfigError::RatesDecreasing {
                    index,
                    previous: previous_rate,
                    rate: slab.rate,
                });
            }
            previous_rate = slab.rate;

            match slab.upper_bound {
                None if index != last => return Err(ConfigError::UnboundedSlabNotLast { index }),
                None => {}
                Some(_) if index == last => return Err(ConfigError::MissingUnboundedSlab),
                Some(bound) if bound <= previous_bound => {
                    return Err(ConfigError::BoundsNotIncreasing {
                        index,
                        previous: previous_bound,
                        bound,
                    });
                }
                Some(bound) => previous_bound = bound,
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Iterates `(lower_bound, slab)` pairs in ascending order. The lower bound
    /// of a slab is the previous slab's upper bound, or zero for the first.
    pub fn brackets(&self) -> impl Iterator<Item = (Decimal, &TaxSlab)> + '_ {
        self.slabs.iter().scan(Decimal::ZERO, |lower, slab| {
            let current = *lower;
            if let Some(upper) = slab.upper_bound {
                *lower = upper;
            }
            Some((current, slab))
        })
    }

    /// Finite bracket edges, in ascending order.
    pub fn boundaries(&self) -> Vec<Decimal> {
        self.slabs.iter().filter_map(|s| s.upper_bound).collect()
    }
}

impl TryFrom<Vec<TaxSlab>> for SlabTable {
    type Error = ConfigError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabTable> for Vec<TaxSlab> {
    fn from(table: SlabTable) -> Self {
        table.slabs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_slabs() -> Vec<TaxSlab> {
        vec![
            TaxSlab::bounded(dec!(250000), dec!(0)),
            TaxSlab::bounded(dec!(500000), dec!(0.05)),
            TaxSlab::bounded(dec!(1000000), dec!(0.20)),
            TaxSlab::unbounded(dec!(0.30)),
        ]
    }

    #[test]
    fn new_accepts_well_formed_table() {
        let table = SlabTable::new(valid_slabs()).expect("valid table");

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.boundaries(),
            vec![dec!(250000), dec!(500000), dec!(1000000)]
        );
    }

    #[test]
    fn new_accepts_single_unbounded_slab() {
        let table = SlabTable::new(vec![TaxSlab::unbounded(dec!(0.10))]).expect("flat table");

        assert_eq!(table.len(), 1);
        assert!(table.boundaries().is_empty());
    }

    #[test]
    fn brackets_yield_previous_upper_bound_as_lower_bound() {
        let table = SlabTable::new(valid_slabs()).unwrap();

        let lowers: Vec<Decimal> = table.brackets().map(|(lower, _)| lower).collect();

        assert_eq!(
            lowers,
            vec![dec!(0), dec!(250000), dec!(500000), dec!(1000000)]
        );
    }

    #[test]
    fn new_rejects_empty_table() {
        assert_eq!(SlabTable::new(vec![]), Err(ConfigError::EmptySlabTable));
    }

    #[test]
    fn new_rejects_bounded_final_slab() {
        let slabs = vec![
            TaxSlab::bounded(dec!(250000), dec!(0)),
            TaxSlab::bounded(dec!(500000), dec!(0.05)),
        ];

        assert_eq!(SlabTable::new(slabs), Err(ConfigError::MissingUnboundedSlab));
    }

    #[test]
    fn new_rejects_unbounded_slab_in_the_middle() {
        let slabs = vec![
            TaxSlab::unbounded(dec!(0)),
            TaxSlab::unbounded(dec!(0.05)),
        ];

        assert_eq!(
            SlabTable::new(slabs),
            Err(ConfigError::UnboundedSlabNotLast { index: 0 })
        );
    }

    #[test]
    fn new_rejects_non_increasing_bounds() {
        let slabs = vec![
            TaxSlab::bounded(dec!(500000), dec!(0)),
            TaxSlab::bounded(dec!(500000), dec!(0.05)),
            TaxSlab::unbounded(dec!(0.30)),
        ];

        assert_eq!(
            SlabTable::new(slabs),
            Err(ConfigError::BoundsNotIncreasing {
                index: 1,
                previous: dec!(500000),
                bound: dec!(500000),
            })
        );
    }

    #[test]
    fn new_rejects_zero_first_bound() {
        let slabs = vec![TaxSlab::bounded(dec!(0), dec!(0)), TaxSlab::unbounded(dec!(0.1))];

        assert!(matches!(
            SlabTable::new(slabs),
            Err(ConfigError::BoundsNotIncreasing { index: 0, .. })
        ));
    }

    #[test]
    fn new_rejects_decreasing_rates() {
        let slabs = vec![
            TaxSlab::bounded(dec!(250000), dec!(0.10)),
            TaxSlab::unbounded(dec!(0.05)),
        ];

        assert_eq!(
            SlabTable::new(slabs),
            Err(ConfigError::RatesDecreasing {
                index: 1,
                previous: dec!(0.10),
                rate: dec!(0.05),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let slabs = vec![TaxSlab::unbounded(dec!(1.5))];

        assert_eq!(
            SlabTable::new(slabs),
            Err(ConfigError::RateOutOfRange {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn new_rejects_negative_rate() {
        let slabs = vec![TaxSlab::unbounded(dec!(-0.01))];

        assert!(matches!(
            SlabTable::new(slabs),
            Err(ConfigError::RateOutOfRange { index: 0, .. })
        ));
    }
}
