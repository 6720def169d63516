use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_regime::TaxRegime;
use super::tax_slab::SlabTable;

/// Configuration invariant violations. These are load-time errors: a
/// [`TaxConfig`] that passed [`TaxConfig::validate`] never produces one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("slab table must contain at least one slab")]
    EmptySlabTable,

    #[error("the last slab must be unbounded")]
    MissingUnboundedSlab,

    #[error("slab {index} is unbounded but is not the last slab")]
    UnboundedSlabNotLast { index: usize },

    #[error("slab {index} upper bound {bound} must be greater than {previous}")]
    BoundsNotIncreasing {
        index: usize,
        previous: Decimal,
        bound: Decimal,
    },

    #[error("slab {index} rate {rate} must be between 0 and 1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("slab {index} rate {rate} is lower than the previous rate {previous}")]
    RatesDecreasing {
        index: usize,
        previous: Decimal,
        rate: Decimal,
    },

    #[error("cess rate must be between 0 and 1, got {0}")]
    InvalidCessRate(Decimal),

    #[error("{regime} regime rebate limit must be non-negative, got {limit}")]
    NegativeRebateLimit { regime: TaxRegime, limit: Decimal },

    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),
}

/// Slabs and rebate rule for a single regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    /// Income at or below this amount owes no tax.
    pub rebate_limit: Decimal,
    pub slabs: SlabTable,
}

/// Process-wide tax configuration, shared read-only by every calculation.
///
/// Nothing in this crate supplies default figures; a `TaxConfig` always comes
/// from a configuration source loaded at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Surcharge applied on top of tax after rebate (`0.04` for 4%).
    pub cess_rate: Decimal,

    /// Annual standard deduction used when an employee has no override.
    pub standard_deduction: Decimal,

    pub old: RegimeRules,
    pub new: RegimeRules,
}

impl TaxConfig {
    pub fn rules(
        &self,
        regime: TaxRegime,
    ) -> &RegimeRules {
        match regime {
            TaxRegime::Old => &self.old,
            TaxRegime::New => &self.new,
        }
    }

    /// Checks the scalar settings. Slab tables validate themselves on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(ConfigError::InvalidCessRate(self.cess_rate));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(ConfigError::NegativeStandardDeduction(
                self.standard_deduction,
            ));
        }
        for regime in TaxRegime::all() {
            let limit = self.rules(*regime).rebate_limit;
            if limit < Decimal::ZERO {
                return Err(ConfigError::NegativeRebateLimit {
                    regime: *regime,
                    limit,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxSlab;

    fn flat_rules(limit: Decimal) -> RegimeRules {
        RegimeRules {
            rebate_limit: limit,
            slabs: SlabTable::new(vec![TaxSlab::unbounded(dec!(0.10))]).unwrap(),
        }
    }

    fn config() -> TaxConfig {
        TaxConfig {
            cess_rate: dec!(0.04),
            standard_deduction: dec!(50000),
            old: flat_rules(dec!(100)),
            new: flat_rules(dec!(200)),
        }
    }

    #[test]
    fn rules_selects_regime() {
        let config = config();

        assert_eq!(config.rules(TaxRegime::Old).rebate_limit, dec!(100));
        assert_eq!(config.rules(TaxRegime::New).rebate_limit, dec!(200));
    }

    #[test]
    fn validate_accepts_sane_config() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_cess_above_one() {
        let config = TaxConfig {
            cess_rate: dec!(4),
            ..config()
        };

        assert_eq!(config.validate(), Err(ConfigError::InvalidCessRate(dec!(4))));
    }

    #[test]
    fn validate_rejects_negative_rebate_limit() {
        let config = TaxConfig {
            new: flat_rules(dec!(-1)),
            ..config()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeRebateLimit {
                regime: TaxRegime::New,
                limit: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_standard_deduction() {
        let config = TaxConfig {
            standard_deduction: dec!(-50000),
            ..config()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeStandardDeduction(dec!(-50000)))
        );
    }
}
