//! Payoff Policy Configuration
//!
//! Defines the tunable constants used by the payoff core:
//! - Minimum-payment percentage rule (`minimum_payment_rate`)
//! - Display sentinel for payments that never pay off
//! - Horizon that bounds interest for non-convergent payments
//! - Recommendation thresholds used by the strategy comparator
//!
//! All monetary values in cents/minor units.
//!
//! # Single Source of Truth
//!
//! The 3% minimum-payment rule lives here and nowhere else. Models and
//! planners call [`default_minimum_payment`] or
//! [`PayoffPolicy::minimum_payment`] rather than repeating the constant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::instrument::DebtInstrument;

/// Fraction of the balance charged as a minimum payment when none is recorded
pub const DEFAULT_MINIMUM_PAYMENT_RATE: f64 = 0.03;

/// Minimum payment under the default percentage rule
///
/// # Example
/// ```
/// use payoff_core_rs::policy::default_minimum_payment;
///
/// assert_eq!(default_minimum_payment(10_000), 300); // $100 -> $3
/// ```
pub fn default_minimum_payment(balance: i64) -> i64 {
    minimum_payment_at_rate(balance, DEFAULT_MINIMUM_PAYMENT_RATE)
}

/// Minimum payment as `rate × balance`, rounded to the nearest cent
///
/// A positive balance always owes at least one cent, so balances too small
/// for the percentage to reach a cent still amortize.
pub fn minimum_payment_at_rate(balance: i64, rate: f64) -> i64 {
    if balance <= 0 {
        return 0;
    }
    ((balance as f64 * rate).round() as i64).max(1)
}

/// Errors raised when loading or validating a policy
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Invalid policy: {0}")]
    Invalid(String),

    #[error("Policy parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable payoff policy
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use payoff_core_rs::PayoffPolicy;
///
/// let policy = PayoffPolicy::from_json(r#"{"minimum_payment_rate": 0.02}"#).unwrap();
/// assert_eq!(policy.minimum_payment_rate, 0.02);
/// assert_eq!(policy.never_converges_display_months, 999);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffPolicy {
    /// Fraction of balance used when an instrument has no explicit minimum
    pub minimum_payment_rate: f64,

    /// Months shown for a payment that never pays the balance off
    pub never_converges_display_months: u32,

    /// Months of interest charged against a non-convergent payment
    ///
    /// A payment that does not cover the monthly interest would accrue
    /// interest forever. Plans and the minimum-only baseline instead charge
    /// `balance × monthly_rate × horizon`.
    pub divergent_interest_horizon_months: u32,

    /// Interest delta (cents) above which avalanche is strongly preferred
    pub strong_preference_threshold: i64,

    /// Interest delta (cents) at or below which strategies are "practically equivalent"
    pub practical_equivalence_threshold: i64,
}

impl Default for PayoffPolicy {
    fn default() -> Self {
        Self {
            minimum_payment_rate: DEFAULT_MINIMUM_PAYMENT_RATE,
            never_converges_display_months: 999,
            divergent_interest_horizon_months: 360, // 30 years
            strong_preference_threshold: 100_000,   // $1,000
            practical_equivalence_threshold: 10_000, // $100
        }
    }
}

impl PayoffPolicy {
    /// Parse and validate a policy from JSON
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: PayoffPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that every field is in range
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(self.minimum_payment_rate > 0.0 && self.minimum_payment_rate <= 1.0) {
            return Err(PolicyError::Invalid(format!(
                "minimum_payment_rate must be in (0, 1], got {}",
                self.minimum_payment_rate
            )));
        }
        if self.divergent_interest_horizon_months == 0 {
            return Err(PolicyError::Invalid(
                "divergent_interest_horizon_months must be positive".to_string(),
            ));
        }
        if self.practical_equivalence_threshold < 0 || self.strong_preference_threshold < 0 {
            return Err(PolicyError::Invalid(
                "recommendation thresholds must be non-negative".to_string(),
            ));
        }
        if self.practical_equivalence_threshold > self.strong_preference_threshold {
            return Err(PolicyError::Invalid(format!(
                "practical_equivalence_threshold ({}) exceeds strong_preference_threshold ({})",
                self.practical_equivalence_threshold, self.strong_preference_threshold
            )));
        }
        Ok(())
    }

    /// Minimum payment for an instrument under this policy
    ///
    /// An explicit minimum always wins over the percentage rule.
    pub fn minimum_payment(&self, instrument: &DebtInstrument) -> i64 {
        instrument
            .explicit_minimum_payment()
            .unwrap_or_else(|| minimum_payment_at_rate(instrument.balance(), self.minimum_payment_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default() {
        let policy = PayoffPolicy::default();
        assert_eq!(policy.minimum_payment_rate, 0.03);
        assert_eq!(policy.never_converges_display_months, 999);
        assert_eq!(policy.divergent_interest_horizon_months, 360);
        assert_eq!(policy.strong_preference_threshold, 100_000);
        assert_eq!(policy.practical_equivalence_threshold, 10_000);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_default_minimum_payment_rounds_to_cent() {
        assert_eq!(default_minimum_payment(0), 0);
        assert_eq!(default_minimum_payment(10_000), 300);
        assert_eq!(default_minimum_payment(12_345), 370); // 370.35
        assert_eq!(default_minimum_payment(12_350), 371); // 370.5 rounds up
    }

    #[test]
    fn test_default_minimum_payment_floor_is_one_cent() {
        assert_eq!(default_minimum_payment(1), 1);
        assert_eq!(default_minimum_payment(10), 1);
        assert_eq!(default_minimum_payment(16), 1);
        assert_eq!(default_minimum_payment(17), 1); // 0.51 rounds up
        assert_eq!(default_minimum_payment(50), 2); // 1.5 rounds up
        assert_eq!(minimum_payment_at_rate(-100, 0.03), 0);
    }

    #[test]
    fn test_policy_minimum_prefers_explicit() {
        let policy = PayoffPolicy {
            minimum_payment_rate: 0.05,
            ..PayoffPolicy::default()
        };
        let card = DebtInstrument::new(100_000, 20.0, 200_000).unwrap();
        assert_eq!(policy.minimum_payment(&card), 5_000);

        let card = card.with_minimum_payment(2_000);
        assert_eq!(policy.minimum_payment(&card), 2_000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_rate = PayoffPolicy {
            minimum_payment_rate: 0.0,
            ..PayoffPolicy::default()
        };
        assert!(matches!(bad_rate.validate(), Err(PolicyError::Invalid(_))));

        let bad_horizon = PayoffPolicy {
            divergent_interest_horizon_months: 0,
            ..PayoffPolicy::default()
        };
        assert!(bad_horizon.validate().is_err());

        let inverted = PayoffPolicy {
            practical_equivalence_threshold: 200_000,
            ..PayoffPolicy::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            PayoffPolicy::from_json("{not json"),
            Err(PolicyError::Parse(_))
        ));
        assert!(matches!(
            PayoffPolicy::from_json(r#"{"minimum_payment_rate": 2.0}"#),
            Err(PolicyError::Invalid(_))
        ));
    }

    #[test]
    fn test_policy_serialize_deserialize() {
        let policy = PayoffPolicy::default();
        let json = serde_json::to_string(&policy).unwrap();
        let restored: PayoffPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, restored);
    }
}
