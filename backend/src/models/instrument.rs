//! Debt instrument model
//!
//! Represents one revolving-credit account (typically a credit card).
//! Each instrument has:
//! - Outstanding balance (i64 cents)
//! - Fixed annual interest rate (percent)
//! - Credit limit (i64 cents), used only for utilization
//! - Optional explicit minimum payment (i64 cents)
//! - Active flag (inactive instruments are ignored by all computations)
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::policy::default_minimum_payment;

/// Errors raised when building or mutating an instrument
#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error("Balance must be non-negative, got {0}")]
    NegativeBalance(i64),

    #[error("Annual rate must be a finite non-negative percentage, got {0}")]
    InvalidRate(f64),

    #[error("Credit limit must be positive, got {0}")]
    NonPositiveCreditLimit(i64),

    #[error("Minimum payment must be non-negative, got {0}")]
    NegativeMinimumPayment(i64),

    #[error("Payment amount must be positive")]
    NonPositivePayment,

    #[error("Payment amount {amount} exceeds outstanding balance {balance}")]
    PaymentExceedsBalance { amount: i64, balance: i64 },
}

/// A revolving-credit account that can be planned against
///
/// # Example
/// ```
/// use payoff_core_rs::DebtInstrument;
///
/// let mut card = DebtInstrument::new(120_000, 24.0, 500_000)
///     .unwrap()
///     .with_id("visa");
/// assert_eq!(card.balance(), 120_000); // $1,200.00 in cents
/// assert_eq!(card.minimum_payment(), 3_600); // 3% default
///
/// card.record_payment(20_000).unwrap();
/// assert_eq!(card.balance(), 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInstrument {
    /// Stable identifier (UUID unless supplied by the caller)
    id: String,

    /// Outstanding balance (i64 cents)
    balance: i64,

    /// Annual interest rate as a percentage (e.g. 24.0 = 24% APR)
    annual_rate_percent: f64,

    /// Credit limit (i64 cents)
    credit_limit: i64,

    /// Explicit minimum payment. `None` falls back to the percentage rule.
    #[serde(default)]
    minimum_payment: Option<i64>,

    /// Inactive instruments are excluded from metrics and plans
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl DebtInstrument {
    /// Create a new active instrument with a generated id
    ///
    /// # Arguments
    /// * `balance` - Outstanding balance in cents (>= 0)
    /// * `annual_rate_percent` - Annual rate as a percentage (>= 0)
    /// * `credit_limit` - Credit limit in cents (> 0)
    ///
    /// # Errors
    /// Returns an [`InstrumentError`] when any argument is out of range.
    pub fn new(
        balance: i64,
        annual_rate_percent: f64,
        credit_limit: i64,
    ) -> Result<Self, InstrumentError> {
        let instrument = Self {
            id: Uuid::new_v4().to_string(),
            balance,
            annual_rate_percent,
            credit_limit,
            minimum_payment: None,
            active: true,
        };
        instrument.validate()?;
        Ok(instrument)
    }

    /// Replace the generated id with a caller-supplied one
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set an explicit minimum payment (cents)
    ///
    /// Negative values are rejected by [`DebtInstrument::validate`].
    pub fn with_minimum_payment(mut self, minimum_payment: i64) -> Self {
        self.minimum_payment = Some(minimum_payment);
        self
    }

    /// Mark the instrument as inactive (closed, archived, ...)
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check the data-entry invariants
    ///
    /// Deserialized instruments bypass [`DebtInstrument::new`], so callers
    /// loading instruments from storage should run this before planning.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if self.balance < 0 {
            return Err(InstrumentError::NegativeBalance(self.balance));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(InstrumentError::InvalidRate(self.annual_rate_percent));
        }
        if self.credit_limit <= 0 {
            return Err(InstrumentError::NonPositiveCreditLimit(self.credit_limit));
        }
        if let Some(min) = self.minimum_payment {
            if min < 0 {
                return Err(InstrumentError::NegativeMinimumPayment(min));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn credit_limit(&self) -> i64 {
        self.credit_limit
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Explicit minimum payment, if one was recorded
    pub fn explicit_minimum_payment(&self) -> Option<i64> {
        self.minimum_payment
    }

    /// Minimum payment using the default percentage rule when none is recorded
    pub fn minimum_payment(&self) -> i64 {
        self.minimum_payment
            .unwrap_or_else(|| default_minimum_payment(self.balance))
    }

    /// Active and carrying a balance, i.e. something to amortize
    pub fn is_plannable(&self) -> bool {
        self.active && self.balance > 0
    }

    /// Active with nothing left to pay
    pub fn is_paid_off(&self) -> bool {
        self.active && self.balance == 0
    }

    /// Balance as a percentage of the credit limit
    pub fn utilization_percent(&self) -> f64 {
        if self.credit_limit <= 0 {
            return 0.0;
        }
        self.balance as f64 * 100.0 / self.credit_limit as f64
    }

    /// Apply a payment against the balance
    ///
    /// This is the only operation that changes the balance.
    ///
    /// # Errors
    /// - [`InstrumentError::NonPositivePayment`] if `amount <= 0`
    /// - [`InstrumentError::PaymentExceedsBalance`] if `amount > balance`
    pub fn record_payment(&mut self, amount: i64) -> Result<(), InstrumentError> {
        if amount <= 0 {
            return Err(InstrumentError::NonPositivePayment);
        }
        if amount > self.balance {
            return Err(InstrumentError::PaymentExceedsBalance {
                amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let a = DebtInstrument::new(1_000, 10.0, 10_000).unwrap();
        let b = DebtInstrument::new(1_000, 10.0, 10_000).unwrap();
        assert_ne!(a.id(), b.id());
        assert!(a.is_active());
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert_eq!(
            DebtInstrument::new(-1, 10.0, 10_000).unwrap_err(),
            InstrumentError::NegativeBalance(-1)
        );
        assert!(matches!(
            DebtInstrument::new(1_000, -0.5, 10_000).unwrap_err(),
            InstrumentError::InvalidRate(_)
        ));
        assert!(matches!(
            DebtInstrument::new(1_000, f64::NAN, 10_000).unwrap_err(),
            InstrumentError::InvalidRate(_)
        ));
        assert_eq!(
            DebtInstrument::new(1_000, 10.0, 0).unwrap_err(),
            InstrumentError::NonPositiveCreditLimit(0)
        );
    }

    #[test]
    fn test_minimum_payment_defaults_to_three_percent() {
        let card = DebtInstrument::new(10_000, 0.0, 50_000).unwrap();
        assert_eq!(card.minimum_payment(), 300);
        assert_eq!(card.explicit_minimum_payment(), None);

        let card = card.with_minimum_payment(2_500);
        assert_eq!(card.minimum_payment(), 2_500);
    }

    #[test]
    fn test_zero_balance_is_paid_off_not_plannable() {
        let card = DebtInstrument::new(0, 18.0, 50_000).unwrap();
        assert!(card.is_paid_off());
        assert!(!card.is_plannable());

        let closed = DebtInstrument::new(0, 18.0, 50_000).unwrap().inactive();
        assert!(!closed.is_paid_off());
    }

    #[test]
    fn test_record_payment() {
        let mut card = DebtInstrument::new(5_000, 18.0, 50_000).unwrap();
        assert_eq!(card.record_payment(0), Err(InstrumentError::NonPositivePayment));
        assert_eq!(
            card.record_payment(6_000),
            Err(InstrumentError::PaymentExceedsBalance {
                amount: 6_000,
                balance: 5_000
            })
        );
        card.record_payment(5_000).unwrap();
        assert_eq!(card.balance(), 0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":"amex","balance":2500,"annual_rate_percent":21.5,"credit_limit":10000}"#;
        let card: DebtInstrument = serde_json::from_str(json).unwrap();
        assert_eq!(card.id(), "amex");
        assert!(card.is_active());
        assert_eq!(card.explicit_minimum_payment(), None);
        assert_eq!(card.utilization_percent(), 25.0);
        assert!(card.validate().is_ok());
    }
}
