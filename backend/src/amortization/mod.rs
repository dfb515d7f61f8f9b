//! Amortization Calculator
//!
//! Month-by-month amortization of a single balance under a fixed monthly
//! payment and a fixed annual rate.
//!
//! # Conventions
//!
//! - Balances and payments are i64 cents
//! - Rates are annual percentages; the monthly rate is `annual / 12 / 100`
//! - Interest is accumulated in f64 and rounded to the cent once, at the end
//!
//! # Non-convergence
//!
//! A payment that does not exceed the first month's interest never pays the
//! balance off. That outcome is a value ([`Payoff::NeverConverges`]), not an
//! error.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Outcome of amortizing a balance
///
/// Ordered so that `NeverConverges` is greater than any finite month count,
/// which makes `max` over a plan's items do the right thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "months", rename_all = "snake_case")]
pub enum Payoff {
    /// Paid off after this many monthly payments (0 = nothing to pay)
    Converges(u32),
    /// The payment never reduces the balance
    NeverConverges,
}

impl Payoff {
    /// Month count, or `None` if the balance is never paid off
    pub fn months(&self) -> Option<u32> {
        match self {
            Payoff::Converges(months) => Some(*months),
            Payoff::NeverConverges => None,
        }
    }

    pub fn is_converging(&self) -> bool {
        matches!(self, Payoff::Converges(_))
    }

    /// Month count for presentation, substituting `sentinel` for "never"
    pub fn display_months(&self, sentinel: u32) -> u32 {
        self.months().unwrap_or(sentinel)
    }
}

impl Ord for Payoff {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Payoff::Converges(a), Payoff::Converges(b)) => a.cmp(b),
            (Payoff::Converges(_), Payoff::NeverConverges) => Ordering::Less,
            (Payoff::NeverConverges, Payoff::Converges(_)) => Ordering::Greater,
            (Payoff::NeverConverges, Payoff::NeverConverges) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Payoff {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Payoff {
    fn default() -> Self {
        Payoff::Converges(0)
    }
}

/// Convert an annual percentage rate to a monthly fraction
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Number of monthly payments needed to clear `balance`
///
/// # Rules
/// 1. Non-positive payment or balance: `Converges(0)`
/// 2. Balance covered by one payment: `Converges(1)`
/// 3. Zero rate: `ceil(balance / payment)`
/// 4. Payment not exceeding the first month's interest: `NeverConverges`
/// 5. Otherwise the annuity inversion
///    `ceil(-ln(1 - r·B/P) / ln(1 + r))`
///
/// # Example
/// ```
/// use payoff_core_rs::amortization::{months_to_payoff, Payoff};
///
/// // $1,200 at 24% APR paying $200/month
/// assert_eq!(months_to_payoff(120_000, 20_000, 24.0), Payoff::Converges(7));
///
/// // $10,000 at 24% APR paying $150/month never pays off ($200 interest/month)
/// assert_eq!(months_to_payoff(1_000_000, 15_000, 24.0), Payoff::NeverConverges);
/// ```
pub fn months_to_payoff(balance: i64, monthly_payment: i64, annual_rate_percent: f64) -> Payoff {
    if monthly_payment <= 0 || balance <= 0 {
        return Payoff::Converges(0);
    }
    if balance <= monthly_payment {
        return Payoff::Converges(1);
    }

    let balance = balance as f64;
    let payment = monthly_payment as f64;
    let rate = monthly_rate(annual_rate_percent);

    if rate == 0.0 {
        return converged_after((balance / payment).ceil());
    }

    if payment <= balance * rate {
        return Payoff::NeverConverges;
    }

    let ratio = rate * balance / payment;
    if ratio >= 1.0 {
        return Payoff::NeverConverges;
    }

    let months = (-(1.0 - ratio).ln() / (1.0 + rate).ln()).ceil();
    converged_after(months)
}

/// Wraps a whole month count, treating anything past `u32::MAX` months as
/// never paying off
fn converged_after(months: f64) -> Payoff {
    if months.is_finite() && months <= u32::MAX as f64 {
        Payoff::Converges(months as u32)
    } else {
        Payoff::NeverConverges
    }
}

/// Total interest paid while amortizing `balance` over `payoff` months
///
/// Returns 0 for `NeverConverges` and for zero months. Otherwise simulates
/// month by month until either `months` payments were made or the balance
/// reached zero, and rounds the accumulated interest to the cent.
///
/// # Example
/// ```
/// use payoff_core_rs::amortization::{months_to_payoff, total_interest};
///
/// let payoff = months_to_payoff(120_000, 20_000, 24.0);
/// assert_eq!(total_interest(120_000, 20_000, 24.0, payoff), 9_157); // $91.57
/// ```
pub fn total_interest(
    balance: i64,
    monthly_payment: i64,
    annual_rate_percent: f64,
    payoff: Payoff,
) -> i64 {
    let months = match payoff {
        Payoff::NeverConverges | Payoff::Converges(0) => return 0,
        Payoff::Converges(months) => months,
    };

    let rate = monthly_rate(annual_rate_percent);
    let payment = monthly_payment as f64;
    let mut remaining = balance as f64;
    let mut interest_total = 0.0;

    for _ in 0..months {
        if remaining <= 0.0 {
            break;
        }
        let interest = remaining * rate;
        let principal = remaining.min(payment - interest);
        remaining -= principal;
        interest_total += interest;
    }

    interest_total.round() as i64
}

/// Interest charged for a payment, bounded for non-convergent payments
///
/// Matches [`total_interest`] whenever the payment pays the balance off.
/// For a non-convergent payment, charges the interest of the frozen balance
/// over `horizon_months`: `round(balance × monthly_rate × horizon)`.
pub fn bounded_interest(
    balance: i64,
    monthly_payment: i64,
    annual_rate_percent: f64,
    horizon_months: u32,
) -> (Payoff, i64) {
    let payoff = months_to_payoff(balance, monthly_payment, annual_rate_percent);
    let interest = match payoff {
        Payoff::Converges(_) => total_interest(balance, monthly_payment, annual_rate_percent, payoff),
        Payoff::NeverConverges => {
            let monthly_interest = balance as f64 * monthly_rate(annual_rate_percent);
            (monthly_interest * horizon_months as f64).round() as i64
        }
    };
    (payoff, interest)
}

/// One month of an amortization schedule (all amounts in cents)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number
    pub month: u32,
    /// Amount paid this month (interest + principal)
    pub payment: i64,
    pub interest: i64,
    pub principal: i64,
    /// Balance left after this month's payment
    pub remaining_balance: i64,
}

/// Month-by-month breakdown of an amortization
///
/// Follows the same simulation as [`total_interest`]: interest accrues on
/// the remaining balance and the rest of the payment goes to principal,
/// capped at the remaining balance. Stops when the balance is cleared or
/// after `max_months` rows, so a non-convergent payment yields exactly
/// `max_months` rows with a growing balance.
///
/// Amounts are rounded per row for display; the running balance is carried
/// at full precision.
pub fn amortization_schedule(
    balance: i64,
    monthly_payment: i64,
    annual_rate_percent: f64,
    max_months: u32,
) -> Vec<ScheduleRow> {
    let mut rows = Vec::new();
    if balance <= 0 || monthly_payment <= 0 {
        return rows;
    }

    let rate = monthly_rate(annual_rate_percent);
    let payment = monthly_payment as f64;
    let mut remaining = balance as f64;

    for month in 1..=max_months {
        // Sub-cent residue left by float arithmetic counts as paid.
        if remaining < 0.5 {
            break;
        }
        let interest = remaining * rate;
        let principal = remaining.min(payment - interest);
        remaining -= principal;

        rows.push(ScheduleRow {
            month,
            payment: (interest + principal).round() as i64,
            interest: interest.round() as i64,
            principal: principal.round() as i64,
            remaining_balance: remaining.max(0.0).round() as i64,
        });
    }

    rows
}

/// Rejected inputs for [`checked_amortization_schedule`]
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleInputError {
    #[error("Balance must be non-negative, got {0}")]
    NegativeBalance(i64),

    #[error("Monthly payment must be non-negative, got {0}")]
    NegativePayment(i64),

    #[error("Annual rate must be a finite, non-negative percentage, got {0}")]
    InvalidRate(f64),
}

/// [`amortization_schedule`] for untrusted input
///
/// Negative amounts and negative or non-finite rates are rejected instead of
/// silently producing an empty or meaningless schedule.
pub fn checked_amortization_schedule(
    balance: i64,
    monthly_payment: i64,
    annual_rate_percent: f64,
    max_months: u32,
) -> Result<Vec<ScheduleRow>, ScheduleInputError> {
    if balance < 0 {
        return Err(ScheduleInputError::NegativeBalance(balance));
    }
    if monthly_payment < 0 {
        return Err(ScheduleInputError::NegativePayment(monthly_payment));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(ScheduleInputError::InvalidRate(annual_rate_percent));
    }
    Ok(amortization_schedule(
        balance,
        monthly_payment,
        annual_rate_percent,
        max_months,
    ))
}
