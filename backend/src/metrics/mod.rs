//! Metrics Aggregator
//!
//! Aggregate exposure across a set of debt instruments: total balance,
//! total limit, utilization, weighted-average rate, projected monthly
//! interest and the sum of minimum payments.
//!
//! Pure function of its input. Inactive instruments never count.

use serde::{Deserialize, Serialize};

use crate::amortization::monthly_rate;
use crate::models::instrument::DebtInstrument;
use crate::policy::PayoffPolicy;

/// Credit utilization band (presentation only, never used in payoff math)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    /// 0-10%
    Excellent,
    /// 10-30%
    Good,
    /// 30-50%
    Warning,
    /// Above 50%
    Danger,
}

impl UtilizationBand {
    /// Classify a utilization percentage
    pub fn from_percent(utilization_percent: f64) -> Self {
        if utilization_percent <= 10.0 {
            UtilizationBand::Excellent
        } else if utilization_percent <= 30.0 {
            UtilizationBand::Good
        } else if utilization_percent <= 50.0 {
            UtilizationBand::Warning
        } else {
            UtilizationBand::Danger
        }
    }
}

/// Aggregate exposure across instruments
///
/// Money fields are i64 cents; `projected_monthly_interest` is rounded to
/// the cent after summing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebtMetrics {
    pub total_debt: i64,
    pub total_limit: i64,
    pub utilization_percent: f64,
    pub weighted_average_rate: f64,
    pub projected_monthly_interest: i64,
    pub minimum_payment_total: i64,
    /// Instruments included in the figures above
    pub instrument_count: usize,
    /// Active instruments with a zero balance
    pub paid_off_count: usize,
}

impl DebtMetrics {
    pub fn utilization_band(&self) -> UtilizationBand {
        UtilizationBand::from_percent(self.utilization_percent)
    }
}

/// Aggregate metrics using the default policy
///
/// # Example
/// ```
/// use payoff_core_rs::{metrics, DebtInstrument};
///
/// let cards = vec![
///     DebtInstrument::new(500_000, 29.99, 1_000_000).unwrap(),
///     DebtInstrument::new(100_000, 19.99, 500_000).unwrap(),
/// ];
/// let m = metrics::aggregate(&cards);
/// assert_eq!(m.total_debt, 600_000);
/// assert_eq!(m.instrument_count, 2);
/// ```
pub fn aggregate(instruments: &[DebtInstrument]) -> DebtMetrics {
    aggregate_with_policy(instruments, &PayoffPolicy::default())
}

/// Aggregate metrics, resolving missing minimums through `policy`
///
/// Only active instruments with a positive balance contribute. When none
/// do, the result is zeroed except for `total_limit` and
/// `instrument_count`, which then describe every active instrument.
pub fn aggregate_with_policy(instruments: &[DebtInstrument], policy: &PayoffPolicy) -> DebtMetrics {
    let active: Vec<&DebtInstrument> = instruments.iter().filter(|i| i.is_active()).collect();
    let paid_off_count = active.iter().filter(|i| i.is_paid_off()).count();
    let owing: Vec<&DebtInstrument> = active.iter().copied().filter(|i| i.balance() > 0).collect();

    if owing.is_empty() {
        return DebtMetrics {
            total_limit: active.iter().map(|i| i.credit_limit()).sum(),
            instrument_count: active.len(),
            paid_off_count,
            ..DebtMetrics::default()
        };
    }

    let total_debt: i64 = owing.iter().map(|i| i.balance()).sum();
    let total_limit: i64 = owing.iter().map(|i| i.credit_limit()).sum();

    let utilization_percent = if total_limit == 0 {
        0.0
    } else {
        total_debt as f64 * 100.0 / total_limit as f64
    };

    let rate_weighted_sum: f64 = owing
        .iter()
        .map(|i| i.annual_rate_percent() * i.balance() as f64)
        .sum();

    let monthly_interest: f64 = owing
        .iter()
        .map(|i| i.balance() as f64 * monthly_rate(i.annual_rate_percent()))
        .sum();

    DebtMetrics {
        total_debt,
        total_limit,
        utilization_percent,
        weighted_average_rate: rate_weighted_sum / total_debt as f64,
        projected_monthly_interest: monthly_interest.round() as i64,
        minimum_payment_total: owing.iter().map(|i| policy.minimum_payment(i)).sum(),
        instrument_count: owing.len(),
        paid_off_count,
    }
}
