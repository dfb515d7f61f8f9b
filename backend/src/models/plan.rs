//! Payment plan model
//!
//! Computed views produced by the planner. Nothing here is persisted by the
//! core; see `snapshot` for storing a plan alongside its input fingerprint.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};

use crate::amortization::Payoff;
use crate::planner::Strategy;

/// One row of a payment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanItem {
    pub instrument_id: String,

    /// Balance at plan-generation time
    pub balance: i64,

    /// Rate at plan-generation time
    pub annual_rate_percent: f64,

    /// Minimum payment this instrument was charged
    pub minimum_payment: i64,

    /// Minimum plus, for the priority instrument, the whole surplus
    pub suggested_payment: i64,

    /// 1-based priority rank under the plan's strategy
    pub payment_order: usize,

    pub payoff: Payoff,

    /// Simulated interest under `suggested_payment`
    pub projected_interest: i64,
}

/// Plan-level totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Sum of original balances
    pub total_debt: i64,

    /// Monthly amount the caller asked to spend
    pub requested_budget: i64,

    /// Effective monthly budget: `max(requested_budget, Σ minimums)`
    pub total_monthly_payment: i64,

    /// Worst item payoff
    pub months_to_payoff_all: Payoff,

    /// Sum of per-item projected interest
    pub total_interest: i64,

    /// Interest if every instrument paid only its minimum
    pub minimum_only_interest: i64,

    /// `minimum_only_interest - total_interest`
    pub savings_vs_minimum_only: i64,
}

impl PlanSummary {
    /// The requested budget did not cover the minimum payments
    pub fn is_underfunded(&self) -> bool {
        self.requested_budget < self.total_monthly_payment
    }
}

/// Plan for a single strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub strategy: Strategy,

    /// Items in priority order
    pub items: Vec<PaymentPlanItem>,

    pub summary: PlanSummary,
}

impl PaymentPlan {
    /// Plan with no items and a zeroed summary
    pub fn empty(strategy: Strategy, requested_budget: i64) -> Self {
        Self {
            strategy,
            items: Vec::new(),
            summary: PlanSummary {
                requested_budget,
                ..PlanSummary::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every item pays its balance off in finite time
    pub fn converges(&self) -> bool {
        self.summary.months_to_payoff_all.is_converging()
    }

    /// Item for a given instrument id
    pub fn item(&self, instrument_id: &str) -> Option<&PaymentPlanItem> {
        self.items.iter().find(|item| item.instrument_id == instrument_id)
    }

    /// Items whose suggested payment never clears the balance
    pub fn non_converging_items(&self) -> impl Iterator<Item = &PaymentPlanItem> {
        self.items.iter().filter(|item| !item.payoff.is_converging())
    }
}
