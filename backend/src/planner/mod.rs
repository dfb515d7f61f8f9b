//! Payment Plan Generator
//!
//! Builds a monthly payment plan for a set of debt instruments and a budget.
//!
//! # Algorithm
//!
//! 1. Keep active instruments with a positive balance
//! 2. Sort them by strategy (see [`Strategy::order`])
//! 3. `effective_budget = max(requested, Σ minimums)`
//! 4. The first instrument gets `minimum + surplus`, every other one its minimum
//! 5. Amortize each instrument independently under its assigned payment
//! 6. Amortize each instrument again under its minimum alone to get the
//!    minimum-only baseline
//!
//! # Critical Invariants
//!
//! 1. `Σ suggested_payment == total_monthly_payment` exactly (integer cents)
//! 2. The plan never pays less than the sum of minimums
//! 3. Degenerate input (nothing owed, non-positive budget) yields an empty
//!    plan, never an error

pub mod strategy;

pub use strategy::Strategy;

use tracing::{debug, trace};

use crate::amortization::{bounded_interest, Payoff};
use crate::models::instrument::DebtInstrument;
use crate::models::plan::{PaymentPlan, PaymentPlanItem, PlanSummary};
use crate::policy::PayoffPolicy;

/// Generate a plan with the default policy
///
/// # Example
/// ```
/// use payoff_core_rs::{planner, DebtInstrument, Strategy};
///
/// let cards = vec![DebtInstrument::new(120_000, 24.0, 500_000).unwrap()];
/// let plan = planner::generate_plan(&cards, 20_000, Strategy::Avalanche);
///
/// assert_eq!(plan.items[0].suggested_payment, 20_000);
/// assert_eq!(plan.summary.months_to_payoff_all.months(), Some(7));
/// ```
pub fn generate_plan(
    instruments: &[DebtInstrument],
    monthly_budget: i64,
    strategy: Strategy,
) -> PaymentPlan {
    generate_plan_with_policy(instruments, monthly_budget, strategy, &PayoffPolicy::default())
}

/// Generate a plan, resolving minimums and divergence bounds through `policy`
pub fn generate_plan_with_policy(
    instruments: &[DebtInstrument],
    monthly_budget: i64,
    strategy: Strategy,
    policy: &PayoffPolicy,
) -> PaymentPlan {
    let mut ordered: Vec<&DebtInstrument> =
        instruments.iter().filter(|i| i.is_plannable()).collect();

    if ordered.is_empty() || monthly_budget <= 0 {
        debug!(
            strategy = %strategy,
            plannable = ordered.len(),
            monthly_budget,
            "nothing to plan, returning empty plan"
        );
        return PaymentPlan::empty(strategy, monthly_budget);
    }

    strategy.order(&mut ordered);

    let minimums: Vec<i64> = ordered.iter().map(|i| policy.minimum_payment(i)).collect();
    let minimum_total: i64 = minimums.iter().sum();
    let effective_budget = monthly_budget.max(minimum_total);
    let surplus = effective_budget - minimum_total;

    if monthly_budget < minimum_total {
        debug!(
            monthly_budget,
            minimum_total, "requested budget below minimum payments, raising to minimums"
        );
    }
    debug!(
        strategy = %strategy,
        instruments = ordered.len(),
        monthly_budget,
        effective_budget,
        surplus,
        "generating payment plan"
    );

    let horizon = policy.divergent_interest_horizon_months;
    let mut items = Vec::with_capacity(ordered.len());
    let mut minimum_only_interest = 0;

    for (index, (instrument, &minimum)) in ordered.iter().zip(&minimums).enumerate() {
        let suggested_payment = if index == 0 { minimum + surplus } else { minimum };

        let (payoff, projected_interest) = bounded_interest(
            instrument.balance(),
            suggested_payment,
            instrument.annual_rate_percent(),
            horizon,
        );
        let (_, baseline_interest) = bounded_interest(
            instrument.balance(),
            minimum,
            instrument.annual_rate_percent(),
            horizon,
        );
        minimum_only_interest += baseline_interest;

        if payoff == Payoff::NeverConverges {
            debug!(
                instrument_id = instrument.id(),
                suggested_payment, "payment does not cover monthly interest"
            );
        }
        trace!(
            instrument_id = instrument.id(),
            order = index + 1,
            suggested_payment,
            ?payoff,
            projected_interest,
            "plan item"
        );

        items.push(PaymentPlanItem {
            instrument_id: instrument.id().to_string(),
            balance: instrument.balance(),
            annual_rate_percent: instrument.annual_rate_percent(),
            minimum_payment: minimum,
            suggested_payment,
            payment_order: index + 1,
            payoff,
            projected_interest,
        });
    }

    let total_interest: i64 = items.iter().map(|item| item.projected_interest).sum();
    let summary = PlanSummary {
        total_debt: ordered.iter().map(|i| i.balance()).sum(),
        requested_budget: monthly_budget,
        total_monthly_payment: effective_budget,
        months_to_payoff_all: items.iter().map(|item| item.payoff).max().unwrap_or_default(),
        total_interest,
        minimum_only_interest,
        savings_vs_minimum_only: minimum_only_interest - total_interest,
    };

    PaymentPlan {
        strategy,
        items,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_and_paid_off_are_skipped() {
        let cards = vec![
            DebtInstrument::new(50_000, 20.0, 100_000).unwrap().with_id("open"),
            DebtInstrument::new(80_000, 25.0, 100_000).unwrap().with_id("closed").inactive(),
            DebtInstrument::new(0, 30.0, 100_000).unwrap().with_id("clear"),
        ];
        let plan = generate_plan(&cards, 10_000, Strategy::Avalanche);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].instrument_id, "open");
        assert_eq!(plan.summary.total_debt, 50_000);
    }

    #[test]
    fn test_surplus_goes_to_first_only() {
        let cards = vec![
            DebtInstrument::new(200_000, 15.0, 500_000).unwrap().with_id("a"),
            DebtInstrument::new(100_000, 25.0, 500_000).unwrap().with_id("b"),
        ];
        let plan = generate_plan(&cards, 20_000, Strategy::Avalanche);
        // minimums: a = 6_000, b = 3_000; surplus = 11_000
        assert_eq!(plan.items[0].instrument_id, "b");
        assert_eq!(plan.items[0].suggested_payment, 14_000);
        assert_eq!(plan.items[1].suggested_payment, 6_000);
        assert_eq!(plan.items[0].payment_order, 1);
        assert_eq!(plan.items[1].payment_order, 2);
    }
}
