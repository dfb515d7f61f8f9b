//! Strategy Comparator
//!
//! Runs the planner under both strategies and recommends one based on the
//! interest difference.
//!
//! # Recommendation thresholds
//!
//! With `delta = snowball.total_interest - avalanche.total_interest` and the
//! thresholds from [`PayoffPolicy`] (defaults $1,000 and $100):
//!
//! | delta                          | kind                    | preferred |
//! |--------------------------------|-------------------------|-----------|
//! | `> strong`                     | `StronglyAvalanche`     | avalanche |
//! | `(equivalence, strong]`        | `EitherWorks`           | avalanche |
//! | `(0, equivalence]`             | `PracticallyEquivalent` | snowball  |
//! | `<= 0`                         | `Snowball`              | snowball  |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::instrument::DebtInstrument;
use crate::models::plan::PaymentPlan;
use crate::planner::{generate_plan_with_policy, Strategy};
use crate::policy::PayoffPolicy;

/// Which recommendation band the interest delta fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    StronglyAvalanche,
    EitherWorks,
    PracticallyEquivalent,
    Snowball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub preferred: Strategy,
    pub kind: RecommendationKind,
    pub message: String,
}

/// Both plans side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PaymentPlan,
    pub snowball: PaymentPlan,

    /// `snowball.total_interest - avalanche.total_interest` (cents)
    pub interest_delta: i64,

    /// `snowball months - avalanche months`, when both plans converge
    pub months_delta: Option<i64>,

    pub recommendation: Recommendation,
}

impl StrategyComparison {
    /// Plan for the recommended strategy
    pub fn preferred_plan(&self) -> &PaymentPlan {
        match self.recommendation.preferred {
            Strategy::Avalanche => &self.avalanche,
            Strategy::Snowball => &self.snowball,
        }
    }
}

/// Compare strategies with the default policy
///
/// # Example
/// ```
/// use payoff_core_rs::{comparator, DebtInstrument, Strategy};
///
/// let cards = vec![
///     DebtInstrument::new(500_000, 29.99, 1_000_000).unwrap().with_minimum_payment(15_000),
///     DebtInstrument::new(100_000, 19.99, 500_000).unwrap().with_minimum_payment(5_000),
/// ];
/// let comparison = comparator::compare(&cards, 50_000);
/// assert!(comparison.interest_delta > 0);
/// assert_eq!(comparison.recommendation.preferred, Strategy::Avalanche);
/// ```
pub fn compare(instruments: &[DebtInstrument], monthly_budget: i64) -> StrategyComparison {
    compare_with_policy(instruments, monthly_budget, &PayoffPolicy::default())
}

/// Compare strategies under an explicit policy
pub fn compare_with_policy(
    instruments: &[DebtInstrument],
    monthly_budget: i64,
    policy: &PayoffPolicy,
) -> StrategyComparison {
    let avalanche = generate_plan_with_policy(instruments, monthly_budget, Strategy::Avalanche, policy);
    let snowball = generate_plan_with_policy(instruments, monthly_budget, Strategy::Snowball, policy);

    let interest_delta = snowball.summary.total_interest - avalanche.summary.total_interest;
    let months_delta = match (
        snowball.summary.months_to_payoff_all.months(),
        avalanche.summary.months_to_payoff_all.months(),
    ) {
        (Some(s), Some(a)) => Some(i64::from(s) - i64::from(a)),
        _ => None,
    };

    let recommendation = recommend(interest_delta, policy);
    debug!(
        interest_delta,
        ?months_delta,
        preferred = %recommendation.preferred,
        kind = ?recommendation.kind,
        "compared payoff strategies"
    );

    StrategyComparison {
        avalanche,
        snowball,
        interest_delta,
        months_delta,
        recommendation,
    }
}

/// Pick a recommendation for an interest delta (cents)
pub fn recommend(interest_delta: i64, policy: &PayoffPolicy) -> Recommendation {
    let savings = format_dollars(interest_delta);

    if interest_delta > policy.strong_preference_threshold {
        Recommendation {
            preferred: Strategy::Avalanche,
            kind: RecommendationKind::StronglyAvalanche,
            message: format!(
                "Avalanche saves you {} in interest. Pay the highest-rate card first.",
                savings
            ),
        }
    } else if interest_delta > policy.practical_equivalence_threshold {
        Recommendation {
            preferred: Strategy::Avalanche,
            kind: RecommendationKind::EitherWorks,
            message: format!(
                "Avalanche saves {} in interest, but snowball's quick wins can help you stay motivated. Either works.",
                savings
            ),
        }
    } else if interest_delta > 0 {
        Recommendation {
            preferred: Strategy::Snowball,
            kind: RecommendationKind::PracticallyEquivalent,
            message: format!(
                "Both strategies are practically equivalent (only {} apart). Snowball clears balances sooner and keeps motivation up.",
                savings
            ),
        }
    } else {
        Recommendation {
            preferred: Strategy::Snowball,
            kind: RecommendationKind::Snowball,
            message: "Snowball costs no more interest than avalanche here. Pay the smallest balance first."
                .to_string(),
        }
    }
}

/// Format cents as a dollar string with thousands separators ("$1,234.56")
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, abs % 100)
}
