//! Payoff Core - Rust Engine
//!
//! Credit-card debt payoff planning: amortization, exposure metrics,
//! avalanche/snowball payment plans and strategy comparison.
//!
//! # Architecture
//!
//! - **amortization**: Months-to-payoff, interest totals and schedules
//! - **metrics**: Aggregate exposure across instruments
//! - **planner**: Payment plan generation per strategy
//! - **comparator**: Avalanche vs snowball with a recommendation
//! - **models**: Domain types (DebtInstrument, PaymentPlan)
//! - **policy**: Tunable constants (minimum-payment rule, thresholds)
//! - **snapshot**: Plans stored with a fingerprint of their inputs
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Every computation is a pure function of its arguments
//! 3. Degenerate input and non-convergent payments are values, never errors

// Module declarations
pub mod amortization;
pub mod comparator;
pub mod metrics;
pub mod models;
pub mod planner;
pub mod policy;
pub mod snapshot;

// Re-exports for convenience
pub use amortization::{
    amortization_schedule, bounded_interest, checked_amortization_schedule, months_to_payoff,
    total_interest, Payoff, ScheduleInputError, ScheduleRow,
};
pub use comparator::{compare, compare_with_policy, Recommendation, RecommendationKind, StrategyComparison};
pub use metrics::{aggregate, aggregate_with_policy, DebtMetrics, UtilizationBand};
pub use models::{
    instrument::{DebtInstrument, InstrumentError},
    plan::{PaymentPlan, PaymentPlanItem, PlanSummary},
};
pub use planner::{generate_plan, generate_plan_with_policy, Strategy};
pub use policy::{default_minimum_payment, PayoffPolicy, PolicyError};
pub use snapshot::{PlanSnapshot, SnapshotError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn payoff_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::planner::PyPayoffPlanner>()?;
    Ok(())
}
