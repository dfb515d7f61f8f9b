//! Domain models for the payoff core

pub mod instrument;
pub mod plan;

// Re-exports
pub use instrument::{DebtInstrument, InstrumentError};
pub use plan::{PaymentPlan, PaymentPlanItem, PlanSummary};
