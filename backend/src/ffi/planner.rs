//! PyO3 wrapper for the payoff core
//!
//! This module provides the Python interface to metrics, plans, strategy
//! comparisons and amortization schedules.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::amortization;
use crate::comparator;
use crate::metrics;
use crate::models::instrument::DebtInstrument;
use crate::planner::{self, Strategy};
use crate::policy::PayoffPolicy;

fn value_error(msg: String) -> PyErr {
    PyErr::new::<PyValueError, _>(msg)
}

/// Parse and validate a JSON array of instruments
fn parse_instruments(instruments_json: &str) -> PyResult<Vec<DebtInstrument>> {
    let instruments: Vec<DebtInstrument> = serde_json::from_str(instruments_json)
        .map_err(|e| value_error(format!("Invalid instruments JSON: {}", e)))?;
    for instrument in &instruments {
        instrument
            .validate()
            .map_err(|e| value_error(format!("Instrument '{}': {}", instrument.id(), e)))?;
    }
    Ok(instruments)
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| value_error(format!("Serialization failed: {}", e)))
}

/// Python wrapper holding a payoff policy
///
/// # Example (from Python)
///
/// ```python
/// from payoff._core import PayoffPlanner
///
/// planner = PayoffPlanner()            # default policy
/// cards = json.dumps([
///     {"id": "visa", "balance": 500_000, "annual_rate_percent": 29.99,
///      "credit_limit": 1_000_000, "minimum_payment": 15_000},
/// ])
/// comparison = json.loads(planner.compare(cards, 50_000))
/// print(comparison["recommendation"]["message"])
/// ```
#[pyclass(name = "PayoffPlanner")]
pub struct PyPayoffPlanner {
    policy: PayoffPolicy,
}

#[pymethods]
impl PyPayoffPlanner {
    /// Create a planner, optionally from a JSON policy document
    ///
    /// # Errors
    ///
    /// Raises ValueError if the policy JSON is malformed or out of range
    #[new]
    #[pyo3(signature = (policy_json=None))]
    fn new(policy_json: Option<&str>) -> PyResult<Self> {
        let policy = match policy_json {
            Some(json) => PayoffPolicy::from_json(json).map_err(|e| value_error(e.to_string()))?,
            None => PayoffPolicy::default(),
        };
        Ok(PyPayoffPlanner { policy })
    }

    /// Aggregate metrics for a JSON array of instruments
    fn metrics(&self, instruments_json: &str) -> PyResult<String> {
        let instruments = parse_instruments(instruments_json)?;
        to_json(&metrics::aggregate_with_policy(&instruments, &self.policy))
    }

    /// Payment plan for one strategy ("avalanche" or "snowball")
    fn plan(&self, instruments_json: &str, monthly_budget: i64, strategy: &str) -> PyResult<String> {
        let instruments = parse_instruments(instruments_json)?;
        let strategy: Strategy = strategy.parse().map_err(value_error)?;
        to_json(&planner::generate_plan_with_policy(
            &instruments,
            monthly_budget,
            strategy,
            &self.policy,
        ))
    }

    /// Avalanche vs snowball comparison with a recommendation
    fn compare(&self, instruments_json: &str, monthly_budget: i64) -> PyResult<String> {
        let instruments = parse_instruments(instruments_json)?;
        to_json(&comparator::compare_with_policy(
            &instruments,
            monthly_budget,
            &self.policy,
        ))
    }

    /// Month-by-month schedule for a single balance
    #[pyo3(signature = (balance, monthly_payment, annual_rate_percent, max_months=600))]
    fn schedule(
        &self,
        balance: i64,
        monthly_payment: i64,
        annual_rate_percent: f64,
        max_months: u32,
    ) -> PyResult<String> {
        let rows = amortization::checked_amortization_schedule(
            balance,
            monthly_payment,
            annual_rate_percent,
            max_months,
        )
        .map_err(|e| value_error(e.to_string()))?;
        to_json(&rows)
    }
}
