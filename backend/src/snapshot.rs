//! Plan Snapshots - store a plan with the fingerprint of its inputs
//!
//! Plans are computed views. A persistence layer that caches one needs to
//! know when it has gone stale. A snapshot pairs the plan with a SHA256
//! hash of everything that produced it (instruments, budget, strategy,
//! policy).
//!
//! # Critical Invariants
//!
//! - **Determinism**: same inputs always hash to the same fingerprint
//! - **Sensitivity**: any change to a balance, rate, minimum, active flag,
//!   budget, strategy or policy changes the fingerprint

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::instrument::DebtInstrument;
use crate::models::plan::PaymentPlan;
use crate::planner::{generate_plan_with_policy, Strategy};
use crate::policy::PayoffPolicy;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Everything that determines a plan
#[derive(Serialize)]
struct PlanInputs<'a> {
    instruments: &'a [DebtInstrument],
    monthly_budget: i64,
    strategy: Strategy,
    policy: &'a PayoffPolicy,
}

/// A generated plan together with the fingerprint of its inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub strategy: Strategy,
    pub monthly_budget: i64,

    /// SHA256 of the canonical JSON of the inputs
    pub inputs_hash: String,

    pub plan: PaymentPlan,
}

impl PlanSnapshot {
    /// Generate a plan and record the fingerprint of its inputs
    pub fn capture(
        instruments: &[DebtInstrument],
        monthly_budget: i64,
        strategy: Strategy,
        policy: &PayoffPolicy,
    ) -> Result<Self, SnapshotError> {
        let inputs_hash = compute_inputs_hash(instruments, monthly_budget, strategy, policy)?;
        let plan = generate_plan_with_policy(instruments, monthly_budget, strategy, policy);
        Ok(Self {
            strategy,
            monthly_budget,
            inputs_hash,
            plan,
        })
    }

    /// Whether the stored plan still matches these inputs
    ///
    /// The strategy and budget are taken from the snapshot itself.
    pub fn is_current(
        &self,
        instruments: &[DebtInstrument],
        policy: &PayoffPolicy,
    ) -> Result<bool, SnapshotError> {
        let hash = compute_inputs_hash(instruments, self.monthly_budget, self.strategy, policy)?;
        Ok(hash == self.inputs_hash)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| {
            SnapshotError::Serialization(format!("Snapshot serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| {
            SnapshotError::Serialization(format!("Snapshot deserialization failed: {}", e))
        })
    }
}

/// Compute a deterministic SHA256 hash of plan inputs
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field declaration order.
pub fn compute_inputs_hash(
    instruments: &[DebtInstrument],
    monthly_budget: i64,
    strategy: Strategy,
    policy: &PayoffPolicy,
) -> Result<String, SnapshotError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let inputs = PlanInputs {
        instruments,
        monthly_budget,
        strategy,
        policy,
    };

    let value = serde_json::to_value(&inputs).map_err(|e| {
        SnapshotError::Serialization(format!("Input serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SnapshotError::Serialization(format!("Input serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_hex_sha256() {
        let cards = vec![DebtInstrument::new(10_000, 18.0, 50_000).unwrap().with_id("a")];
        let hash =
            compute_inputs_hash(&cards, 5_000, Strategy::Avalanche, &PayoffPolicy::default())
                .unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_strategy_changes_hash() {
        let cards = vec![DebtInstrument::new(10_000, 18.0, 50_000).unwrap().with_id("a")];
        let policy = PayoffPolicy::default();
        let a = compute_inputs_hash(&cards, 5_000, Strategy::Avalanche, &policy).unwrap();
        let s = compute_inputs_hash(&cards, 5_000, Strategy::Snowball, &policy).unwrap();
        assert_ne!(a, s);
    }
}
