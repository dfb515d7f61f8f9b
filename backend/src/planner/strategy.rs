//! Payoff ordering strategies
//!
//! A strategy decides which instrument receives the surplus above the sum of
//! minimum payments:
//! - **Avalanche**: highest annual rate first (minimizes interest)
//! - **Snowball**: lowest balance first (fastest first win)
//!
//! Both orderings are stable: ties keep the caller's input order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::instrument::DebtInstrument;

/// Ordering strategy for surplus routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Avalanche,
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    /// Sort instruments into priority order for this strategy
    ///
    /// `slice::sort_by` is stable, which gives the input-order tie-break.
    ///
    /// # Example
    /// ```
    /// use payoff_core_rs::{DebtInstrument, Strategy};
    ///
    /// let low = DebtInstrument::new(100_000, 12.0, 500_000).unwrap().with_id("low");
    /// let high = DebtInstrument::new(900_000, 28.0, 1_000_000).unwrap().with_id("high");
    /// let mut order = vec![&low, &high];
    ///
    /// Strategy::Avalanche.order(&mut order);
    /// assert_eq!(order[0].id(), "high");
    ///
    /// Strategy::Snowball.order(&mut order);
    /// assert_eq!(order[0].id(), "low");
    /// ```
    pub fn order(&self, instruments: &mut [&DebtInstrument]) {
        match self {
            Strategy::Avalanche => instruments
                .sort_by(|a, b| b.annual_rate_percent().total_cmp(&a.annual_rate_percent())),
            Strategy::Snowball => instruments.sort_by_key(|i| i.balance()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(format!("Unknown strategy '{}'", other)),
        }
    }
}
