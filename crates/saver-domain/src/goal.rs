//! Savings goals and the requests that fund them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::common::*;

/// Opaque goal identifier assigned by the remote ledger.
///
/// The ledger may emit ids as JSON strings or integers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoalId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for GoalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        flexible_id(deserializer).map(GoalId)
    }
}

/// A named savings target and the amount confirmed toward it so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

impl Goal {
    pub fn new(
        id: impl Into<GoalId>,
        name: impl Into<String>,
        target_amount: Decimal,
        current_amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount,
        }
    }

    /// Amount still missing, never negative.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// A goal is completed once the confirmed amount reaches the target.
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Per-goal progress in percent, clamped to `0..=100`.
    pub fn progress_pct(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return if self.is_completed() {
                Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
        }
        let raw = percent_of(self.current_amount, self.target_amount);
        raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

impl From<String> for GoalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Body of a goal-creation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGoal {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
}

/// A single funding increment bound to one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRequest {
    pub goal_id: GoalId,
    pub amount: Decimal,
}

impl FundingRequest {
    pub fn new(goal_id: GoalId, amount: Decimal) -> Self {
        Self { goal_id, amount }
    }
}

/// Wire body for `POST /goals/{id}/savings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
