//! Cross-goal totals derived from a goal collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::percent_of;
use crate::goal::Goal;

/// Dashboard-wide totals. Always derived, never stored next to the goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub total_saved: Decimal,
    pub total_target: Decimal,
    pub progress_pct: Decimal,
}

impl AggregateSnapshot {
    pub fn from_goals<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Self {
        let (total_saved, total_target) = goals
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(saved, target), goal| {
                (
                    saturating_add(saved, goal.current_amount),
                    saturating_add(target, goal.target_amount),
                )
            });
        let progress_pct = if total_target > Decimal::ZERO {
            percent_of(total_saved, total_target)
        } else {
            Decimal::ZERO
        };
        Self {
            total_saved,
            total_target,
            progress_pct,
        }
    }
}

fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}
