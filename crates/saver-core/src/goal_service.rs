use std::str::FromStr;

use rust_decimal::Decimal;
use saver_domain::{Goal, NewGoal};
use tracing::{info, warn};

use crate::{CoreError, RemoteLedger};

pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const INVALID_TARGET: &str = "Target amount must be a positive number.";

pub struct GoalService;

impl GoalService {
    /// Checks raw form input for a new goal.
    pub fn validate(name: &str, target_input: &str) -> Result<NewGoal, CoreError> {
        let name = name.trim();
        let target_input = target_input.trim();
        if name.is_empty() || target_input.is_empty() {
            return Err(CoreError::Validation(MISSING_FIELDS.into()));
        }
        let target_amount = Decimal::from_str(target_input)
            .map_err(|_| CoreError::Validation(INVALID_TARGET.into()))?;
        if target_amount <= Decimal::ZERO {
            return Err(CoreError::Validation(INVALID_TARGET.into()));
        }
        Ok(NewGoal {
            name: name.to_string(),
            target_amount,
        })
    }

    pub async fn create(ledger: &dyn RemoteLedger, goal: &NewGoal) -> Result<Goal, CoreError> {
        if goal.name.trim().is_empty() {
            return Err(CoreError::Validation(MISSING_FIELDS.into()));
        }
        if goal.target_amount <= Decimal::ZERO {
            return Err(CoreError::Validation(INVALID_TARGET.into()));
        }
        match ledger.create_goal(goal).await {
            Ok(created) => {
                info!(goal_id = %created.id, name = %created.name, "goal created");
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "goal creation failed");
                Err(err.into())
            }
        }
    }
}
