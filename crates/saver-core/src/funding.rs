//! Funding controller: validates an increment, enforces one outstanding call
//! per goal and performs the single round trip to the remote ledger.

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use rust_decimal::Decimal;
use saver_domain::{FundingRequest, Goal, GoalId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{FundingError, RemoteLedger};

/// Upper bound on a single funding round trip.
pub const DEFAULT_FUNDING_TIMEOUT: Duration = Duration::from_secs(15);

const INVALID_AMOUNT: &str = "Please enter a valid positive amount.";

type InFlightTable = Arc<Mutex<HashMap<GoalId, Uuid>>>;

/// Parses free-text input into a fundable amount.
pub fn parse_amount(input: &str) -> Result<Decimal, FundingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FundingError::Validation(INVALID_AMOUNT.into()));
    }
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| FundingError::Validation(INVALID_AMOUNT.into()))?;
    validate_amount(amount)?;
    Ok(amount)
}

/// Rejects non-positive increments.
pub fn validate_amount(amount: Decimal) -> Result<(), FundingError> {
    if amount <= Decimal::ZERO {
        Err(FundingError::Validation(INVALID_AMOUNT.into()))
    } else {
        Ok(())
    }
}

/// Issues funding calls against a [`RemoteLedger`].
///
/// A second call for a goal whose previous call has not resolved is rejected
/// with [`FundingError::InFlight`]; nothing is queued. The request runs on its
/// own task, so dropping the future returned by [`FundingController::fund`]
/// lets the ledger call finish and keeps the goal locked until it does.
#[derive(Clone)]
pub struct FundingController {
    ledger: Arc<dyn RemoteLedger>,
    in_flight: InFlightTable,
    timeout: Duration,
}

impl FundingController {
    pub fn new(ledger: Arc<dyn RemoteLedger>) -> Self {
        Self {
            ledger,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            timeout: DEFAULT_FUNDING_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` while a funding call for `goal_id` is outstanding.
    pub fn is_in_flight(&self, goal_id: &GoalId) -> bool {
        lock(&self.in_flight).contains_key(goal_id)
    }

    pub async fn fund_request(&self, request: &FundingRequest) -> Result<Goal, FundingError> {
        self.fund(&request.goal_id, request.amount).await
    }

    /// Adds `amount` to the goal and returns the ledger's confirmed goal.
    pub async fn fund(&self, goal_id: &GoalId, amount: Decimal) -> Result<Goal, FundingError> {
        validate_amount(amount)?;
        let guard = InFlightGuard::acquire(&self.in_flight, goal_id)?;
        debug!(goal_id = %goal_id, token = %guard.token, %amount, "funding request accepted");

        let ledger = Arc::clone(&self.ledger);
        let timeout = self.timeout;
        let target = goal_id.clone();
        let task = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, ledger.add_saving(&target, amount))
                .await
            {
                Ok(result) => result.map_err(FundingError::from),
                Err(_) => Err(FundingError::Network(format!(
                    "no response from the ledger within {}s",
                    timeout.as_secs()
                ))),
            };
            debug!(goal_id = %target, token = %guard.token, "funding round trip finished");
            drop(guard);
            outcome
        });

        let outcome = task.await.unwrap_or_else(|err| {
            Err(FundingError::Network(format!("funding task aborted: {err}")))
        });
        match &outcome {
            Ok(goal) => info!(
                goal_id = %goal.id,
                current_amount = %goal.current_amount,
                "funding confirmed"
            ),
            Err(err) => warn!(goal_id = %goal_id, error = %err, "funding failed"),
        }
        outcome
    }
}

/// Per-goal in-flight token, released when the ledger call finishes.
struct InFlightGuard {
    table: InFlightTable,
    goal_id: GoalId,
    token: Uuid,
}

impl InFlightGuard {
    fn acquire(table: &InFlightTable, goal_id: &GoalId) -> Result<Self, FundingError> {
        let mut entries = lock(table);
        if entries.contains_key(goal_id) {
            debug!(goal_id = %goal_id, "funding request rejected: call already in flight");
            return Err(FundingError::InFlight(goal_id.clone()));
        }
        let token = Uuid::new_v4();
        entries.insert(goal_id.clone(), token);
        Ok(Self {
            table: Arc::clone(table),
            goal_id: goal_id.clone(),
            token,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut entries = lock(&self.table);
        if entries.get(&self.goal_id) == Some(&self.token) {
            entries.remove(&self.goal_id);
        }
    }
}

fn lock(table: &InFlightTable) -> MutexGuard<'_, HashMap<GoalId, Uuid>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}
