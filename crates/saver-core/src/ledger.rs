use async_trait::async_trait;
use rust_decimal::Decimal;
use saver_domain::{Badge, Goal, GoalId, NewGoal};

use crate::LedgerError;

/// Abstraction over the remote ledger that owns all durable goal state.
///
/// Every call is a single round trip; implementations must not retry.
#[async_trait]
pub trait RemoteLedger: Send + Sync {
    /// `GET /goals`
    async fn list_goals(&self) -> Result<Vec<Goal>, LedgerError>;

    /// `POST /goals`
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, LedgerError>;

    /// `POST /goals/{id}/savings`. Returns the ledger's updated goal.
    async fn add_saving(&self, goal_id: &GoalId, amount: Decimal) -> Result<Goal, LedgerError>;

    /// `GET /badges`
    async fn list_badges(&self) -> Result<Vec<Badge>, LedgerError>;
}
