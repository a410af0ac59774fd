use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use saver_core::{LedgerError, RemoteLedger};
use saver_domain::{Badge, Goal, GoalId, NewGoal};

/// In-memory ledger that records every call it receives.
#[derive(Default)]
pub struct MockLedger {
    goals: Mutex<Vec<Goal>>,
    badges: Mutex<Vec<Badge>>,
    saving_calls: AtomicUsize,
    amounts: Mutex<Vec<(GoalId, Decimal)>>,
    delay: Option<Duration>,
    saving_failure: Mutex<Option<LedgerError>>,
    list_failure: Mutex<Option<LedgerError>>,
    next_id: AtomicUsize,
}

impl MockLedger {
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals: Mutex::new(goals),
            next_id: AtomicUsize::new(100),
            ..Self::default()
        }
    }

    /// Every `add_saving` sleeps for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_badges(self, badges: Vec<Badge>) -> Self {
        *self.badges.lock().unwrap() = badges;
        self
    }

    pub fn fail_savings_with(&self, err: LedgerError) {
        *self.saving_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_lists_with(&self, err: LedgerError) {
        *self.list_failure.lock().unwrap() = Some(err);
    }

    pub fn saving_calls(&self) -> usize {
        self.saving_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_amounts(&self) -> Vec<(GoalId, Decimal)> {
        self.amounts.lock().unwrap().clone()
    }

    pub fn stored(&self, id: &str) -> Option<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|goal| goal.id.as_str() == id)
            .cloned()
    }

    fn list_failure(&self) -> Option<LedgerError> {
        self.list_failure.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteLedger for MockLedger {
    async fn list_goals(&self) -> Result<Vec<Goal>, LedgerError> {
        match self.list_failure() {
            Some(err) => Err(err),
            None => Ok(self.goals.lock().unwrap().clone()),
        }
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Goal::new(
            id.to_string(),
            goal.name.clone(),
            goal.target_amount,
            Decimal::ZERO,
        );
        self.goals.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn add_saving(&self, goal_id: &GoalId, amount: Decimal) -> Result<Goal, LedgerError> {
        self.saving_calls.fetch_add(1, Ordering::SeqCst);
        self.amounts.lock().unwrap().push((goal_id.clone(), amount));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.saving_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let mut goals = self.goals.lock().unwrap();
        let goal = goals
            .iter_mut()
            .find(|goal| &goal.id == goal_id)
            .ok_or_else(|| LedgerError::Rejected {
                status: 404,
                message: "Goal not found".into(),
            })?;
        goal.current_amount += amount;
        Ok(goal.clone())
    }

    async fn list_badges(&self) -> Result<Vec<Badge>, LedgerError> {
        match self.list_failure() {
            Some(err) => Err(err),
            None => Ok(self.badges.lock().unwrap().clone()),
        }
    }
}

pub fn goal(id: &str, target: Decimal, current: Decimal) -> Goal {
    Goal::new(id, format!("Goal {id}"), target, current)
}
