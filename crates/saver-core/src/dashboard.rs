//! Dashboard aggregate: the single owner of the goal collection.

use saver_domain::{AggregateSnapshot, Goal, GoalId};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{LoadError, RemoteLedger};

/// Upward channel used by goal views to report confirmed goals.
///
/// Views never touch the collection directly; they send the ledger's
/// confirmed goal and the aggregator applies it.
#[derive(Debug, Clone)]
pub struct ConfirmationSender(UnboundedSender<Goal>);

impl ConfirmationSender {
    /// Queues a confirmed goal. Returns `false` when the dashboard is gone.
    pub fn confirm(&self, goal: Goal) -> bool {
        self.0.send(goal).is_ok()
    }
}

/// Holds every goal in display order and derives cross-goal totals.
#[derive(Debug)]
pub struct DashboardAggregator {
    goals: Vec<Goal>,
    load_error: Option<LoadError>,
    sender: UnboundedSender<Goal>,
    receiver: UnboundedReceiver<Goal>,
}

impl Default for DashboardAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardAggregator {
    pub fn new() -> Self {
        Self::from_goals(Vec::new())
    }

    pub fn from_goals(goals: Vec<Goal>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            goals,
            load_error: None,
            sender,
            receiver,
        }
    }

    /// Fetches the collection. A failed fetch leaves the dashboard in a
    /// collection-level error state with no goals.
    pub async fn load(ledger: &dyn RemoteLedger) -> Self {
        let mut dashboard = Self::new();
        // Failure is recorded on the dashboard itself.
        let _ = dashboard.reload(ledger).await;
        dashboard
    }

    /// Replaces the whole collection with a fresh fetch.
    pub async fn reload(&mut self, ledger: &dyn RemoteLedger) -> Result<(), LoadError> {
        match ledger.list_goals().await {
            Ok(goals) => {
                info!(count = goals.len(), "goals loaded");
                self.goals = goals;
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "goal collection failed to load");
                let error = LoadError::Goals(err);
                self.goals.clear();
                self.load_error = Some(error.clone());
                Err(error)
            }
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| &goal.id == id)
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Totals computed from the current collection on every call.
    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot::from_goals(&self.goals)
    }

    /// Replaces the goal with the same id. Unknown ids are ignored so a goal
    /// removed elsewhere is never resurrected.
    pub fn replace(&mut self, goal: Goal) -> bool {
        match self.goals.iter_mut().find(|existing| existing.id == goal.id) {
            Some(slot) => {
                debug!(goal_id = %goal.id, current_amount = %goal.current_amount, "goal replaced");
                *slot = goal;
                true
            }
            None => {
                debug!(goal_id = %goal.id, "confirmation for unknown goal ignored");
                false
            }
        }
    }

    /// Adds a newly created goal at the front of the collection.
    pub fn insert_created(&mut self, goal: Goal) {
        if self.replace(goal.clone()) {
            return;
        }
        self.goals.insert(0, goal);
    }

    /// Sender handed to goal views for reporting confirmed goals.
    pub fn confirmations(&self) -> ConfirmationSender {
        ConfirmationSender(self.sender.clone())
    }

    /// Applies every queued confirmation in arrival order. Returns how many
    /// matched a goal in the collection.
    pub fn apply_confirmations(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(goal) => {
                    if self.replace(goal) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> DashboardAggregator {
        DashboardAggregator::from_goals(vec![
            Goal::new("1", "Laptop", dec!(1000), dec!(750)),
            Goal::new("2", "Trip", dec!(500), dec!(100)),
        ])
    }

    #[test]
    fn replace_updates_matching_goal_only() {
        let mut dashboard = sample();
        assert!(dashboard.replace(Goal::new("2", "Trip", dec!(500), dec!(150))));
        assert_eq!(dashboard.goals()[1].current_amount, dec!(150));
        assert_eq!(dashboard.goals()[0].current_amount, dec!(750));
        assert_eq!(dashboard.snapshot().total_saved, dec!(900));
    }

    #[test]
    fn unknown_ids_are_not_resurrected() {
        let mut dashboard = sample();
        assert!(!dashboard.replace(Goal::new("9", "Ghost", dec!(10), dec!(5))));
        assert_eq!(dashboard.goals().len(), 2);
        assert!(dashboard.goal(&GoalId::new("9")).is_none());
    }

    #[test]
    fn created_goals_are_prepended() {
        let mut dashboard = sample();
        dashboard.insert_created(Goal::new("3", "Car", dec!(8000), dec!(0)));
        let ids: Vec<_> = dashboard.goals().iter().map(|goal| goal.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(dashboard.snapshot().total_target, dec!(9500));
    }

    #[test]
    fn confirmations_apply_in_arrival_order() {
        let mut dashboard = sample();
        let sender = dashboard.confirmations();
        assert!(sender.confirm(Goal::new("1", "Laptop", dec!(1000), dec!(800))));
        assert!(sender.confirm(Goal::new("1", "Laptop", dec!(1000), dec!(850))));
        assert!(sender.confirm(Goal::new("7", "Gone", dec!(10), dec!(10))));

        assert_eq!(dashboard.apply_confirmations(), 2);
        assert_eq!(dashboard.goals()[0].current_amount, dec!(850));
        assert_eq!(dashboard.apply_confirmations(), 0);
    }

    #[test]
    fn snapshot_tracks_every_mutation() {
        let mut dashboard = sample();
        let before = dashboard.snapshot();
        dashboard.replace(Goal::new("1", "Laptop", dec!(1000), dec!(800)));
        let after = dashboard.snapshot();
        assert_eq!(after.total_saved - before.total_saved, dec!(50));
        assert_eq!(after.total_target, dec!(1500));
        assert_eq!(after.progress_pct, dec!(60));
    }
}
