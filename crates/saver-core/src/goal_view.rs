//! Per-goal funding view with optimistic grid marks.
//!
//! ```text
//! Idle ─┬─> ManualEntry ─┐
//!       └─> GridOpen ────┴─> Submitting ─┬─ confirmed ─> Idle (fresh goal, new grid)
//!                                        └─ failed ────> previous entry mode
//! ```
//!
//! Only one funding mode is open at a time. A completed goal exposes no
//! funding affordance and never regenerates its grid again.

use rust_decimal::Decimal;
use saver_domain::{CellId, FundingCell, FundingRequest, Goal};
use tracing::debug;

use crate::{
    dashboard::ConfirmationSender, funding::parse_amount, FundingController, FundingError,
    GridPartitioner,
};

/// Funding mode a user can open on a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    ManualEntry,
    GridOpen,
}

/// Funding attempt awaiting the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttempt {
    pub origin: EntryMode,
    pub cell: Option<CellId>,
    pub request: FundingRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    ManualEntry,
    GridOpen,
    Submitting(PendingAttempt),
}

impl ViewState {
    fn entry(mode: EntryMode) -> Self {
        match mode {
            EntryMode::ManualEntry => ViewState::ManualEntry,
            EntryMode::GridOpen => ViewState::GridOpen,
        }
    }
}

/// Which funding controls a renderer may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub manual_entry: bool,
    pub grid: bool,
}

impl Affordances {
    pub fn none() -> Self {
        Self {
            manual_entry: false,
            grid: false,
        }
    }

    pub fn any(&self) -> bool {
        self.manual_entry || self.grid
    }
}

#[derive(Debug)]
pub struct GoalView {
    goal: Goal,
    state: ViewState,
    grid: Vec<FundingCell>,
    grid_remaining: Option<Decimal>,
    grid_generations: u64,
    last_error: Option<String>,
    confirmations: Option<ConfirmationSender>,
}

impl GoalView {
    pub fn new(goal: Goal) -> Self {
        let mut view = Self {
            goal,
            state: ViewState::Idle,
            grid: Vec::new(),
            grid_remaining: None,
            grid_generations: 0,
            last_error: None,
            confirmations: None,
        };
        view.regenerate_grid();
        view
    }

    /// Reports confirmed goals to the dashboard through `sender`.
    pub fn reporting_to(mut self, sender: ConfirmationSender) -> Self {
        self.confirmations = Some(sender);
        self
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn grid(&self) -> &[FundingCell] {
        &self.grid
    }

    pub fn cell(&self, id: CellId) -> Option<&FundingCell> {
        self.grid.iter().find(|cell| cell.id == id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of times the grid has been partitioned for this view.
    pub fn grid_generations(&self) -> u64 {
        self.grid_generations
    }

    pub fn is_completed(&self) -> bool {
        self.goal.is_completed()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ViewState::Submitting(_))
    }

    pub fn affordances(&self) -> Affordances {
        if self.is_completed() || self.is_submitting() {
            Affordances::none()
        } else {
            Affordances {
                manual_entry: true,
                grid: true,
            }
        }
    }

    /// Opens manual entry (closing the grid), or closes it when already open.
    pub fn toggle_manual_entry(&mut self) {
        self.toggle(EntryMode::ManualEntry);
    }

    /// Opens the grid (closing manual entry), or closes it when already open.
    pub fn toggle_grid(&mut self) {
        self.toggle(EntryMode::GridOpen);
    }

    fn toggle(&mut self, mode: EntryMode) {
        if !self.affordances().any() {
            return;
        }
        self.last_error = None;
        let target = ViewState::entry(mode);
        self.state = if self.state == target {
            ViewState::Idle
        } else {
            target
        };
    }

    /// Validates manual input and moves to `Submitting`. Invalid input leaves
    /// the state unchanged and keeps the message for display.
    pub fn begin_manual(&mut self, input: &str) -> Result<FundingRequest, FundingError> {
        self.ensure_accepting()?;
        if self.state != ViewState::ManualEntry {
            return Err(FundingError::Validation("Manual entry is not open.".into()));
        }
        let amount = match parse_amount(input) {
            Ok(amount) => amount,
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };
        let request = FundingRequest::new(self.goal.id.clone(), amount);
        self.last_error = None;
        self.state = ViewState::Submitting(PendingAttempt {
            origin: EntryMode::ManualEntry,
            cell: None,
            request: request.clone(),
        });
        Ok(request)
    }

    /// Marks `cell_id` as saved ahead of confirmation and moves to
    /// `Submitting`. Returns `None` (no request) for saved or unknown cells,
    /// when the grid is closed, or while another attempt is pending.
    pub fn select_cell(&mut self, cell_id: CellId) -> Option<FundingRequest> {
        if self.is_completed() || self.state != ViewState::GridOpen {
            return None;
        }
        let cell = self.grid.iter_mut().find(|cell| cell.id == cell_id)?;
        if cell.saved {
            return None;
        }
        cell.saved = true;
        let request = FundingRequest::new(self.goal.id.clone(), cell.amount);
        debug!(goal_id = %self.goal.id, cell = %cell_id, amount = %cell.amount, "cell marked saved");
        self.last_error = None;
        self.state = ViewState::Submitting(PendingAttempt {
            origin: EntryMode::GridOpen,
            cell: Some(cell_id),
            request: request.clone(),
        });
        Some(request)
    }

    /// Applies the ledger's answer to the pending attempt and hands the
    /// outcome back. Confirmed goals are also reported upward.
    pub fn resolve(&mut self, outcome: Result<Goal, FundingError>) -> Result<Goal, FundingError> {
        let ViewState::Submitting(attempt) = self.state.clone() else {
            return outcome;
        };
        match outcome {
            Ok(confirmed) if confirmed.id == self.goal.id => {
                self.goal = confirmed.clone();
                self.state = ViewState::Idle;
                self.last_error = None;
                self.regenerate_grid();
                if let Some(sender) = &self.confirmations {
                    if !sender.confirm(confirmed.clone()) {
                        debug!(goal_id = %confirmed.id, "dashboard dropped; confirmation discarded");
                    }
                }
                Ok(confirmed)
            }
            Ok(other) => {
                let err = FundingError::ConflictOrServer(format!(
                    "Ledger confirmed goal {} instead of {}.",
                    other.id, self.goal.id
                ));
                self.roll_back(&attempt, &err);
                Err(err)
            }
            Err(err) => {
                self.roll_back(&attempt, &err);
                Err(err)
            }
        }
    }

    /// Brings the view in line with a goal pushed down by the dashboard.
    /// The grid (and every local mark) is rebuilt only when the remaining
    /// amount changed.
    pub fn sync(&mut self, goal: Goal) {
        if goal.id != self.goal.id {
            return;
        }
        let remaining_changed = goal.remaining() != self.goal.remaining()
            || goal.is_completed() != self.goal.is_completed();
        self.goal = goal;
        if remaining_changed {
            self.regenerate_grid();
            if self.is_completed() && !self.is_submitting() {
                self.state = ViewState::Idle;
            }
        }
    }

    /// Runs a manual funding attempt end to end.
    pub async fn submit_manual(
        &mut self,
        controller: &FundingController,
        input: &str,
    ) -> Result<Goal, FundingError> {
        let request = self.begin_manual(input)?;
        let outcome = controller.fund_request(&request).await;
        self.resolve(outcome)
    }

    /// Runs a grid funding attempt end to end. Returns `None` when the tap
    /// was ignored.
    pub async fn tap_cell(
        &mut self,
        controller: &FundingController,
        cell_id: CellId,
    ) -> Option<Result<Goal, FundingError>> {
        let request = self.select_cell(cell_id)?;
        let outcome = controller.fund_request(&request).await;
        Some(self.resolve(outcome))
    }

    fn ensure_accepting(&self) -> Result<(), FundingError> {
        if self.is_completed() {
            return Err(FundingError::Validation("Goal already achieved.".into()));
        }
        if self.is_submitting() {
            return Err(FundingError::InFlight(self.goal.id.clone()));
        }
        Ok(())
    }

    fn roll_back(&mut self, attempt: &PendingAttempt, err: &FundingError) {
        if let Some(cell_id) = attempt.cell {
            if let Some(cell) = self.grid.iter_mut().find(|cell| cell.id == cell_id) {
                cell.saved = false;
            }
        }
        // A sync may have completed the goal while the attempt was in flight.
        self.state = if self.is_completed() {
            ViewState::Idle
        } else {
            ViewState::entry(attempt.origin)
        };
        self.last_error = Some(err.to_string());
    }

    fn regenerate_grid(&mut self) {
        if self.is_completed() {
            self.grid.clear();
            self.grid_remaining = None;
            return;
        }
        let remaining = self.goal.remaining();
        self.grid = GridPartitioner::partition(remaining);
        self.grid_remaining = Some(remaining);
        self.grid_generations += 1;
    }
}
