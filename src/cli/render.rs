//! Plain-text rendering of goals, grids and badges.

use saver_core::{GoalView, ViewState};
use saver_domain::{AggregateSnapshot, Badge, FundingCell};

use crate::currency::{format_percent, CurrencyFormatter};

pub const GOAL_ACHIEVED: &str = "Goal Achieved!";

pub fn dashboard_summary(snapshot: &AggregateSnapshot, currency: &CurrencyFormatter) -> String {
    format!(
        "Total saved: {} of {} ({})",
        currency.format(snapshot.total_saved),
        currency.format(snapshot.total_target),
        format_percent(snapshot.progress_pct)
    )
}

fn mode_label(state: &ViewState) -> &'static str {
    match state {
        ViewState::Idle => "idle",
        ViewState::ManualEntry => "manual entry open",
        ViewState::GridOpen => "grid open",
        ViewState::Submitting(_) => "saving...",
    }
}

/// Header line plus detail lines for goal number `number`.
pub fn goal_card(number: usize, view: &GoalView, currency: &CurrencyFormatter) -> Vec<String> {
    let goal = view.goal();
    let mut lines = vec![
        format!("#{number} {}", goal.name),
        format!(
            "    Saved     : {} / {} ({})",
            currency.format(goal.current_amount),
            currency.format(goal.target_amount),
            format_percent(goal.progress_pct())
        ),
    ];
    if view.is_completed() {
        lines.push(format!("    {GOAL_ACHIEVED}"));
    } else {
        lines.push(format!("    Remaining : {}", currency.format(goal.remaining())));
        lines.push(format!("    Mode      : {}", mode_label(view.state())));
    }
    if let Some(error) = view.last_error() {
        lines.push(format!("    Error     : {error}"));
    }
    lines
}

/// Numbered cells, saved ones marked with `x`.
pub fn grid(cells: &[FundingCell], currency: &CurrencyFormatter) -> Vec<String> {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let mark = if cell.saved { "x" } else { " " };
            format!("    [{mark}] {:>2}. {}", index + 1, currency.format(cell.amount))
        })
        .collect()
}

pub fn badge_line(badge: &Badge) -> String {
    let icon = if badge.unlocked { "★" } else { "☆" };
    let mut line = format!("{icon} {}", badge.name);
    if let Some(date) = badge.visible_unlock_date() {
        line.push_str(&format!(" (unlocked {})", date.format("%Y-%m-%d")));
    } else if !badge.unlocked {
        line.push_str(" (locked)");
    }
    if !badge.description.trim().is_empty() {
        line.push_str(&format!(" - {}", badge.description.trim()));
    }
    line
}
