use std::sync::Arc;

use saver_core::{FundingError, GoalService, GoalView, ViewState};
use saver_domain::{CellId, Goal};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

const GOAL_USAGE: &str =
    "goal [new <name> <target>|show <n>|manual <n>|grid <n>|save <n> <amount>|tap <n> <cell>]";
const GOAL_ACTIONS: &[&str] = &["new", "show", "manual", "grid", "save", "tap"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "goals",
            "Load goals and show dashboard totals",
            "goals",
            cmd_goals,
        ),
        CommandEntry::new(
            "goal",
            "Create, inspect and fund a goal",
            GOAL_USAGE,
            cmd_goal,
        )
        .with_actions(GOAL_ACTIONS),
    ]
}

fn cmd_goals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.reload_goals()?;
    print_dashboard(context);
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {GOAL_USAGE}")));
    };
    match action.to_lowercase().as_str() {
        "new" => create_goal(context, &args[1..]),
        "show" => show_goal(context, &args[1..]),
        "manual" => toggle_mode(context, &args[1..], GoalView::toggle_manual_entry),
        "grid" => toggle_mode(context, &args[1..], GoalView::toggle_grid),
        "save" => save_manual(context, &args[1..]),
        "tap" => tap_cell(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal action `{other}`; expected one of: {}",
            GOAL_ACTIONS.join(", ")
        ))),
    }
}

fn print_dashboard(context: &ShellContext) {
    let Some(dashboard) = context.dashboard.as_ref() else {
        return;
    };
    output::section("Savings dashboard");
    output::line(render::dashboard_summary(
        &dashboard.snapshot(),
        &context.currency,
    ));
    if context.views.is_empty() {
        io::print_info("No goals yet. Create one with `goal new <name> <target>`.");
        return;
    }
    for (index, view) in context.views.iter().enumerate() {
        for line in render::goal_card(index + 1, view, &context.currency) {
            output::line(line);
        }
    }
}

fn print_goal(context: &ShellContext, index: usize) {
    let view = &context.views[index];
    for line in render::goal_card(index + 1, view, &context.currency) {
        output::line(line);
    }
    if !view.is_completed() {
        for line in render::grid(view.grid(), &context.currency) {
            output::line(line);
        }
    }
}

fn create_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, target) = match args.split_last() {
        Some((target, name)) if !name.is_empty() => (name.join(" "), *target),
        _ => (args.join(" "), ""),
    };
    let draft = GoalService::validate(&name, target)?;

    let ledger = Arc::clone(&context.ledger);
    let created = context.block_on(GoalService::create(&*ledger, &draft))?;

    // Without a loaded dashboard the next listing picks the goal up.
    if let Some(dashboard) = context.dashboard.as_mut() {
        dashboard.insert_created(created.clone());
        match context
            .views
            .iter_mut()
            .find(|view| view.goal().id == created.id)
        {
            Some(view) => view.sync(created.clone()),
            None => context.views.insert(
                0,
                GoalView::new(created.clone()).reporting_to(dashboard.confirmations()),
            ),
        }
    }
    io::print_success(format!(
        "Created goal `{}` with a target of {}.",
        created.name,
        context.currency.format(created.target_amount)
    ));
    Ok(())
}

fn show_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.ensure_goals()?;
    let index = context.view_index(args.first())?;
    print_goal(context, index);
    Ok(())
}

fn toggle_mode(
    context: &mut ShellContext,
    args: &[&str],
    toggle: fn(&mut GoalView),
) -> CommandResult {
    context.ensure_goals()?;
    let index = context.view_index(args.first())?;
    if context.views[index].is_completed() {
        io::print_info(render::GOAL_ACHIEVED);
        return Ok(());
    }
    toggle(&mut context.views[index]);
    print_goal(context, index);
    Ok(())
}

fn save_manual(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.ensure_goals()?;
    let index = context.view_index(args.first())?;
    let amount = args.get(1).copied().unwrap_or_default();

    let view = &mut context.views[index];
    if !view.is_completed() && *view.state() != ViewState::ManualEntry {
        view.toggle_manual_entry();
    }
    let outcome = context
        .runtime
        .block_on(view.submit_manual(&context.controller, amount));
    report_saving(context, index, outcome)
}

fn tap_cell(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.ensure_goals()?;
    let index = context.view_index(args.first())?;
    let cell_number: u32 = args
        .get(1)
        .and_then(|raw| raw.parse().ok())
        .filter(|number| *number > 0)
        .ok_or_else(|| CommandError::InvalidArguments("usage: goal tap <n> <cell>".into()))?;
    let cell_id = CellId(cell_number - 1);

    let view = &mut context.views[index];
    if view.is_completed() {
        io::print_info(render::GOAL_ACHIEVED);
        return Ok(());
    }
    match view.cell(cell_id) {
        None => {
            return Err(CommandError::InvalidArguments(format!(
                "goal #{} has no cell {cell_number}",
                index + 1
            )))
        }
        Some(cell) if cell.saved => {
            io::print_warning(format!("Cell {cell_number} is already saved."));
            return Ok(());
        }
        Some(_) => {}
    }
    if *view.state() != ViewState::GridOpen {
        view.toggle_grid();
    }
    match context
        .runtime
        .block_on(view.tap_cell(&context.controller, cell_id))
    {
        Some(outcome) => report_saving(context, index, outcome),
        None => {
            io::print_warning("The grid is busy; try again.");
            Ok(())
        }
    }
}

fn report_saving(
    context: &mut ShellContext,
    index: usize,
    outcome: Result<Goal, FundingError>,
) -> CommandResult {
    let goal = outcome?;
    context.sync_views();
    io::print_success(format!(
        "Saved toward `{}`: now {} of {}.",
        goal.name,
        context.currency.format(goal.current_amount),
        context.currency.format(goal.target_amount)
    ));
    if goal.is_completed() {
        io::print_success(render::GOAL_ACHIEVED);
    }
    print_goal(context, index);
    Ok(())
}
