use saver_core::{BadgeService, NO_BADGES};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "badges",
        "List achievement badges",
        "badges",
        cmd_badges,
    )]
}

fn cmd_badges(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = std::sync::Arc::clone(&context.ledger);
    let badges = context.block_on(BadgeService::list(&*ledger))?;
    output::section("Badges");
    if badges.is_empty() {
        io::print_info(NO_BADGES);
        return Ok(());
    }
    for badge in &badges {
        output::line(render::badge_line(badge));
    }
    let unlocked = BadgeService::unlocked(&badges).count();
    io::print_info(format!("{unlocked} of {} unlocked.", badges.len()));
    Ok(())
}
