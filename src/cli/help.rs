//! `help` output derived from the command registry.

use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Money Saver commands");
    for entry in registry.list() {
        output::line(format!("  {:<8} {}", entry.name, entry.description));
        if !entry.actions.is_empty() {
            output::line(format!("  {:<8}   actions: {}", "", entry.actions.join(", ")));
        }
    }
    io::print_hint("`help <command>` shows usage; Tab or `?` completes commands.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("help {}", entry.name));
    output::line(format!("  {}", entry.description));
    let forms = usage_forms(entry);
    if forms.is_empty() {
        output::line(format!("  usage: {}", entry.usage));
        return;
    }
    output::line("  usage:");
    for form in forms {
        output::line(format!("    {} {form}", entry.name));
    }
}

/// Splits `goal [new <name> <target>|show <n>]` into one form per action.
fn usage_forms(entry: &CommandEntry) -> Vec<&'static str> {
    if entry.actions.is_empty() {
        return Vec::new();
    }
    entry
        .usage
        .strip_prefix(entry.name)
        .map(str::trim)
        .and_then(|body| body.strip_prefix('['))
        .and_then(|body| body.strip_suffix(']'))
        .map(|body| body.split('|').map(str::trim).collect())
        .unwrap_or_default()
}
