use std::env;

use saver_config::{Config, API_URL_ENV, HOME_ENV, TOKEN_ENV};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_ACTIONS: &[&str] = &["show", "set", "backup", "backups", "restore"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage Money Saver preferences",
        "config [show|set <key> <value>|backup [note]|backups|restore [name]]",
        cmd_config,
    )
    .with_actions(CONFIG_ACTIONS)]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            set_value(context, key, value.trim())
        }
        "backup" => {
            let note = (args.len() > 1).then(|| args[1..].join(" "));
            let name = context
                .config_manager
                .backup(&context.config, note.as_deref())?;
            io::print_success(format!("Configuration backed up as `{name}`."));
            Ok(())
        }
        "backups" => list_backups(context),
        "restore" => {
            let name = match args.get(1) {
                Some(name) => name.to_string(),
                None => {
                    if !context.can_prompt() {
                        return Err(CommandError::InvalidArguments(
                            "usage: config restore <name>".into(),
                        ));
                    }
                    match select_backup(context)? {
                        Some(name) => name,
                        None => {
                            io::print_info("Operation cancelled.");
                            return Ok(());
                        }
                    }
                }
            };
            restore(context, &name)
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; expected one of: {}",
            CONFIG_ACTIONS.join(", ")
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        output::line(format!("  {key:<22} {}", context.config.get(key)?));
    }
    output::line(format!(
        "  {:<22} {}",
        "file",
        context.config_manager.config_path().display()
    ));

    for var in [API_URL_ENV, TOKEN_ENV] {
        if env::var(var).is_ok_and(|value| !value.trim().is_empty()) {
            io::print_hint(format!("{var} is set and overrides the stored value."));
        }
    }
    if env::var_os(HOME_ENV).is_some() {
        io::print_hint(format!("Data directory taken from {HOME_ENV}."));
    }
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    context.config.set(key, value)?;
    context.persist_config()?;
    context.apply_config()?;
    io::print_success(format!("{key} set to {}.", context.config.get(key)?));
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups found.");
        return Ok(());
    }
    output::section("Configuration backups");
    for (index, name) in backups.iter().enumerate() {
        output::line(format!("  {:>2}. {name}", index + 1));
    }
    Ok(())
}

fn select_backup(context: &ShellContext) -> Result<Option<String>, CommandError> {
    let mut backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups found.");
        return Ok(None);
    }
    let choice = io::select_item(&context.theme, "Select configuration backup:", &backups)?;
    Ok(choice.map(|index| backups.swap_remove(index)))
}

fn restore(context: &mut ShellContext, name: &str) -> CommandResult {
    let restored = context.config_manager.restore(name)?;
    context.config = restored;
    context.persist_config()?;
    context.apply_config()?;
    io::print_success(format!("Configuration restored from `{name}`."));
    Ok(())
}
