//! Tab completion and inline usage hints for the interactive shell.

use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};
use saver_config::Config;

use crate::cli::registry::CommandRegistry;

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    actions: &'static [&'static str],
}

/// Completes command names, their action keywords (`goal tap`,
/// `config restore`) and config keys after `config set`.
pub(crate) struct ShellHelper {
    commands: Vec<CommandSpec>,
}

impl ShellHelper {
    pub(crate) fn from_registry(registry: &CommandRegistry) -> Self {
        let commands = registry
            .list()
            .into_iter()
            .map(|entry| CommandSpec {
                name: entry.name,
                usage: entry.usage,
                actions: entry.actions,
            })
            .collect();
        Self { commands }
    }

    fn spec(&self, name: &str) -> Option<&CommandSpec> {
        self.commands
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|spec| spec.name).collect()
    }

    /// Words allowed after the already-typed `previous` words.
    fn candidates(&self, previous: &[&str]) -> Vec<&'static str> {
        match previous {
            [] => self.command_names(),
            [command] if command.eq_ignore_ascii_case("help") => self.command_names(),
            [command] => self
                .spec(command)
                .map(|spec| spec.actions.to_vec())
                .unwrap_or_default(),
            [command, action]
                if command.eq_ignore_ascii_case("config") && action.eq_ignore_ascii_case("set") =>
            {
                Config::KEYS.to_vec()
            }
            _ => Vec::new(),
        }
    }

    /// Start of the word under the cursor and the words that complete it.
    pub(crate) fn completions(&self, line: &str, pos: usize) -> (usize, Vec<&'static str>) {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let previous: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();
        let words = self
            .candidates(&previous)
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .collect();
        (start, words)
    }

    /// Remaining usage once a command and a space have been typed, e.g.
    /// `goal ` hints the goal actions.
    pub(crate) fn usage_hint(&self, line: &str, pos: usize) -> Option<String> {
        if pos != line.len() || !line.ends_with(' ') {
            return None;
        }
        let mut words = line.split_whitespace();
        let command = words.next()?;
        if words.next().is_some() {
            return None;
        }
        let spec = self.spec(command)?;
        let rest = spec.usage.strip_prefix(spec.name)?.trim_start();
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.completions(line, pos);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: format!("{word} "),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.usage_hint(line, pos)
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn helper() -> ShellHelper {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        ShellHelper::from_registry(&registry)
    }

    fn complete(line: &str) -> (usize, Vec<&'static str>) {
        helper().completions(line, line.len())
    }

    #[test]
    fn first_word_completes_command_names() {
        let (start, words) = complete("go");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["goals", "goal"]);
    }

    #[test]
    fn second_word_completes_actions() {
        assert_eq!(complete("goal t"), (5, vec!["tap"]));
        assert_eq!(complete("GOAL s"), (5, vec!["show", "save"]));
        assert_eq!(complete("config back"), (7, vec!["backup", "backups"]));
        assert_eq!(complete("help con"), (5, vec!["config"]));
    }

    #[test]
    fn config_set_completes_keys() {
        let (start, words) = complete("config set cur");
        assert_eq!(start, 11);
        assert_eq!(words, vec!["currency", "currency_precision"]);
    }

    #[test]
    fn numeric_arguments_get_no_candidates() {
        assert!(complete("goal tap 1 ").1.is_empty());
        assert!(complete("goals x").1.is_empty());
        assert!(complete("nothing ").1.is_empty());
    }

    #[test]
    fn hint_shows_remaining_usage_after_command() {
        let helper = helper();
        assert_eq!(
            helper.usage_hint("config ", 7).as_deref(),
            Some("[show|set <key> <value>|backup [note]|backups|restore [name]]")
        );
        assert!(helper.usage_hint("goals ", 6).is_none());
        assert!(helper.usage_hint("goal tap", 8).is_none());
        assert!(helper.usage_hint("goal ", 2).is_none());
    }
}
