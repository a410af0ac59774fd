//! Command dispatch, error reporting and the shell context helpers commands
//! share.

use std::{future::Future, io, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use saver_config::{Config, ConfigError, ConfigManager};
use saver_core::{
    CoreError, DashboardAggregator, FundingController, FundingError, GoalView, LoadError,
    RemoteLedger,
};
use saver_http::{HttpLedger, HttpLedgerConfig, HttpLedgerError};
use tracing::debug;

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};
use crate::currency::CurrencyFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::from_env()?;
        let config = config_manager.load()?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;
        let (ledger, controller) = connect(&config)?;

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            runtime,
            currency: CurrencyFormatter::from_config(&config),
            config_manager,
            config,
            ledger,
            controller,
            dashboard: None,
            views: Vec::new(),
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "money-saver> ".to_string()
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Drives `future` to completion on the shell's runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::Validation(message)) => cli_io::print_error(message),
            CommandError::Load(err) => {
                cli_io::print_error(&err);
                cli_io::print_hint(format!(
                    "Check that the ledger at {} is reachable.",
                    self.effective_config().api_base_url
                ));
            }
            other => cli_io::print_error(other),
        }
    }

    /// Stored preferences with `MONEY_SAVER_*` overrides applied.
    pub(crate) fn effective_config(&self) -> Config {
        self.config.clone().with_env_overrides()
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Applies the current preferences to output, formatting and the ledger
    /// connection. Loaded goals are dropped when the ledger changes.
    pub(crate) fn apply_config(&mut self) -> CommandResult {
        output::set_color_enabled(self.config.ui_color_enabled && self.can_prompt());
        self.currency = CurrencyFormatter::from_config(&self.config);
        let (ledger, controller) = connect(&self.config)?;
        self.ledger = ledger;
        self.controller = controller;
        self.dashboard = None;
        self.views.clear();
        Ok(())
    }

    /// Fetches the goal collection from the ledger and rebuilds every view.
    pub(crate) fn reload_goals(&mut self) -> CommandResult {
        let ledger = Arc::clone(&self.ledger);
        let dashboard = self.block_on(DashboardAggregator::load(&*ledger));
        if let Some(err) = dashboard.load_error().cloned() {
            self.dashboard = None;
            self.views.clear();
            return Err(err.into());
        }
        self.views = dashboard
            .goals()
            .iter()
            .cloned()
            .map(|goal| GoalView::new(goal).reporting_to(dashboard.confirmations()))
            .collect();
        debug!(count = self.views.len(), "goal views rebuilt");
        self.dashboard = Some(dashboard);
        Ok(())
    }

    pub(crate) fn ensure_goals(&mut self) -> CommandResult {
        if self.dashboard.is_none() {
            self.reload_goals()?;
        }
        Ok(())
    }

    /// Applies queued confirmations to the dashboard and pushes the results
    /// back down to every view.
    pub(crate) fn sync_views(&mut self) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        let applied = dashboard.apply_confirmations();
        if applied == 0 {
            return;
        }
        for view in &mut self.views {
            if let Some(goal) = dashboard.goal(&view.goal().id) {
                view.sync(goal.clone());
            }
        }
    }

    /// Resolves a 1-based goal number from the command line.
    pub(crate) fn view_index(&self, raw: Option<&&str>) -> Result<usize, CommandError> {
        let raw = raw.ok_or_else(|| {
            CommandError::InvalidArguments("a goal number is required (see `goals`)".into())
        })?;
        let number: usize = raw.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a goal number"))
        })?;
        if number == 0 || number > self.views.len() {
            return Err(CommandError::InvalidArguments(format!(
                "no goal #{number}; {} goal(s) loaded",
                self.views.len()
            )));
        }
        Ok(number - 1)
    }
}

fn connect(config: &Config) -> Result<(Arc<dyn RemoteLedger>, FundingController), HttpLedgerError> {
    let effective = config.clone().with_env_overrides();
    let timeout = effective.request_timeout();
    let ledger: Arc<dyn RemoteLedger> = Arc::new(HttpLedger::new(
        HttpLedgerConfig::new(effective.api_base_url)
            .with_token(effective.auth_token)
            .with_timeout(timeout),
    )?);
    let controller = FundingController::new(Arc::clone(&ledger)).with_timeout(timeout);
    Ok((ledger, controller))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Funding(#[from] FundingError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] HttpLedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}
