//! Shared runtime state for CLI interactions and command execution.

use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use saver_config::{Config, ConfigManager};
use saver_core::{DashboardAggregator, FundingController, GoalView, RemoteLedger};
use tokio::runtime::Runtime;

use crate::currency::CurrencyFormatter;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub runtime: Runtime,
    pub config_manager: ConfigManager,
    /// Stored preferences, without environment overrides.
    pub config: Config,
    pub currency: CurrencyFormatter,
    pub ledger: Arc<dyn RemoteLedger>,
    pub controller: FundingController,
    /// Loaded on first use; `None` until then or after a failed load.
    pub dashboard: Option<DashboardAggregator>,
    /// One view per dashboard goal, in dashboard order.
    pub views: Vec<GoalView>,
    pub running: bool,
}
