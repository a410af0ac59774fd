//! saver-config
//!
//! Persistent user preferences for Money Saver: where the ledger lives, how
//! long to wait for it, and how amounts are displayed.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_home, ConfigManager, HOME_ENV};
pub use model::{Config, API_URL_ENV, TOKEN_ENV};
