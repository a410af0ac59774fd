//! saver-core
//!
//! Goal-funding logic for Money Saver: saving-grid partitioning, the funding
//! controller, per-goal view state and the dashboard aggregate.
//! Depends on saver-domain. No terminal I/O and no HTTP; the remote ledger is
//! reached through the [`RemoteLedger`] trait.

pub mod badge_service;
pub mod dashboard;
pub mod error;
pub mod funding;
pub mod goal_service;
pub mod goal_view;
pub mod grid;
pub mod ledger;

pub use badge_service::*;
pub use dashboard::*;
pub use error::*;
pub use funding::*;
pub use goal_service::*;
pub use goal_view::*;
pub use grid::*;
pub use ledger::*;
