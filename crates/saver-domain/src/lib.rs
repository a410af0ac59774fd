//! saver-domain
//!
//! Pure domain models (Goal, FundingCell, FundingRequest, Badge, AggregateSnapshot).
//! No I/O, no HTTP, no terminal. Only data types and the invariants they carry.

pub mod aggregate;
pub mod badge;
pub mod cell;
pub mod common;
pub mod goal;

pub use aggregate::*;
pub use badge::*;
pub use cell::*;
pub use common::*;
pub use goal::*;
