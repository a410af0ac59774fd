//! saver-http
//!
//! [`HttpLedger`]: the reqwest-backed [`saver_core::RemoteLedger`] that talks
//! to the goals API.

pub mod client;
pub mod error;

pub use client::{HttpLedger, HttpLedgerConfig};
pub use error::HttpLedgerError;
