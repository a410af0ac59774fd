#![doc(test(attr(deny(warnings))))]

//! Money Saver: savings goals funded in small steps against a remote ledger,
//! driven from an interactive shell.
//!
//! The funding logic lives in `saver-core`; this crate wires it to the HTTP
//! ledger, persisted preferences and the terminal.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    utils::init_tracing();
}
