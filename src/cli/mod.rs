pub mod commands;
mod completion;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
