pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default directives for the shell and the workspace crates it drives.
const DEFAULT_DIRECTIVES: [&str; 3] = ["money_saver=info", "saver_core=info", "saver_http=info"];

fn default_filter() -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|raw| raw.parse::<Directive>().ok())
        .fold(EnvFilter::default(), EnvFilter::add_directive)
}

/// Installs the global subscriber once: `RUST_LOG` when set, the
/// workspace crates at `info` otherwise. Logs go to stderr so script output
/// stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

        // A subscriber installed elsewhere (tests, embedding apps) wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::info!("Money Saver tracing initialized.");
    });
}
