//! Build metadata captured by `build.rs` and reported by `version`.

use std::fmt;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Labelled detail rows, in display order.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money Saver {}", self.version)
    }
}

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => UNKNOWN,
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: or_unknown(option_env!("MONEY_SAVER_BUILD_HASH")),
        git_status: or_unknown(option_env!("MONEY_SAVER_BUILD_STATUS")),
        timestamp: or_unknown(option_env!("MONEY_SAVER_BUILD_TIMESTAMP")),
        target: or_unknown(option_env!("MONEY_SAVER_BUILD_TARGET")),
        profile: or_unknown(option_env!("MONEY_SAVER_BUILD_PROFILE")),
        rustc: or_unknown(option_env!("MONEY_SAVER_BUILD_RUSTC")),
    }
}
