use saver_domain::Badge;
use tracing::{info, warn};

use crate::{LoadError, RemoteLedger};

pub const NO_BADGES: &str =
    "You haven't earned any badges yet. Keep saving to unlock new achievements!";

pub struct BadgeService;

impl BadgeService {
    /// Fetches every badge. Any failure replaces the whole list.
    pub async fn list(ledger: &dyn RemoteLedger) -> Result<Vec<Badge>, LoadError> {
        match ledger.list_badges().await {
            Ok(badges) => {
                info!(count = badges.len(), "badges loaded");
                Ok(badges)
            }
            Err(err) => {
                warn!(error = %err, "badges failed to load");
                Err(LoadError::Badges(err))
            }
        }
    }

    pub fn unlocked(badges: &[Badge]) -> impl Iterator<Item = &Badge> {
        badges.iter().filter(|badge| badge.unlocked)
    }
}
