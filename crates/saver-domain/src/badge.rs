//! Achievement badges reported by the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::flexible_id;

/// Read-only achievement record. Unlock rules are evaluated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_date: Option<DateTime<Utc>>,
}

impl Badge {
    /// Unlock date, shown only for badges that are actually unlocked.
    pub fn visible_unlock_date(&self) -> Option<DateTime<Utc>> {
        if self.unlocked {
            self.unlocked_date
        } else {
            None
        }
    }
}
