//! Tappable funding increments generated from a goal's remaining amount.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position of a cell inside its grid. Stable for a given remaining amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One proposed funding increment.
///
/// `saved` is a local, provisional marker. It is never sent to the ledger and
/// is discarded whenever the grid is regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingCell {
    pub id: CellId,
    pub amount: Decimal,
    #[serde(default)]
    pub saved: bool,
}

impl FundingCell {
    pub fn new(id: CellId, amount: Decimal) -> Self {
        Self {
            id,
            amount,
            saved: false,
        }
    }
}
