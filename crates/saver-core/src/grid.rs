//! Saving-grid generation.
//!
//! The grid splits a goal's remaining amount into at most
//! [`MAX_UNIFORM_CELLS`] equal cells plus one trailing residue cell:
//!
//! 1. `remaining` is truncated toward zero to whole cents.
//! 2. The step is the smallest value of the 1-2-5 ladder
//!    (`0.01, 0.02, 0.05, 0.10, …, 10, 20, 50, 100, …`) for which
//!    `floor(remaining / step) <= MAX_UNIFORM_CELLS`.
//! 3. `floor(remaining / step)` cells of `step` are emitted, then one cell for
//!    `remaining - count * step` when that residue is at least one cent.
//!
//! Cell amounts therefore sum to the cent-truncated remaining amount and the
//! cell count never exceeds `MAX_UNIFORM_CELLS + 1`. Cell ids are positions,
//! so the same `remaining` always yields an identical grid.

use rust_decimal::Decimal;
use saver_domain::{truncate_to_cents, CellId, FundingCell};

/// Upper bound on equal-step cells in one grid.
pub const MAX_UNIFORM_CELLS: usize = 10;

const LADDER: [i64; 3] = [1, 2, 5];

fn one_cent() -> Decimal {
    Decimal::new(1, 2)
}

pub struct GridPartitioner;

impl GridPartitioner {
    /// Builds the saving grid for `remaining`. Returns an empty grid when
    /// there is nothing left to fund.
    pub fn partition(remaining: Decimal) -> Vec<FundingCell> {
        let remaining = truncate_to_cents(remaining);
        if remaining <= Decimal::ZERO {
            return Vec::new();
        }

        let step = Self::step_for(remaining);
        let mut cells = Vec::with_capacity(MAX_UNIFORM_CELLS + 1);
        let mut allotted = Decimal::ZERO;
        while cells.len() < MAX_UNIFORM_CELLS {
            match allotted.checked_add(step) {
                Some(next) if next <= remaining => {
                    cells.push(FundingCell::new(CellId(cells.len() as u32), step));
                    allotted = next;
                }
                _ => break,
            }
        }

        let residue = truncate_to_cents(remaining - allotted);
        if residue >= one_cent() {
            cells.push(FundingCell::new(CellId(cells.len() as u32), residue));
        }
        cells
    }

    /// Smallest ladder step that keeps the uniform part of the grid within
    /// [`MAX_UNIFORM_CELLS`]. `remaining` must be positive.
    pub fn step_for(remaining: Decimal) -> Decimal {
        let limit = Decimal::from(MAX_UNIFORM_CELLS as u64);
        let mut magnitude = one_cent();
        loop {
            for multiplier in LADDER {
                let Some(step) = magnitude.checked_mul(Decimal::from(multiplier)) else {
                    return remaining;
                };
                let fits = remaining
                    .checked_div(step)
                    .map(|ratio| ratio.floor() <= limit)
                    .unwrap_or(false);
                if fits {
                    return truncate_to_cents(step);
                }
            }
            magnitude = match magnitude.checked_mul(Decimal::TEN) {
                Some(next) => next,
                None => return remaining,
            };
        }
    }

    /// Sum of all cell amounts in `cells`.
    pub fn total(cells: &[FundingCell]) -> Decimal {
        cells.iter().map(|cell| cell.amount).sum()
    }
}
