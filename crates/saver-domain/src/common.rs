//! Money and wire helpers shared by the goal-tracking primitives.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de::Deserializer, Deserialize};

/// Number of fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Truncates `amount` toward zero to whole cents.
///
/// Grid cells never promise more than the remaining balance, so sub-cent
/// residue is dropped instead of rounded up.
pub fn truncate_to_cents(amount: Decimal) -> Decimal {
    let mut truncated = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero);
    truncated.rescale(MONEY_SCALE);
    truncated
}

/// `part` as a percentage of `whole`, saturating at `Decimal::MAX` when the
/// ratio does not fit. `whole` must be positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Reads a ledger identifier that may be encoded as a JSON string or integer.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn truncate_drops_sub_cent_digits() {
        assert_eq!(truncate_to_cents(dec!(12.349)), dec!(12.34));
        assert_eq!(truncate_to_cents(dec!(0.009)), dec!(0.00));
        assert_eq!(truncate_to_cents(dec!(7)).to_string(), "7.00");
    }

    #[test]
    fn percent_of_handles_amounts_near_the_decimal_limit() {
        assert_eq!(percent_of(dec!(250), dec!(1000)), dec!(25));
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert_eq!(percent_of(huge, huge), dec!(100));
        assert_eq!(percent_of(Decimal::MAX, dec!(0.01)), Decimal::MAX);
    }
}
