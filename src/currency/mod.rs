//! Amount formatting for terminal output.

use rust_decimal::{Decimal, RoundingStrategy};
use saver_config::Config;

/// Currency symbol, or the ISO code itself when no symbol is known.
pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "BRL" => "R$",
        "INR" => "₹",
        _ => code,
    }
}

/// Formats amounts as `$1,234.50` for the configured currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    code: String,
    precision: u32,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new("USD", 2)
    }
}

impl CurrencyFormatter {
    pub fn new(code: impl Into<String>, precision: u32) -> Self {
        Self {
            code: code.into().to_ascii_uppercase(),
            precision,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.currency.clone(), config.precision())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn format(&self, amount: Decimal) -> String {
        let body = format_number(amount.abs(), self.precision);
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        let symbol = symbol_for(&self.code);
        if symbol == self.code {
            format!("{sign}{} {body}", self.code)
        } else {
            format!("{sign}{symbol}{body}")
        }
    }
}

/// Percentage with two decimals, e.g. `62.50%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_number(value, 2))
}

/// Rounds half away from zero to `precision` digits and groups thousands.
pub fn format_number(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", precision as usize, rounded);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, fraction)) => format!("{sign}{}.{fraction}", group_digits(int_part)),
        None => format!("{sign}{}", group_digits(unsigned)),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
