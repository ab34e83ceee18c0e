use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money, Percent};

/// Prefix shown before an amount in `currency`.
pub fn currency_symbol(currency: &Currency) -> String {
    match currency {
        Currency::PEN => "S/ ".into(),
        Currency::USD => "$".into(),
        Currency::EUR => "€".into(),
        Currency::BTC => "₿".into(),
        Currency::Other(code) => format!("{code} "),
    }
}

/// `S/ 1,234.56` style rendering: two decimals, comma thousands.
pub fn format_money(amount: Money, currency: &Currency) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!(
        "{sign}{}{}.{frac_part}",
        currency_symbol(currency),
        group_thousands(int_part)
    )
}

/// `12.50%` style rendering of a 0–100 percentage.
pub fn format_percent(pct: Percent) -> String {
    let rounded = pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
