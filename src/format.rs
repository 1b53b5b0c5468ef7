use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

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

/// `-$1,234.50` style, always two decimals.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), frac)
}

/// Share of `limit` used by `spent`, clamped to 0..=100 for bar widths.
pub fn percent_of(spent: Decimal, limit: Decimal) -> u32 {
    if limit <= Decimal::ZERO {
        return 0;
    }
    let pct = (spent / limit * Decimal::ONE_HUNDRED).round();
    if pct <= Decimal::ZERO {
        0
    } else if pct >= Decimal::ONE_HUNDRED {
        100
    } else {
        pct.to_u32().unwrap_or(0)
    }
}
