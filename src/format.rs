use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const BAR_CHAR: char = '#';

/// Renders an amount as `$1,234.50`. Negative values get a leading `-`.
pub fn format_currency(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.abs().round_dp(2);
    let plain = format!("{:.2}", rounded);
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < Decimal::ZERO && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}{}.{}", sign, currency_symbol, grouped, fraction)
}

pub fn render_bar(length: usize) -> String {
    std::iter::repeat_n(BAR_CHAR, length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency_small() {
        assert_eq!(format_currency(Decimal::from_str("3.5").unwrap(), "$"), "$3.50");
    }

    #[test]
    fn test_format_currency_thousands() {
        assert_eq!(format_currency(Decimal::from_str("1234567.891").unwrap(), "$"), "$1,234,567.89");
        assert_eq!(format_currency(Decimal::from(1000), "$"), "$1,000.00");
        assert_eq!(format_currency(Decimal::from(100), "$"), "$100.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Decimal::from_str("-42.1").unwrap(), "€"), "-€42.10");
    }

    #[test]
    fn test_format_currency_zero() {
        assert_eq!(format_currency(Decimal::ZERO, "$"), "$0.00");
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(0), "");
        assert_eq!(render_bar(3), "###");
    }
}
