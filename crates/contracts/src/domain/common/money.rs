//! Денежные значения хранятся как уже отформатированные строки ("50,000 ₸").

/// Суффикс валюты, которым заканчивается каждая сумма
pub const CURRENCY_SUFFIX: &str = " ₸";

/// Format whole tenge with comma-separated triads
/// Example: 20000 -> "20,000 ₸"
pub fn format_tenge(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, grouped, CURRENCY_SUFFIX)
}

/// Убирает суффикс валюты: "20,000 ₸" -> "20,000"
pub fn strip_currency(amount: &str) -> &str {
    amount
        .strip_suffix(CURRENCY_SUFFIX)
        .or_else(|| amount.strip_suffix('₸'))
        .unwrap_or(amount)
        .trim_end()
}

/// Parse a formatted amount back into whole tenge
/// Example: "50,000 ₸" -> Some(50000)
pub fn parse_tenge(amount: &str) -> Option<i64> {
    let digits: String = strip_currency(amount.trim())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse::<i64>().ok()
}
