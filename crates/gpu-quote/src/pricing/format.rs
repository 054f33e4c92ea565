//! Display helpers shared by summaries and comparison tables.

/// US dollars with comma grouping and two decimals, e.g. `$140,160.00`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let rounded = format!("{:.2}", amount.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let sign = if amount < 0.0 && rounded != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Plain `$x.xx`, used for per-card and per-GB rates.
pub fn format_rate(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn format_count(value: impl Into<u64>) -> String {
    group_thousands(&value.into().to_string())
}

/// Percentages keep whatever precision the user typed (`10%`, `12.5%`).
pub fn format_percentage(value: f64) -> String {
    format!("{value}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.994), "$999.99");
        assert_eq!(format_usd(14_016.0), "$14,016.00");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(-2_500.5), "-$2,500.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn counts_and_percentages() {
        assert_eq!(format_count(8u32), "8");
        assert_eq!(format_count(1_500u32), "1,500");
        assert_eq!(format_count(12_000_000u64), "12,000,000");
        assert_eq!(format_percentage(10.0), "10%");
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_rate(0.07), "$0.07");
    }
}
