use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format a GBP amount with thousands separators, e.g. `-£1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let pence = (amount.abs() * 100.0).round() as u64;
    let pounds = pence / 100;
    let rem = pence % 100;
    // avoid "-£0.00" for tiny negatives
    let sign = if amount < 0.0 && pence > 0 { "-" } else { "" };
    format!("{}£{}.{:02}", sign, pounds.to_formatted_string(&Locale::en), rem)
}

/// Format a margin percentage with one decimal place, e.g. `53.3%`.
pub fn format_percent(value: f64) -> String {
    let tenths = if value.is_finite() { (value * 10.0).round() / 10.0 } else { 0.0 };
    let tenths = if tenths == 0.0 { 0.0 } else { tenths };
    format!("{:.1}%", tenths)
}

/// `2024-01` → `Jan 2024`. Anything that is not a `YYYY-MM` month is
/// returned unchanged.
pub fn format_month(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| month.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_thousands() {
        assert_eq!(format_currency(1234.56), "£1,234.56");
        assert_eq!(format_currency(1_500_000.0), "£1,500,000.00");
        assert_eq!(format_currency(0.5), "£0.50");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-250.0), "-£250.00");
        assert_eq!(format_currency(-0.001), "£0.00");
        assert_eq!(format_currency(-0.0), "£0.00");
    }

    #[test]
    fn test_format_currency_rounds_pence() {
        assert_eq!(format_currency(10.006), "£10.01");
        assert_eq!(format_currency(99.999), "£100.00");
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::NAN), "£0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(53.333_333), "53.3%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(-0.04), "0.0%");
        assert_eq!(format_percent(-12.25), "-12.3%");
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2024-01"), "Jan 2024");
        assert_eq!(format_month("2023-12"), "Dec 2023");
        assert_eq!(format_month("Q1"), "Q1");
        assert_eq!(format_month(""), "");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(53.333_333), 53.33);
        assert_eq!(round2(-1.005_1), -1.01);
        assert_eq!(round2(-0.001), 0.0);
    }
}
