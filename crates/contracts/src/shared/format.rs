/// Formats an integer with comma thousands separators
///
/// # Examples
/// ```
/// use contracts::shared::format::format_thousands;
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// assert_eq!(format_thousands(-4200), "-4,200");
/// ```
pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Rupee amount rounded to whole rupees: `₹12,345`
pub fn format_inr(value: f64) -> String {
    let rounded = crate::shared::analytics::round_half_up(value, 0) as i64;
    format!("₹{}", format_thousands(rounded))
}

/// Percentage with one decimal: `33.3%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
