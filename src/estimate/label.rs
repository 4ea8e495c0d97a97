//! Display labels for estimates

/// Label shown when no figure is known.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Format an estimate as `"Unknown"`, `"45,400"` or `"20,000 to 35,000"`.
///
/// Values are truncated to whole deaths before grouping.
pub fn format_range(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(low), Some(high)) if low == high => group_thousands(low.trunc() as i64),
        (Some(low), Some(high)) => format!(
            "{} to {}",
            group_thousands(low.trunc() as i64),
            group_thousands(high.trunc() as i64)
        ),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Insert `,` every three digits: `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&value.unsigned_abs().to_string()))
}

/// Round to `decimals` places and group the integer part.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
