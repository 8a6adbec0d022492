//! Magnitude formatting for usage totals
//!
//! Renders numbers the way chart titles and legends show them: three
//! significant decimals at most, trailing zeros trimmed, and a K/M/G/...
//! suffix for each power of 1000.

const SUFFIXES: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

/// Format a float with up to three decimals and no trailing zeros
fn float_format(n: f64) -> String {
    let s = format!("{n:.3}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a usage total with a magnitude suffix
///
/// # Examples
/// ```
/// use awsusage_core::humanize::humanize;
///
/// assert_eq!(humanize(0.0), "0");
/// assert_eq!(humanize(999.0), "999");
/// assert_eq!(humanize(1_500.0), "1.5K");
/// assert_eq!(humanize(2_345_678.0), "2.346M");
/// assert_eq!(humanize(7e9), "7G");
/// ```
pub fn humanize(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let mut scaled = n;
    let mut order = 0;
    while scaled.abs() >= 1000.0 && order < SUFFIXES.len() {
        scaled /= 1000.0;
        order += 1;
    }

    if order == 0 {
        float_format(n)
    } else {
        format!("{}{}", float_format(scaled), SUFFIXES[order - 1])
    }
}
