/// Largest number of decimals any formatter will print.
pub const MAX_PRECISION: u8 = 15;

/// Parses a number literal as written in a calculator line.
///
/// Thousands separators are removed and a trailing `%` is ignored, so
/// `1,234.5`, `-2E-4` and `15%` all parse. The percent sign does not scale
/// the result; callers decide what a percentage means.
///
/// ## Example
/// ```
/// use tally::util::num::parse_number;
///
/// assert_eq!(parse_number("1,234.5"), Some(1234.5));
/// assert_eq!(parse_number(".5"), Some(0.5));
/// assert_eq!(parse_number("-2E-4"), Some(-0.0002));
/// assert_eq!(parse_number("15%"), Some(15.0));
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub fn parse_number(literal: &str) -> Option<f64> {
    let cleaned: String = literal.trim_end_matches('%')
                                 .chars()
                                 .filter(|c| *c != ',')
                                 .collect();
    cleaned.parse().ok()
}

/// Formats `n` with `decimals` fixed decimals, then strips trailing zeros
/// and a dangling decimal point. Negative zero prints as `0`.
///
/// ## Example
/// ```
/// use tally::util::num::trim_fixed;
///
/// assert_eq!(trim_fixed(2.50, 2), "2.5");
/// assert_eq!(trim_fixed(3.0, 4), "3");
/// assert_eq!(trim_fixed(-0.0001, 2), "0");
/// ```
#[must_use]
pub fn trim_fixed(n: f64, decimals: usize) -> String {
    let mut s = format!("{n:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Number of decimals shown for a plain number of this magnitude.
///
/// Whole numbers show none; otherwise 2 at or above 1, 4 at or above 0.01
/// and 6 below.
#[must_use]
pub fn auto_decimals(n: f64) -> usize {
    let abs = n.abs();
    if n.fract() == 0.0 {
        0
    } else if abs >= 1.0 {
        2
    } else if abs >= 0.01 {
        4
    } else {
        6
    }
}

/// Formats a plain number using [`auto_decimals`].
///
/// ## Example
/// ```
/// use tally::util::num::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(3.14159), "3.14");
/// assert_eq!(format_number(0.0375), "0.0375");
/// assert_eq!(format_number(0.000_012_34), "0.000012");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    trim_fixed(n, auto_decimals(n))
}

/// Formats a plain number with a fixed number of decimals, trimmed.
#[must_use]
pub fn format_with_decimals(n: f64, decimals: u8) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    trim_fixed(n, usize::from(decimals.min(MAX_PRECISION)))
}
