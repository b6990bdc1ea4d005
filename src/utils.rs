//! Display-width helpers for column-aligned reports.
//!
//! Widths are terminal columns, not bytes or chars: CJK and other wide
//! characters count as two columns.
//! - [`display_width`] - column width of a string
//! - [`truncate`] - cut a string to a column budget, adding "..."
//! - [`pad`] - right-pad a string with spaces to a column width

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Column width of a string.
///
/// # Examples
/// ```
/// use ipnotes::utils::display_width;
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("网关"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to at most `max_width` columns, adding "..." if truncated.
///
/// # Examples
/// ```
/// use ipnotes::utils::truncate;
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("this is long", 10), "this is...");
/// ```
pub fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let budget = max_width - ELLIPSIS.len();
    let mut used = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push_str(ELLIPSIS);
    result
}

/// Right-pad a string with spaces up to `width` columns.
///
/// # Examples
/// ```
/// use ipnotes::utils::pad;
/// assert_eq!(pad("ab", 4), "ab  ");
/// assert_eq!(pad("网", 4), "网  ");
/// ```
pub fn pad(s: &str, width: usize) -> String {
    let current = display_width(s);
    let mut result = String::with_capacity(s.len() + width.saturating_sub(current));
    result.push_str(s);
    result.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    result
}
