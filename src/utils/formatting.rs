//! Formatting utilities used for CLI and export outputs.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

pub fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Terminal columns taken by `s`, ignoring colour codes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Pad to a display width; Hangul takes two columns, so `format!("{:<w$}")`
/// would misalign the tables.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = visible_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = visible_width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

/// 1234567 → "1,234,567"
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if amount < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// 154720, "원" → "154,720원"
pub fn format_won(amount: i64, suffix: &str) -> String {
    format!("{}{}", group_thousands(amount), suffix)
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "-" }
}
