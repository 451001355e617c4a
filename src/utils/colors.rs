/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Profit color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_profit(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

pub fn colorize_amount(value: i64, text: &str) -> String {
    format!("{}{}{}", color_for_profit(value), text, RESET)
}

/// Paid flags render green, pending ones yellow, not-applicable ones grey.
pub fn colorize_flag(paid: bool, applicable: bool) -> String {
    if !applicable {
        format!("{GREY}n/a{RESET}")
    } else if paid {
        format!("{GREEN}paid{RESET}")
    } else {
        format!("{YELLOW}due{RESET}")
    }
}
