pub mod pay;

pub use pay::{PayBreakdown, WITHHOLDING_RATE, assignment_pay, assignment_total, calculate_pay};

/// NaN and ±Infinity become 0 so that reports stay renderable.
pub fn safe_number(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// `num / den`, or 0 when the denominator is zero or the result is not finite.
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    safe_number(num / den)
}
