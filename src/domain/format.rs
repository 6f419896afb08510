// Fixed-point value formatting for KPI labels and chart ticks
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    /// Whole number, rounded like the other formats.
    Count,
    Currency { decimals: usize },
    Percent { decimals: usize },
}

impl ValueFormat {
    pub fn apply(&self, value: f64) -> String {
        let value = finite_or_zero(value);
        match *self {
            ValueFormat::Count => to_fixed(value, 0),
            ValueFormat::Currency { decimals } => format!("${}", to_fixed(value, decimals)),
            ValueFormat::Percent { decimals } => format!("{}%", to_fixed(value, decimals)),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Fixed-point rendering with ties rounded away from zero (87.25 -> "87.3").
///
/// `format!("{:.1}")` alone rounds exact ties to even, which would print
/// "87.2" for the same input.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let value = finite_or_zero(value);
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    // Avoid "-0.00" for tiny negatives that round to zero.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_two_decimals() {
        let fmt = ValueFormat::Currency { decimals: 2 };
        assert_eq!(fmt.apply(1234.5), "$1234.50");
        assert_eq!(fmt.apply(0.0), "$0.00");
    }

    #[test]
    fn test_percent_rounds_ties_up() {
        let fmt = ValueFormat::Percent { decimals: 1 };
        assert_eq!(fmt.apply(87.25), "87.3%");
        assert_eq!(fmt.apply(50.0), "50.0%");
    }

    #[test]
    fn test_count() {
        assert_eq!(ValueFormat::Count.apply(42.0), "42");
        assert_eq!(ValueFormat::Count.apply(2.5), "3");
        assert_eq!(ValueFormat::Count.apply(0.1 + 0.2), "0");
    }

    #[test]
    fn test_large_count_is_not_truncated() {
        assert_eq!(ValueFormat::Count.apply(1e20), "100000000000000000000");
        assert_eq!(ValueFormat::Count.apply(-1e20), "-100000000000000000000");
    }

    #[test]
    fn test_non_finite_prints_zero() {
        assert_eq!(ValueFormat::Count.apply(f64::NAN), "0");
        assert_eq!(ValueFormat::Currency { decimals: 0 }.apply(f64::INFINITY), "$0");
        assert_eq!(ValueFormat::Percent { decimals: 1 }.apply(f64::NAN), "0.0%");
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        assert_eq!(to_fixed(-0.001, 2), "0.00");
        assert_eq!(to_fixed(-1.5, 0), "-2");
    }
}
