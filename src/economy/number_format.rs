//! Decimal rendering of balances, configured the way a `#,##0.##` style pattern would be.
use thousands::Separable;

use crate::economy::MAX_FRACTION_DIGITS;

/// Character separating the integer part from the fraction.
const DECIMAL_SEPARATOR: char = '.';

/// A configured number formatter.
///
/// Values are rounded half-to-even on their exact binary value, which is what
/// the standard library's fixed-precision formatting does. Trailing zeros in
/// the fraction are never printed, so `max_fraction_digits` is an upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Maximum number of digits kept after the decimal separator.
    max_fraction_digits: usize,
    /// Whether the integer part is split into groups of three.
    grouping: bool,
    /// Whether a zero integer part is printed in front of a fraction (`0.5` vs `.5`).
    leading_zero: bool,
}

impl NumberFormat {
    /// Integer-style formatter keeping at most `points` fraction digits, without grouping.
    pub fn with_precision(points: usize) -> Self {
        NumberFormat {
            max_fraction_digits: points,
            grouping: false,
            leading_zero: true,
        }
    }

    /// Whole numbers only, no grouping (`#`).
    pub fn integer() -> Self {
        NumberFormat {
            max_fraction_digits: 0,
            grouping: false,
            leading_zero: false,
        }
    }

    /// Whole numbers with thousands separators (`#,###`).
    pub fn grouped() -> Self {
        NumberFormat {
            max_fraction_digits: 0,
            grouping: true,
            leading_zero: false,
        }
    }

    /// At most one fraction digit, no grouping (`#.#`).
    pub fn compact() -> Self {
        NumberFormat {
            max_fraction_digits: 1,
            grouping: false,
            leading_zero: false,
        }
    }

    /// Formats the value according to this formatter's configuration.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let precision = self.max_fraction_digits.min(MAX_FRACTION_DIGITS);
        let rendered = format!("{value:.precision$}");
        let (sign, unsigned) = match rendered.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", rendered.as_str()),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let fraction = fraction.trim_end_matches('0');

        let mut out = String::with_capacity(rendered.len() + integer.len() / 3);
        out.push_str(sign);
        // `#.#` prints 0.5 as ".5"
        let bare_fraction = integer == "0" && !fraction.is_empty() && !self.leading_zero;
        if self.grouping {
            out.push_str(&integer.separate_with_commas());
        } else if !bare_fraction {
            out.push_str(integer);
        }
        if !fraction.is_empty() {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(fraction);
        }
        out
    }
}
