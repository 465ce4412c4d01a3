//! Compact balance rendering with magnitude suffixes, 1200 -> 1.2K.
use crate::economy::{NumberFormat, SUFFIXES};

/// Renders balances scaled down by powers of 1000 with a suffix from [`SUFFIXES`].
#[derive(Debug, Clone)]
pub struct CompactFormat {
    /// Formatter for the scaled value (`#.#`).
    format: NumberFormat,
}

impl CompactFormat {
    /// Creates a compact formatter.
    pub fn new() -> Self {
        CompactFormat {
            format: NumberFormat::compact(),
        }
    }

    /// Index into [`SUFFIXES`] for the balance, if there is a suffix for it.
    ///
    /// Balances below 1 (including zero, whose logarithm is -inf) and from
    /// 10^30 upwards have no suffix. A NaN logarithm (negative balance) casts
    /// to index 0.
    pub fn suffix_index(balance: f64) -> Option<usize> {
        let index = (balance.log10() / 3.0).floor() as i32;
        usize::try_from(index).ok().filter(|&index| index < SUFFIXES.len())
    }

    /// Formats the balance, falling back to its plain representation when out of range.
    pub fn format(&self, balance: f64) -> String {
        match Self::suffix_index(balance) {
            Some(index) => {
                let value = balance / 1000f64.powi(index as i32);
                format!("{}{}", self.format.format(value), SUFFIXES[index])
            }
            None => format!("{balance:?}"),
        }
    }
}

impl Default for CompactFormat {
    fn default() -> Self {
        Self::new()
    }
}
