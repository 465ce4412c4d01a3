//! Types and constants used throughout the balance formatter.

/// Account identifier type, as handed over by the placeholder layer.
pub type AccountId = String;

/// Balance type, the raw floating-point value reported by the economy.
pub type Balance = f64;

/// Smallest number of fraction digits used by the plain `balance` placeholder.
pub const MIN_BALANCE_PRECISION: usize = 2;

/// Upper bound on rendered fraction digits.
/// A double never carries more significant fraction digits than this.
pub const MAX_FRACTION_DIGITS: usize = 340;

/// Magnitude suffixes for the compact form, one per power of 1000.
pub const SUFFIXES: [&str; 10] = ["", "K", "M", "B", "T", "q", "Q", "s", "S", "O"];
