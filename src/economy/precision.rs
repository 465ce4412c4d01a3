//! Cache of precision formatters, keyed by the number of decimal points requested.
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use dashmap::DashMap;

use crate::economy::NumberFormat;

/// Lazily built formatters for `balance_<N>dp` style placeholders.
///
/// Entries are never evicted. Two threads missing on the same key at once may
/// both build a formatter; the map keeps one of them and stays consistent.
#[derive(Debug, Default)]
pub struct PrecisionCache {
    /// Formatters by maximum fraction digits.
    formats: DashMap<usize, Arc<NumberFormat>>,
    /// How many formatters have been built so far.
    built: AtomicUsize,
}

impl PrecisionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves the formatter for `points` decimal points, or builds one if it doesn't exist.
    pub fn get(&self, points: usize) -> Arc<NumberFormat> {
        if let Some(format) = self.formats.get(&points) {
            return Arc::clone(format.value());
        }

        log::debug!("Building formatter for {points} decimal points");
        self.built.fetch_add(1, Ordering::Relaxed);
        let format = Arc::new(NumberFormat::with_precision(points));
        Arc::clone(self.formats.entry(points).or_insert(format).value())
    }

    /// Formats the balance with at most `points` decimal points.
    pub fn format(&self, balance: f64, points: usize) -> String {
        self.get(points).format(balance)
    }

    /// Number of distinct precisions cached.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Number of formatters built over the lifetime of the cache.
    pub fn built(&self) -> usize {
        self.built.load(Ordering::Relaxed)
    }
}
