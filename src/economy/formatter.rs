//! The balance formatter, answering balance placeholders for an account.
use crate::economy::{
    AccountId, Balance, CompactFormat, Directive, DirectiveError, Economy, MIN_BALANCE_PRECISION,
    NumberFormat, PrecisionCache,
};

/// Renders account balances for placeholder directives.
///
/// Every formatter is built once here and owned by the instance, so a single
/// `BalanceFormatter` can be shared between threads.
pub struct BalanceFormatter<E> {
    /// The economy the balances are read from.
    economy: E,
    /// Formatters for `balance_<N>dp` and `balance`.
    precisions: PrecisionCache,
    /// Formatter for `balance_fixed`.
    fixed: NumberFormat,
    /// Formatter for `balance_commas`.
    commas: NumberFormat,
    /// Formatter for `balance_formatted`.
    compact: CompactFormat,
}

impl<E: Economy> BalanceFormatter<E> {
    /// Creates a formatter reading balances from the given economy.
    pub fn new(economy: E) -> Self {
        BalanceFormatter {
            economy,
            precisions: PrecisionCache::new(),
            fixed: NumberFormat::integer(),
            commas: NumberFormat::grouped(),
            compact: CompactFormat::new(),
        }
    }

    /// Gets the precision formatter cache.
    pub fn precisions(&self) -> &PrecisionCache {
        &self.precisions
    }

    /// Resolves a placeholder for an account.
    ///
    /// Returns an empty string when there is no account, and `None` when the
    /// placeholder is not a balance directive so another handler may try it.
    pub fn on_request(&self, account: Option<&AccountId>, params: &str) -> Option<String> {
        let Some(account) = account else {
            return Some(String::new());
        };
        let balance = self.economy.get_balance(account);
        self.format(balance, params)
    }

    /// Formats a balance for a placeholder, without looking up any account.
    pub fn format(&self, balance: Balance, params: &str) -> Option<String> {
        match Directive::parse(params) {
            Ok(directive) => Some(self.render(balance, &directive)),
            Err(DirectiveError::Unrecognized) => {
                log::debug!("Unrecognized balance placeholder: {params}");
                None
            }
            Err(err) => {
                log::warn!("Invalid balance placeholder {params}: {err}");
                Some(err.to_string())
            }
        }
    }

    /// Renders a balance for an already parsed directive.
    pub fn render(&self, balance: Balance, directive: &Directive) -> String {
        match directive {
            Directive::Balance => {
                let points = usize::try_from(self.economy.fractional_digits())
                    .unwrap_or_default()
                    .max(MIN_BALANCE_PRECISION);
                self.precisions.format(balance, points)
            }
            Directive::Fixed => self.fixed.format(balance),
            Directive::Formatted => self.compact.format(balance),
            Directive::Commas => self.commas.format(balance),
            Directive::DecimalPoints(points) => self.precisions.format(balance, *points),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::BalanceFormatter;
    use crate::economy::{Directive, Ledger};

    fn with_balance(balance: f64, fractional_digits: i32) -> BalanceFormatter<Ledger> {
        let mut ledger = Ledger::new(fractional_digits);
        ledger.set_balance("alice", balance);
        BalanceFormatter::new(ledger)
    }

    fn request(formatter: &BalanceFormatter<Ledger>, params: &str) -> Option<String> {
        formatter.on_request(Some(&"alice".to_string()), params)
    }

    #[test]
    fn test_missing_account() {
        let formatter = with_balance(10.0, 2);
        assert_eq!(formatter.on_request(None, "balance"), Some(String::new()));
        assert_eq!(formatter.on_request(None, "nonsense"), Some(String::new()));
        assert_eq!(formatter.precisions().len(), 0);
    }

    #[test]
    fn test_unknown_account_reads_zero() {
        let formatter = with_balance(10.0, 2);
        let result = formatter.on_request(Some(&"bob".to_string()), "balance_commas");
        assert_eq!(result.as_deref(), Some("0"));
    }

    #[test]
    fn test_balance_uses_minimum_precision() {
        let formatter = with_balance(10.005, 0);
        assert_eq!(request(&formatter, "balance").as_deref(), Some("10.01"));

        let formatter = with_balance(1234.567, 0);
        assert_eq!(request(&formatter, "balance").as_deref(), Some("1234.57"));
    }

    #[test]
    fn test_decimal_points_round_half_to_even() {
        let formatter = with_balance(0.125, 2);
        assert_eq!(request(&formatter, "balance_2dp").as_deref(), Some("0.12"));
        assert_eq!(formatter.format(0.375, "balance_2dp").as_deref(), Some("0.38"));
    }

    #[test]
    fn test_balance_uses_economy_precision() {
        let formatter = with_balance(1234.5678, 3);
        assert_eq!(request(&formatter, "balance").as_deref(), Some("1234.568"));

        let formatter = with_balance(1234.5678, -1);
        assert_eq!(request(&formatter, "balance").as_deref(), Some("1234.57"));
    }

    #[test]
    fn test_fixed() {
        let formatter = with_balance(1234567.89, 2);
        assert_eq!(request(&formatter, "balance_fixed").as_deref(), Some("1234568"));
    }

    #[test]
    fn test_commas() {
        let formatter = with_balance(1234567.0, 2);
        assert_eq!(request(&formatter, "balance_commas").as_deref(), Some("1,234,567"));
    }

    #[test]
    fn test_formatted() {
        for (balance, expected) in [
            (999.0, "999"),
            (1200.0, "1.2K"),
            (1_000_000.0, "1M"),
            (0.0, "0.0"),
        ] {
            let formatter = with_balance(balance, 2);
            assert_eq!(request(&formatter, "balance_formatted").as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_decimal_points() {
        let formatter = with_balance(1234.5, 2);
        assert_eq!(request(&formatter, "balance_2dp").as_deref(), Some("1234.5"));
        assert_eq!(formatter.format(1234.4, "balance_0dp").as_deref(), Some("1234"));
        assert_eq!(request(&formatter, "balance_3dp").as_deref(), Some("1234.5"));
    }

    #[test]
    fn test_decimal_points_reuses_formatter() {
        let formatter = with_balance(3.14159, 2);
        let first = request(&formatter, "balance_3dp");
        let cached = formatter.precisions().get(3);
        let second = request(&formatter, "balance_3dp");
        assert_eq!(first.as_deref(), Some("3.142"));
        assert_eq!(first, second);
        assert_eq!(formatter.precisions().built(), 1);
        assert!(Arc::ptr_eq(&cached, &formatter.precisions().get(3)));
    }

    #[test]
    fn test_balance_shares_cache_with_decimal_points() {
        let formatter = with_balance(3.14159, 2);
        request(&formatter, "balance");
        request(&formatter, "balance_2dp");
        assert_eq!(formatter.precisions().built(), 1);
    }

    #[test]
    fn test_invalid_number() {
        let formatter = with_balance(1.0, 2);
        assert_eq!(
            request(&formatter, "balance_99999999999dp").as_deref(),
            Some("99999999999 is not a valid number")
        );
    }

    #[test]
    fn test_no_match() {
        let formatter = with_balance(1.0, 2);
        assert_eq!(request(&formatter, "balance_abcdp"), None);
        assert_eq!(request(&formatter, "balances"), None);
        assert_eq!(request(&formatter, ""), None);
    }

    #[test]
    fn test_render_is_pure() {
        let formatter = with_balance(0.0, 2);
        let directive = Directive::DecimalPoints(1);
        assert_eq!(formatter.render(2.25, &directive), formatter.render(2.25, &directive));
        assert_eq!(formatter.format(5.0, "balance_fixed").as_deref(), Some("5"));
    }

    #[test]
    fn test_shared_between_threads() {
        let formatter = with_balance(1500.0, 2);
        std::thread::scope(|scope| {
            for points in 0..4 {
                let formatter = &formatter;
                scope.spawn(move || {
                    let params = format!("balance_{points}dp");
                    assert_eq!(request(formatter, &params).as_deref(), Some("1500"));
                    assert_eq!(request(formatter, "balance_formatted").as_deref(), Some("1.5K"));
                });
            }
        });
        assert_eq!(formatter.precisions().len(), 4);
    }
}
