//! Economy providers supplying account balances to the formatter.
use std::{collections::HashMap, io, path::Path};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use thiserror::Error;

use crate::economy::{AccountId, Balance};

/// The capability the formatter needs from an economy.
pub trait Economy {
    /// Gets the current balance of the account. Accounts without a stored balance read as zero.
    fn get_balance(&self, account: &AccountId) -> Balance;

    /// Gets the number of fraction digits the economy prefers for display.
    fn fractional_digits(&self) -> i32;
}

/// A single row of the balances file.
#[derive(Deserialize, Debug, Clone)]
pub struct BalanceRecord {
    /// The account the balance belongs to.
    account: AccountId,

    /// The stored balance.
    balance: Balance,
}

/// An in-memory economy, usually loaded from a CSV file of `account,balance` rows.
#[derive(Debug, Default)]
pub struct Ledger {
    /// A map of accounts to their balances.
    balances: HashMap<AccountId, Balance>,
    /// The display precision reported to the formatter.
    fractional_digits: i32,
}

impl Ledger {
    /// Creates an empty ledger reporting the given display precision.
    pub fn new(fractional_digits: i32) -> Self {
        Ledger {
            balances: HashMap::new(),
            fractional_digits,
        }
    }

    /// Loads a ledger from a CSV file. Malformed and duplicate rows are skipped with a warning.
    pub fn from_path(path: impl AsRef<Path>, fractional_digits: i32) -> Result<Self, LedgerError> {
        let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        Ok(Self::from_csv(reader, fractional_digits))
    }

    /// Loads a ledger from any CSV source.
    #[cfg(test)]
    pub fn from_reader(reader: impl io::Read, fractional_digits: i32) -> Self {
        let reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        Self::from_csv(reader, fractional_digits)
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>, fractional_digits: i32) -> Self {
        let mut ledger = Ledger::new(fractional_digits);
        for record in reader.deserialize::<BalanceRecord>() {
            let result = record.map_err(LedgerError::from).and_then(|record| ledger.insert(record));
            if let Err(err) = result {
                log::warn!("Skipping balance record: {err}");
            }
        }
        log::info!("Loaded {} account balances", ledger.len());
        ledger
    }

    /// Stores the balance of a new account. Returns an error if the account already has one.
    pub fn insert(&mut self, record: BalanceRecord) -> Result<(), LedgerError> {
        if self.balances.contains_key(&record.account) {
            return Err(LedgerError::DuplicateAccount(record.account));
        }
        self.balances.insert(record.account, record.balance);
        Ok(())
    }

    /// Sets the balance of an account, replacing any previous one.
    #[cfg(test)]
    pub fn set_balance(&mut self, account: impl Into<AccountId>, balance: Balance) {
        self.balances.insert(account.into(), balance);
    }

    /// Number of accounts with a stored balance.
    pub fn len(&self) -> usize {
        self.balances.len()
    }
}

impl Economy for Ledger {
    fn get_balance(&self, account: &AccountId) -> Balance {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn fractional_digits(&self) -> i32 {
        self.fractional_digits
    }
}

/// Errors that can occur while loading a ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read balances: {0}")]
    Csv(#[from] csv::Error),
    #[error("Account {0} already has a balance")]
    DuplicateAccount(AccountId),
}
