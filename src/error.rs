use crate::domain::account::AccountId;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Failures raised by account values and the account store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    #[error("Account id {0} already exists!")]
    DuplicateAccountId(AccountId),
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Account id must not be empty")]
    InvalidAccountId,
    #[error("Balance must not be negative: {0}")]
    NegativeBalance(Decimal),
    #[error("Amount must be positive: {0}")]
    InvalidAmount(Decimal),
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("Balance of account {0} would overflow or lose decimal precision")]
    BalanceOverflow(AccountId),
    #[error("Account {0} cannot be locked twice in one operation")]
    AliasedAccounts(AccountId),
}

/// Which endpoint of a transfer an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// Business outcomes of a rejected transfer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("The {side} account {id} was not found")]
    AccountNotFound { side: Side, id: AccountId },
    #[error("Funds cannot be transferred within the same account {0}")]
    SelfTransfer(AccountId),
    #[error("Transfer amount must be positive: {0}")]
    InvalidAmount(Decimal),
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("Balance of account {0} would overflow or lose decimal precision")]
    BalanceOverflow(AccountId),
}

impl TransferError {
    /// Maps a store failure raised during a transfer onto the transfer
    /// taxonomy, resolving which side a missing account was on.
    ///
    /// Only `AccountStore::get`/`modify_pair` and the engine's debit/credit
    /// closure feed this, so only the kinds those can raise are accepted.
    pub(crate) fn from_account_error(err: AccountError, source: &AccountId) -> Self {
        match err {
            AccountError::AccountNotFound(id) => {
                let side = if &id == source {
                    Side::Source
                } else {
                    Side::Destination
                };
                TransferError::AccountNotFound { side, id }
            }
            AccountError::InsufficientFunds {
                account,
                balance,
                requested,
            } => TransferError::InsufficientFunds {
                account,
                balance,
                requested,
            },
            AccountError::BalanceOverflow(id) => TransferError::BalanceOverflow(id),
            AccountError::AliasedAccounts(id) => TransferError::SelfTransfer(id),
            // Ids and amounts are validated before the store is reached, and
            // neither lookup nor pair update creates accounts or sets a raw balance.
            err @ (AccountError::DuplicateAccountId(_)
            | AccountError::InvalidAccountId
            | AccountError::NegativeBalance(_)
            | AccountError::InvalidAmount(_)) => {
                unreachable!("store cannot raise {err:?} during a transfer")
            }
        }
    }
}

/// Top-level error for the ledger service and its adapters.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("Command is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
