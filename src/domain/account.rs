use crate::error::AccountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, non-empty account identifier.
///
/// Ordering is byte-wise on the underlying string, which is what the store
/// relies on to pick a canonical lock order for two-account operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Result<Self, AccountError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(AccountError::InvalidAccountId)
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monetary balance that can never go below zero.
///
/// All arithmetic is checked and exact: debits that would go negative, and any
/// result `Decimal` could only represent by rounding, return `None` instead of
/// producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, AccountError> {
        if value < Decimal::ZERO {
            Err(AccountError::NegativeBalance(value))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn credit(self, amount: Amount) -> Option<Self> {
        let (balance, amount) = (self.0, amount.value());
        let sum = balance.checked_add(amount)?;
        // Undo the addition against each operand; any rounding shows up here.
        let exact =
            sum.checked_sub(amount) == Some(balance) && sum.checked_sub(balance) == Some(amount);
        exact.then_some(Self(sum))
    }

    pub fn debit(self, amount: Amount) -> Option<Self> {
        let (balance, amount) = (self.0, amount.value());
        if balance < amount {
            return None;
        }
        let difference = balance.checked_sub(amount)?;
        let exact = difference.checked_add(amount) == Some(balance)
            && balance.checked_sub(difference) == Some(amount);
        exact.then_some(Self(difference))
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = AccountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A strictly positive amount of money to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, AccountError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(AccountError::InvalidAmount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AccountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A ledger entry: identifier plus non-negative balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "accountId")]
    pub id: AccountId,
    #[serde(default)]
    pub balance: Balance,
}

impl Account {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: Balance::ZERO,
        }
    }

    pub fn with_balance(id: AccountId, balance: Balance) -> Self {
        Self { id, balance }
    }

    /// Adds funds to the balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), AccountError> {
        self.balance = self
            .balance
            .credit(amount)
            .ok_or_else(|| AccountError::BalanceOverflow(self.id.clone()))?;
        Ok(())
    }

    /// Removes funds if sufficient; the balance is untouched otherwise.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), AccountError> {
        if self.balance.value() < amount.value() {
            return Err(AccountError::InsufficientFunds {
                account: self.id.clone(),
                balance: self.balance.value(),
                requested: amount.value(),
            });
        }
        self.balance = self
            .balance
            .debit(amount)
            .ok_or_else(|| AccountError::BalanceOverflow(self.id.clone()))?;
        Ok(())
    }
}
