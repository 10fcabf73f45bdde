use super::account::{Account, AccountId};
use crate::error::AccountError;
use async_trait::async_trait;
use std::sync::Arc;

/// Closure applied to a locked copy of one account. The copy is written back
/// only when it returns `Ok`.
pub type AccountUpdate<'a> = Box<dyn FnOnce(&mut Account) -> Result<(), AccountError> + Send + 'a>;

/// Closure applied to locked copies of two accounts, in the order the caller
/// named them. Both copies are written back only when it returns `Ok`.
pub type PairUpdate<'a> =
    Box<dyn FnOnce(&mut Account, &mut Account) -> Result<(), AccountError> + Send + 'a>;

/// Authoritative, concurrency-safe keeper of all accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Exactly one of several racing creates for the
    /// same id succeeds.
    async fn create(&self, account: Account) -> Result<(), AccountError>;

    /// Returns a snapshot; it is not kept fresh after the call returns.
    async fn get(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Replaces the stored balance of an existing account.
    async fn update(&self, account: Account) -> Result<(), AccountError>;

    async fn modify(
        &self,
        id: &AccountId,
        update: AccountUpdate<'_>,
    ) -> Result<Account, AccountError>;

    /// Holds both accounts exclusively for the duration of `update`, acquiring
    /// them in canonical id order regardless of argument order.
    async fn modify_pair(
        &self,
        first: &AccountId,
        second: &AccountId,
        update: PairUpdate<'_>,
    ) -> Result<(Account, Account), AccountError>;

    /// Snapshots of every account, sorted by id.
    async fn all_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

pub type AccountStoreHandle = Arc<dyn AccountStore>;
