use crate::domain::account::{Account, AccountId};
use crate::domain::ports::{AccountStore, AccountUpdate, PairUpdate};
use crate::error::AccountError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

type Slot = Arc<Mutex<Account>>;

/// A thread-safe in-memory store for accounts.
///
/// The map itself sits behind an `RwLock` that is only held long enough to
/// insert an entry or clone its handle. Each account has its own `Mutex`, so
/// operations on disjoint accounts never contend with each other.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Slot>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: &AccountId) -> Result<Slot, AccountError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| AccountError::AccountNotFound(id.clone()))
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.id.clone()) {
            Entry::Occupied(_) => Err(AccountError::DuplicateAccountId(account.id)),
            Entry::Vacant(entry) => {
                tracing::debug!(account = %account.id, balance = %account.balance, "account created");
                entry.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    async fn get(&self, id: &AccountId) -> Result<Account, AccountError> {
        let slot = self.slot(id).await?;
        let account = slot.lock().await;
        Ok(account.clone())
    }

    async fn update(&self, account: Account) -> Result<(), AccountError> {
        let slot = self.slot(&account.id).await?;
        let mut stored = slot.lock().await;
        stored.balance = account.balance;
        Ok(())
    }

    async fn modify(
        &self,
        id: &AccountId,
        update: AccountUpdate<'_>,
    ) -> Result<Account, AccountError> {
        let slot = self.slot(id).await?;
        let mut stored = slot.lock().await;

        let mut working = stored.clone();
        update(&mut working)?;
        *stored = working.clone();
        Ok(working)
    }

    async fn modify_pair(
        &self,
        first: &AccountId,
        second: &AccountId,
        update: PairUpdate<'_>,
    ) -> Result<(Account, Account), AccountError> {
        if first == second {
            return Err(AccountError::AliasedAccounts(first.clone()));
        }

        let first_slot = self.slot(first).await?;
        let second_slot = self.slot(second).await?;

        // Canonical order: the smaller id is always locked first.
        let (mut first_guard, mut second_guard) = if first < second {
            let a = first_slot.lock().await;
            let b = second_slot.lock().await;
            (a, b)
        } else {
            let b = second_slot.lock().await;
            let a = first_slot.lock().await;
            (a, b)
        };
        tracing::trace!(%first, %second, "pair locked");

        let mut first_copy = first_guard.clone();
        let mut second_copy = second_guard.clone();
        update(&mut first_copy, &mut second_copy)?;

        *first_guard = first_copy.clone();
        *second_guard = second_copy.clone();
        Ok((first_copy, second_copy))
    }

    async fn all_accounts(&self) -> Result<Vec<Account>, AccountError> {
        let slots: Vec<Slot> = {
            let accounts = self.accounts.read().await;
            accounts.values().cloned().collect()
        };

        let mut snapshot = Vec::with_capacity(slots.len());
        for slot in slots {
            snapshot.push(slot.lock().await.clone());
        }
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(snapshot)
    }
}
