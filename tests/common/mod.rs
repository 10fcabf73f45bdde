#![allow(dead_code)]

use rust_decimal::Decimal;
use std::sync::Arc;
use transfer_ledger::application::ledger::Ledger;
use transfer_ledger::domain::account::{Account, AccountId, Balance};
use transfer_ledger::domain::transfer::TransferRequest;
use transfer_ledger::infrastructure::in_memory::InMemoryAccountStore;

pub fn id(value: &str) -> AccountId {
    AccountId::new(value).unwrap()
}

pub fn request(source: &str, destination: &str, amount: Decimal) -> TransferRequest {
    TransferRequest::new(id(source), id(destination), amount)
}

/// Builds a ledger over a fresh in-memory store with the given opening balances.
pub async fn seeded_ledger(accounts: &[(&str, Decimal)]) -> Ledger {
    let ledger = Ledger::new(Arc::new(InMemoryAccountStore::new()));
    for (name, balance) in accounts {
        ledger
            .create_account(Account::with_balance(id(name), Balance::new(*balance).unwrap()))
            .await
            .unwrap();
    }
    ledger
}

pub async fn balance(ledger: &Ledger, name: &str) -> Decimal {
    ledger.get_account(&id(name)).await.unwrap().balance.value()
}

pub async fn total(ledger: &Ledger) -> Decimal {
    ledger
        .accounts()
        .await
        .unwrap()
        .iter()
        .map(|a| a.balance.value())
        .sum()
}
