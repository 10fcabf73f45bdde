use super::engine::TransferEngine;
use crate::domain::account::{Account, AccountId, Amount, Balance};
use crate::domain::command::{CommandType, LedgerCommand};
use crate::domain::ports::AccountStoreHandle;
use crate::domain::transfer::{TransferReceipt, TransferRequest};
use crate::error::{AccountError, LedgerError, Result, TransferError};
use rust_decimal::Decimal;

/// Account service used by adapters.
///
/// Wraps a store handle and a `TransferEngine` sharing that same handle, so
/// the store remains the single source of truth for balances.
#[derive(Clone)]
pub struct Ledger {
    store: AccountStoreHandle,
    engine: TransferEngine,
}

impl Ledger {
    pub fn new(store: AccountStoreHandle) -> Self {
        let engine = TransferEngine::new(store.clone());
        Self { store, engine }
    }

    pub async fn create_account(&self, account: Account) -> std::result::Result<(), AccountError> {
        tracing::info!(account = %account.id, "creating account");
        self.store.create(account).await
    }

    pub async fn get_account(&self, id: &AccountId) -> std::result::Result<Account, AccountError> {
        self.store.get(id).await
    }

    pub async fn update_account(&self, account: Account) -> std::result::Result<(), AccountError> {
        self.store.update(account).await
    }

    pub async fn deposit(
        &self,
        id: &AccountId,
        amount: Decimal,
    ) -> std::result::Result<Account, AccountError> {
        let amount = Amount::new(amount)?;
        self.store
            .modify(id, Box::new(move |account| account.deposit(amount)))
            .await
    }

    pub async fn withdraw(
        &self,
        id: &AccountId,
        amount: Decimal,
    ) -> std::result::Result<Account, AccountError> {
        let amount = Amount::new(amount)?;
        self.store
            .modify(id, Box::new(move |account| account.withdraw(amount)))
            .await
    }

    pub async fn transfer(
        &self,
        request: &TransferRequest,
    ) -> std::result::Result<TransferReceipt, TransferError> {
        tracing::info!(
            source = %request.source,
            destination = %request.destination,
            amount = %request.amount,
            "transfer requested"
        );
        self.engine.transfer(request).await
    }

    pub async fn accounts(&self) -> std::result::Result<Vec<Account>, AccountError> {
        self.store.all_accounts().await
    }

    /// Applies a single batch command.
    pub async fn execute(&self, command: LedgerCommand) -> Result<()> {
        match command.r#type {
            CommandType::Open => {
                let balance = match command.amount {
                    Some(amount) => Balance::new(amount)?,
                    None => Balance::ZERO,
                };
                self.create_account(Account::with_balance(command.account, balance))
                    .await?;
            }
            CommandType::Deposit => {
                let amount = command.amount.ok_or(LedgerError::MissingField("amount"))?;
                self.deposit(&command.account, amount).await?;
            }
            CommandType::Withdraw => {
                let amount = command.amount.ok_or(LedgerError::MissingField("amount"))?;
                self.withdraw(&command.account, amount).await?;
            }
            CommandType::Transfer => {
                let destination = command
                    .counterparty
                    .ok_or(LedgerError::MissingField("counterparty"))?;
                let amount = command.amount.ok_or(LedgerError::MissingField("amount"))?;
                self.transfer(&TransferRequest::new(command.account, destination, amount))
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryAccountStore;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn id(value: &str) -> AccountId {
        AccountId::new(value).unwrap()
    }

    fn ledger() -> Ledger {
        Ledger::new(Arc::new(InMemoryAccountStore::new()))
    }

    fn command(
        kind: CommandType,
        account: &str,
        counterparty: Option<&str>,
        amount: Option<Decimal>,
    ) -> LedgerCommand {
        LedgerCommand {
            r#type: kind,
            account: id(account),
            counterparty: counterparty.map(id),
            amount,
        }
    }

    #[tokio::test]
    async fn test_add_account() {
        let ledger = ledger();
        let account = Account::with_balance(id("Id-123"), Balance::new(dec!(1000)).unwrap());

        ledger.create_account(account.clone()).await.unwrap();
        assert_eq!(ledger.get_account(&id("Id-123")).await.unwrap(), account);
    }

    #[tokio::test]
    async fn test_add_account_fails_on_duplicate_id() {
        let ledger = ledger();
        let account = Account::new(id("Id-1"));
        ledger.create_account(account.clone()).await.unwrap();

        let err = ledger.create_account(account).await.unwrap_err();
        assert_eq!(err.to_string(), "Account id Id-1 already exists!");
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw() {
        let ledger = ledger();
        ledger.create_account(Account::new(id("A"))).await.unwrap();

        let after = ledger.deposit(&id("A"), dec!(100)).await.unwrap();
        assert_eq!(after.balance.value(), dec!(100));

        let after = ledger.withdraw(&id("A"), dec!(40)).await.unwrap();
        assert_eq!(after.balance.value(), dec!(60));

        assert!(matches!(
            ledger.withdraw(&id("A"), dec!(61)).await,
            Err(AccountError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            ledger.deposit(&id("A"), dec!(0)).await,
            Err(AccountError::InvalidAmount(_))
        ));
        assert_eq!(
            ledger.deposit(&id("missing"), dec!(1)).await,
            Err(AccountError::AccountNotFound(id("missing")))
        );
        assert_eq!(
            ledger.get_account(&id("A")).await.unwrap().balance.value(),
            dec!(60)
        );
    }

    #[tokio::test]
    async fn test_update_account_missing() {
        let ledger = ledger();
        assert_eq!(
            ledger.update_account(Account::new(id("ghost"))).await,
            Err(AccountError::AccountNotFound(id("ghost")))
        );
    }

    #[tokio::test]
    async fn test_execute_batch() {
        let ledger = ledger();
        let commands = vec![
            command(CommandType::Open, "A", None, Some(dec!(5000))),
            command(CommandType::Open, "B", None, None),
            command(CommandType::Deposit, "B", None, Some(dec!(10))),
            command(CommandType::Transfer, "A", Some("B"), Some(dec!(1000))),
            command(CommandType::Withdraw, "A", None, Some(dec!(500))),
        ];
        for cmd in commands {
            ledger.execute(cmd).await.unwrap();
        }

        let accounts = ledger.accounts().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].balance.value(), dec!(3500));
        assert_eq!(accounts[1].balance.value(), dec!(1010));
    }

    #[tokio::test]
    async fn test_execute_reports_missing_fields() {
        let ledger = ledger();
        ledger
            .execute(command(CommandType::Open, "A", None, Some(dec!(1))))
            .await
            .unwrap();

        let err = ledger
            .execute(command(CommandType::Transfer, "A", None, Some(dec!(1))))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::MissingField("counterparty")));

        let err = ledger
            .execute(command(CommandType::Deposit, "A", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::MissingField("amount")));
    }

    #[tokio::test]
    async fn test_accounts_returns_store_error_type() {
        let ledger = ledger();
        ledger.create_account(Account::new(id("B"))).await.unwrap();
        ledger.create_account(Account::new(id("A"))).await.unwrap();

        let accounts: std::result::Result<Vec<Account>, AccountError> = ledger.accounts().await;
        let ids: Vec<String> = accounts.unwrap().into_iter().map(|a| a.id.into()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_execute_open_with_negative_balance() {
        let ledger = ledger();
        let err = ledger
            .execute(command(CommandType::Open, "A", None, Some(dec!(-1))))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Account(AccountError::NegativeBalance(_))
        ));
        assert!(ledger.get_account(&id("A")).await.is_err());
    }
}
