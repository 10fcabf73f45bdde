use crate::domain::account::{AccountId, Amount};
use crate::domain::ports::AccountStoreHandle;
use crate::domain::transfer::{TransferReceipt, TransferRequest};
use crate::error::{AccountError, Side, TransferError};

/// Validates and executes transfers between two accounts as one atomic unit.
///
/// The engine holds no balance state of its own. Every read and write goes
/// through the store, and the sufficiency check is repeated inside the
/// store's two-account critical section so that a concurrent transfer
/// draining the source between lookup and lock cannot push it negative.
#[derive(Clone)]
pub struct TransferEngine {
    store: AccountStoreHandle,
}

impl TransferEngine {
    pub fn new(store: AccountStoreHandle) -> Self {
        Self { store }
    }

    /// Moves `request.amount` from source to destination.
    ///
    /// Checks run in a fixed order: self-transfer, amount, source lookup,
    /// destination lookup, then sufficiency under lock. Nothing is written
    /// unless every check passes. Failed transfers are never retried here.
    #[tracing::instrument(
        level = "debug",
        skip(self, request),
        fields(source = %request.source, destination = %request.destination, amount = %request.amount)
    )]
    pub async fn transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, TransferError> {
        if request.source == request.destination {
            tracing::debug!("rejected: self transfer");
            return Err(TransferError::SelfTransfer(request.source.clone()));
        }
        let amount = Amount::new(request.amount)
            .map_err(|_| TransferError::InvalidAmount(request.amount))?;

        self.ensure_exists(&request.source, Side::Source).await?;
        self.ensure_exists(&request.destination, Side::Destination)
            .await?;

        let (source, destination) = self
            .store
            .modify_pair(
                &request.source,
                &request.destination,
                Box::new(move |source, destination| {
                    source.withdraw(amount)?;
                    destination.deposit(amount)
                }),
            )
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected under lock");
                TransferError::from_account_error(err, &request.source)
            })?;

        tracing::debug!(
            source_balance = %source.balance,
            destination_balance = %destination.balance,
            "applied"
        );
        Ok(TransferReceipt {
            source,
            destination,
            amount,
        })
    }

    async fn ensure_exists(&self, id: &AccountId, side: Side) -> Result<(), TransferError> {
        match self.store.get(id).await {
            Ok(_) => Ok(()),
            Err(AccountError::AccountNotFound(id)) => {
                tracing::debug!(%side, account = %id, "rejected: account not found");
                Err(TransferError::AccountNotFound { side, id })
            }
            Err(err) => Err(TransferError::from_account_error(err, id)),
        }
    }
}
