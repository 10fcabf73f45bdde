use super::account::{Account, AccountId, Amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request to move `amount` from `source` to `destination`.
///
/// The amount is kept as a raw decimal; the engine decides whether it is
/// acceptable so that programmatic callers get the same checks as adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "accountFrom")]
    pub source: AccountId,
    #[serde(rename = "accountTo")]
    pub destination: AccountId,
    #[serde(rename = "transferAmount")]
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(source: AccountId, destination: AccountId, amount: Decimal) -> Self {
        Self {
            source,
            destination,
            amount,
        }
    }
}

/// Snapshots of both endpoints as left by a successful transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub source: Account,
    pub destination: Account,
    pub amount: Amount,
}
