use super::account::AccountId;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

/// One instruction for the ledger, as read from a batch file.
///
/// `counterparty` is only meaningful for transfers. `amount` is the opening
/// balance for `open` and the moved amount otherwise.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct LedgerCommand {
    pub r#type: CommandType,
    pub account: AccountId,
    pub counterparty: Option<AccountId>,
    pub amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(data: &str) -> LedgerCommand {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_bytes());
        reader
            .deserialize()
            .next()
            .unwrap()
            .expect("Failed to deserialize command")
    }

    #[test]
    fn test_transfer_deserialization() {
        let cmd = parse("type, account, counterparty, amount\ntransfer, A, B, 10.5");
        assert_eq!(cmd.r#type, CommandType::Transfer);
        assert_eq!(cmd.account.as_str(), "A");
        assert_eq!(cmd.counterparty.unwrap().as_str(), "B");
        assert_eq!(cmd.amount, Some(dec!(10.5)));
    }

    #[test]
    fn test_open_without_counterparty_or_amount() {
        let cmd = parse("type, account, counterparty, amount\nopen, A, , ");
        assert_eq!(cmd.r#type, CommandType::Open);
        assert_eq!(cmd.counterparty, None);
        assert_eq!(cmd.amount, None);
    }
}
