use crate::domain::command::LedgerCommand;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Streams ledger commands from a CSV source.
///
/// Expected header: `type, account, counterparty, amount`. Whitespace is
/// trimmed and short rows are accepted, so `open, A` is a valid line.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one command per row; a bad row yields an `Err`
    /// without ending the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<LedgerCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
