use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use transfer_ledger::application::ledger::Ledger;
use transfer_ledger::domain::ports::AccountStoreHandle;
use transfer_ledger::infrastructure::in_memory::InMemoryAccountStore;
use transfer_ledger::interfaces::csv::account_writer::AccountWriter;
use transfer_ledger::interfaces::csv::command_reader::CommandReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input ledger commands CSV file
    input: PathBuf,

    /// Log filter directive (e.g. `debug`, `transfer_ledger=trace`).
    /// Falls back to RUST_LOG, then `warn`.
    #[arg(long)]
    log_filter: Option<String>,
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).into_diagnostic()?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // stdout carries the report, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;

    let store: AccountStoreHandle = Arc::new(InMemoryAccountStore::new());
    let ledger = Ledger::new(store);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for (line, command) in reader.commands().enumerate() {
        match command {
            Ok(command) => {
                if let Err(e) = ledger.execute(command).await {
                    tracing::warn!(record = line + 1, error = %e, "Error processing command");
                }
            }
            Err(e) => {
                tracing::warn!(record = line + 1, error = %e, "Error reading command");
            }
        }
    }

    let accounts = ledger.accounts().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
