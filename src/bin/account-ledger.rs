use std::fs::File;

use account_ledger::{
    bin_utils::{OperationError, Service},
    ledger::{LedgerConfig, TransferMode},
};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the balances, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut filename = None;
    let mut config = LedgerConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--atomic-transfers" => config.transfer_mode = TransferMode::Atomic,
            _ if filename.is_none() => filename = Some(arg),
            _ => anyhow::bail!("Unexpected argument `{arg}`"),
        }
    }
    let filename = filename.context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config,
        error_printer: Box::new(|line, err| match err {
            OperationError::ParseErr(_) | OperationError::CommandErr(_) => {
                eprintln!("Error at line {line}: {err}")
            }
            // business rule rejections are expected, they only go to the log
            OperationError::StoreErr(_) | OperationError::TransferErr(_) => {
                tracing::warn!(line, %err, "operation rejected")
            }
        }),
    };
    service.run()
}
