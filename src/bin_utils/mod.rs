//! This module could be a separate crate on its own, to bootstrap [`account_ledger`] within binary
//! as a CSV batch driver. It stays in the library so the integration tests can drive it.

use std::{
    io::{Read, Write},
    sync::Arc,
};

use crate::{
    account::{Account, AccountError},
    command::{LedgerCommand, LedgerCommandError},
    ledger::{Ledger, LedgerConfig, LedgerError},
    notification::LoggingNotifier,
    store::{AccountStore, StoreError, in_memory_store::InMemoryAccountStore},
};
use anyhow::Result;
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::print_balances;
use thiserror::Error;
use tracing::debug;

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] LedgerCommandError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error(transparent)]
    TransferErr(#[from] LedgerError),
}

impl From<AccountError> for OperationError {
    fn from(err: AccountError) -> Self {
        OperationError::StoreErr(err.into())
    }
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: LedgerConfig,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let ledger = Ledger::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(LoggingNotifier),
            self.config,
        );

        for (line, row) in parser {
            let outcome = row
                .map_err(OperationError::from)
                .and_then(|operation| apply_operation(&ledger, operation));
            if let Err(err) = outcome {
                (self.error_printer)(line, err);
            }
        }

        print_balances(self.output, &ledger.store().accounts())
    }
}

fn apply_operation<S>(ledger: &Ledger<S>, operation: Operation) -> Result<(), OperationError>
where
    S: AccountStore,
{
    let command = LedgerCommand::parse_command(
        operation.kind,
        &operation.account,
        operation.counterparty.as_deref(),
        operation.amount,
    )?;
    debug!(?command, "applying command");
    match command {
        LedgerCommand::CreateAccount {
            account_id,
            balance,
        } => ledger.create_account(Account::with_balance(account_id, balance)?)?,
        LedgerCommand::Withdraw {
            from_account_id,
            amount,
        } => {
            ledger.withdraw(&from_account_id, amount)?;
        }
        LedgerCommand::Deposit {
            to_account_id,
            amount,
        } => {
            ledger.deposit(&to_account_id, amount)?;
        }
        LedgerCommand::Transfer {
            from_account_id,
            to_account_id,
            amount,
        } => {
            ledger.transfer(&from_account_id, &to_account_id, amount)?;
        }
    };
    Ok(())
}
