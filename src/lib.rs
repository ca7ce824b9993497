/// Account identity and balance. Balance changes are validated into events,
/// which are then applied.
pub mod account;

/// Shape validation of raw operations into ledger commands, executed by [`ledger`].
pub mod command;

/// Account store interface, plus "in memory" implementation with a lock per account.
pub mod store;

/// Withdraw, deposit and transfer on top of a [`store::AccountStore`].
///
/// NOTE: sequential transfers are two separately serialized steps. A failed
/// credit leaves the debit in place and is reported as
/// [`ledger::LedgerError::PartialTransfer`]; use [`ledger::TransferMode::Atomic`]
/// when both legs must commit together.
pub mod ledger;

/// Counterparty notification hook called on the transfer path.
pub mod notification;

/// CSV batch driver around the core. Ideally it lives in its own crate, it is
/// kept here so integration tests can use it.
pub mod bin_utils;
