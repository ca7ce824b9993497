use thiserror::Error;
use tracing::info;

use crate::account::Account;

#[derive(Debug, Error)]
#[error("Failed to notify owner of {account_id}: {reason}")]
pub struct NotificationError {
    pub account_id: String,
    pub reason: String,
}

/// Tells an account owner about transfer activity touching their account.
///
/// Called synchronously from the transfer path. Failures are reported back so
/// they can be logged, but they never affect the balance update.
pub trait TransferNotifier: Send + Sync {
    fn notify_about_transfer(
        &self,
        account: &Account,
        transfer_description: &str,
    ) -> Result<(), NotificationError>;
}

/// Default notifier, writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl TransferNotifier for LoggingNotifier {
    fn notify_about_transfer(
        &self,
        account: &Account,
        transfer_description: &str,
    ) -> Result<(), NotificationError> {
        info!(
            account_id = account.account_id(),
            "Sending notification to owner of {}: {transfer_description}",
            account.account_id()
        );
        Ok(())
    }
}
