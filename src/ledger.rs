use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::{
    account::{Account, AccountId},
    notification::TransferNotifier,
    store::{AccountStore, StoreError, TransferBalances},
};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    /// The debit leg of a sequential transfer was committed, the credit leg was not.
    #[error(
        "Transfer of {amount} from {from_account_id} to {to_account_id} was debited but not credited: {source}"
    )]
    PartialTransfer {
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
        from_balance: Decimal,
        source: StoreError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    /// Withdraw, then deposit, each serialized on its own account.
    #[default]
    Sequential,
    /// Both accounts locked together, all or nothing.
    Atomic,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerConfig {
    pub transfer_mode: TransferMode,
}

/// Ledger operations on top of an [`AccountStore`], with the transfer
/// notification hook.
pub struct Ledger<S> {
    store: Arc<S>,
    notifier: Arc<dyn TransferNotifier>,
    config: LedgerConfig,
}

impl<S> Ledger<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, notifier: Arc<dyn TransferNotifier>, config: LedgerConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    pub fn create_account(&self, account: Account) -> Result<(), StoreError> {
        self.store.create_account(account)
    }

    pub fn get_account(&self, account_id: &str) -> Option<Account> {
        self.store.get_account(account_id)
    }

    pub fn clear_accounts(&self) {
        self.store.clear_accounts()
    }

    pub fn withdraw(&self, from_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError> {
        self.store.withdraw(from_account_id, amount)
    }

    pub fn deposit(&self, to_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError> {
        self.store.deposit(to_account_id, amount)
    }

    /// Debit leg of a transfer. The recipient is notified before the balance is
    /// checked, whatever the outcome.
    pub fn withdraw_to(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<Decimal, StoreError> {
        self.notify(
            to_account_id,
            format!("Amount being transferred to account {to_account_id} is {amount}"),
        );
        self.store.withdraw(from_account_id, amount)
    }

    /// Credit leg of a transfer. The sender is notified before the deposit.
    pub fn deposit_from(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<Decimal, StoreError> {
        self.notify(
            from_account_id,
            format!("Amount being transferred from account {from_account_id} is {amount}"),
        );
        self.store.deposit(to_account_id, amount)
    }

    pub fn transfer(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<TransferBalances, LedgerError> {
        match self.config.transfer_mode {
            TransferMode::Sequential => {
                let from_balance = self.withdraw_to(from_account_id, to_account_id, amount)?;
                let to_balance = self
                    .deposit_from(from_account_id, to_account_id, amount)
                    .map_err(|source| {
                        warn!(
                            from_account_id,
                            to_account_id,
                            amount = %amount,
                            %source,
                            "debit committed without matching credit"
                        );
                        LedgerError::PartialTransfer {
                            from_account_id: from_account_id.to_owned(),
                            to_account_id: to_account_id.to_owned(),
                            amount,
                            from_balance,
                            source,
                        }
                    })?;
                Ok(TransferBalances {
                    from_balance,
                    to_balance,
                })
            }
            TransferMode::Atomic => {
                self.notify(
                    to_account_id,
                    format!("Amount being transferred to account {to_account_id} is {amount}"),
                );
                self.notify(
                    from_account_id,
                    format!("Amount being transferred from account {from_account_id} is {amount}"),
                );
                Ok(self
                    .store
                    .transfer_atomic(from_account_id, to_account_id, amount)?)
            }
        }
    }

    fn notify(&self, account_id: &str, description: String) {
        let Some(account) = self.store.get_account(account_id) else {
            return;
        };
        if let Err(err) = self.notifier.notify_about_transfer(&account, &description) {
            warn!(account_id, %err, "transfer notification failed");
        }
    }
}
