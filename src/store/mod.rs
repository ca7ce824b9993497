use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{Account, AccountError, AccountId};

pub mod in_memory_store;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account id {account_id} already exists!")]
    DuplicateAccountId { account_id: AccountId },
    #[error("Please enter a valid account id!")]
    InvalidAccountId { account_id: AccountId },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

impl StoreError {
    /// True when the failure is the business rule rejecting a negative balance,
    /// as opposed to a lookup or identity failure.
    pub fn is_low_balance(&self) -> bool {
        matches!(
            self,
            StoreError::AccountErr(AccountError::LowAccountBalance { .. })
        )
    }
}

/// Balances of both accounts after a transfer has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBalances {
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

/// Concurrent registry of accounts. Implementations own every [`Account`] and
/// are the only place balances are mutated; readers get snapshots.
///
/// All methods take `&self`, so a store can be shared between threads behind an `Arc`.
pub trait AccountStore: Send + Sync {
    /// Inserts the account unless its id is already taken, in which case the
    /// existing entry is left as is.
    fn create_account(&self, account: Account) -> Result<(), StoreError>;

    fn get_account(&self, account_id: &str) -> Option<Account>;

    /// Every account, ordered by id.
    fn accounts(&self) -> Vec<Account>;

    fn clear_accounts(&self);

    fn withdraw(&self, from_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError>;

    fn deposit(&self, to_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError>;

    /// Debits and credits both accounts as one unit: either both balances
    /// change or neither does.
    fn transfer_atomic(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<TransferBalances, StoreError>;
}
