use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::account::{Account, AccountError, AccountEvent, AccountId};

use super::{AccountStore, StoreError, TransferBalances};

type AccountSlot = Arc<Mutex<Account>>;

/// Lock-per-account store. The map lock is held only to look up or insert a
/// slot, never while a balance is being changed, so mutations of different
/// accounts run in parallel.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, AccountSlot>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, account_id: &str) -> Result<AccountSlot, StoreError> {
        self.accounts
            .read()
            .get(account_id)
            .cloned()
            .ok_or_else(|| StoreError::InvalidAccountId {
                account_id: account_id.to_owned(),
            })
    }

    fn mutate(
        &self,
        account_id: &str,
        amount: Decimal,
        handle: impl FnOnce(&Account, Decimal) -> Result<AccountEvent, AccountError>,
    ) -> Result<Decimal, StoreError> {
        let slot = self.slot(account_id)?;
        let mut account = slot.lock();
        // check and commit happen under the same guard
        let evt = handle(&account, amount)?;
        account.apply(&evt);
        info!(
            account_id,
            kind = ?evt.kind(),
            amount = %evt.amount(),
            balance = %evt.balance(),
            "balance updated"
        );
        Ok(evt.balance())
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create_account(&self, account: Account) -> Result<(), StoreError> {
        match self.accounts.write().entry(account.account_id().to_owned()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateAccountId {
                account_id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!(
                    account_id = entry.key().as_str(),
                    balance = %account.balance(),
                    "account created"
                );
                entry.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    fn get_account(&self, account_id: &str) -> Option<Account> {
        let account = self.slot(account_id).ok().map(|slot| slot.lock().clone());
        debug!(account_id, found = account.is_some(), "account lookup");
        account
    }

    fn accounts(&self) -> Vec<Account> {
        let slots: Vec<AccountSlot> = self.accounts.read().values().cloned().collect();
        let mut accounts: Vec<Account> = slots.iter().map(|slot| slot.lock().clone()).collect();
        accounts.sort_by(|a, b| a.account_id().cmp(b.account_id()));
        accounts
    }

    fn clear_accounts(&self) {
        self.accounts.write().clear();
        info!("all accounts cleared");
    }

    fn withdraw(&self, from_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError> {
        self.mutate(from_account_id, amount, Account::handle_withdraw)
    }

    fn deposit(&self, to_account_id: &str, amount: Decimal) -> Result<Decimal, StoreError> {
        self.mutate(to_account_id, amount, Account::handle_deposit)
    }

    fn transfer_atomic(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<TransferBalances, StoreError> {
        let from_slot = self.slot(from_account_id)?;
        let to_slot = self.slot(to_account_id)?;

        if Arc::ptr_eq(&from_slot, &to_slot) {
            let account = from_slot.lock();
            let evt = account.handle_withdraw(amount)?;
            debug!(
                account_id = from_account_id,
                amount = %evt.amount(),
                "transfer to self leaves balance unchanged"
            );
            return Ok(TransferBalances {
                from_balance: account.balance(),
                to_balance: account.balance(),
            });
        }

        // fixed lock order by id, so opposite transfers cannot deadlock
        let (mut from, mut to) = if from_account_id < to_account_id {
            let from = from_slot.lock();
            (from, to_slot.lock())
        } else {
            let to = to_slot.lock();
            (from_slot.lock(), to)
        };

        let withdrawn = from.handle_withdraw(amount)?;
        let deposited = to.handle_deposit(amount)?;
        from.apply(&withdrawn);
        to.apply(&deposited);
        info!(
            from_account_id,
            to_account_id,
            amount = %amount,
            from_balance = %withdrawn.balance(),
            to_balance = %deposited.balance(),
            "transfer committed"
        );
        Ok(TransferBalances {
            from_balance: withdrawn.balance(),
            to_balance: deposited.balance(),
        })
    }
}
