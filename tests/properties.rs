//! Balance arithmetic properties over arbitrary amounts with two decimal places.

use account_ledger::{
    account::Account,
    store::{AccountStore, StoreError, in_memory_store::InMemoryAccountStore},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn store_with(account_id: &str, balance: Decimal) -> InMemoryAccountStore {
    let store = InMemoryAccountStore::new();
    store
        .create_account(Account::with_balance(account_id, balance).unwrap())
        .unwrap();
    store
}

proptest! {
    /// Withdrawing no more than the balance leaves exactly the difference.
    #[test]
    fn prop_withdraw_within_balance_is_exact(
        balance in 0i64..10_000_000_000,
        fraction in 0.0f64..=1.0,
    ) {
        let amount = (balance as f64 * fraction) as i64;
        let store = store_with("A1", cents(balance));

        let new_balance = store.withdraw("A1", cents(amount)).unwrap();

        prop_assert_eq!(new_balance, cents(balance - amount));
        prop_assert!(new_balance >= Decimal::ZERO);
        prop_assert_eq!(store.get_account("A1").unwrap().balance(), new_balance);
    }

    /// Withdrawing more than the balance is rejected and changes nothing.
    #[test]
    fn prop_withdraw_above_balance_is_rejected(
        balance in 0i64..10_000_000_000,
        excess in 1i64..10_000_000_000,
    ) {
        let store = store_with("B1", cents(balance));

        let err = store.withdraw("B1", cents(balance + excess)).unwrap_err();

        prop_assert!(err.is_low_balance());
        prop_assert_eq!(store.get_account("B1").unwrap().balance(), cents(balance));
    }

    /// A deposit followed by a withdrawal of the same amount restores the balance.
    #[test]
    fn prop_deposit_then_withdraw_restores_balance(
        balance in 0i64..10_000_000_000,
        amount in 0i64..10_000_000_000,
    ) {
        let store = store_with("A1", cents(balance));

        store.deposit("A1", cents(amount)).unwrap();
        let restored = store.withdraw("A1", cents(amount)).unwrap();

        prop_assert_eq!(restored, cents(balance));
    }

    /// The first create wins, later ones for the same id are rejected.
    #[test]
    fn prop_first_create_wins(
        account_id in "[A-Za-z0-9-]{1,16}",
        first in 0i64..1_000_000,
        second in 0i64..1_000_000,
    ) {
        let store = store_with(&account_id, cents(first));

        let err = store
            .create_account(Account::with_balance(account_id.clone(), cents(second)).unwrap())
            .unwrap_err();

        prop_assert_eq!(err, StoreError::DuplicateAccountId { account_id: account_id.clone() });
        prop_assert_eq!(store.get_account(&account_id).unwrap().balance(), cents(first));
        prop_assert_eq!(store.accounts().len(), 1);
    }

    /// Unknown ids never touch existing accounts.
    #[test]
    fn prop_unknown_id_changes_nothing(
        account_id in "[a-z]{1,8}",
        amount in 0i64..1_000_000,
    ) {
        let store = store_with("KNOWN-1", cents(100));

        let withdraw = store.withdraw(&account_id, cents(amount)).unwrap_err();
        let deposit = store.deposit(&account_id, cents(amount)).unwrap_err();

        let is_invalid_id = |err: &StoreError| matches!(err, StoreError::InvalidAccountId { .. });
        prop_assert!(is_invalid_id(&withdraw));
        prop_assert!(is_invalid_id(&deposit));
        prop_assert_eq!(store.get_account("KNOWN-1").unwrap().balance(), cents(100));
    }
}
