use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Withdrawn,
    Deposited,
}

/// Validated balance change, produced by [`Account::handle_withdraw`] or
/// [`Account::handle_deposit`] and committed with [`Account::apply`].
#[derive(Debug, Clone)]
pub struct AccountEvent {
    amount: Decimal,
    balance: Decimal,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Balance the account holds once this event is applied.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountEventKind {
        self.kind
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account id must not be empty")]
    EmptyAccountId,
    #[error("Account balance must not be negative, got {balance}")]
    NegativeBalance { balance: Decimal },
    #[error("Unable to withdraw funds due to Low Account Balance for Account Id {account_id}")]
    LowAccountBalance { account_id: AccountId },
    #[error("Balance overflow for Account Id {account_id}")]
    BalanceOverflow { account_id: AccountId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account_id: AccountId,
    balance: Decimal,
}

impl Account {
    /// Opens an account with a zero balance.
    pub fn new(account_id: impl Into<AccountId>) -> Result<Self, AccountError> {
        Self::with_balance(account_id, Decimal::ZERO)
    }

    pub fn with_balance(
        account_id: impl Into<AccountId>,
        balance: Decimal,
    ) -> Result<Self, AccountError> {
        let account_id = account_id.into();
        if account_id.is_empty() {
            return Err(AccountError::EmptyAccountId);
        }
        if balance < Decimal::ZERO {
            return Err(AccountError::NegativeBalance { balance });
        }
        Ok(Self {
            account_id,
            balance,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        // events are validated against the current balance, nothing is re-checked here
        self.balance = event.balance;
    }

    pub fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| self.overflow())?;
        self.checked_event(amount, balance, AccountEventKind::Withdrawn)
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| self.overflow())?;
        self.checked_event(amount, balance, AccountEventKind::Deposited)
    }

    fn checked_event(
        &self,
        amount: Decimal,
        balance: Decimal,
        kind: AccountEventKind,
    ) -> Result<AccountEvent, AccountError> {
        if balance < Decimal::ZERO {
            return Err(AccountError::LowAccountBalance {
                account_id: self.account_id.clone(),
            });
        }
        Ok(AccountEvent {
            amount,
            balance,
            kind,
        })
    }

    fn overflow(&self) -> AccountError {
        AccountError::BalanceOverflow {
            account_id: self.account_id.clone(),
        }
    }
}
