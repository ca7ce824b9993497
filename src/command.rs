use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Withdraw,
    Deposit,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    CreateAccount {
        account_id: AccountId,
        balance: Decimal,
    },
    Withdraw {
        from_account_id: AccountId,
        amount: Decimal,
    },
    Deposit {
        to_account_id: AccountId,
        amount: Decimal,
    },
    Transfer {
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerCommandError {
    #[error("Account id is required for {kind:?}")]
    AccountIdRequired { kind: OperationKind },
    #[error("Counterparty account id is required for {kind:?}")]
    CounterpartyRequired { kind: OperationKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must not be negative for {kind:?}")]
    NegativeAmount { kind: OperationKind },
}

impl LedgerCommand {
    /// Checks the shape of a raw operation. Whether the referenced accounts
    /// exist is left to the ledger.
    pub fn parse_command(
        kind: OperationKind,
        account: &str,
        counterparty: Option<&str>,
        amount: Option<Decimal>,
    ) -> Result<Self, LedgerCommandError> {
        if account.is_empty() {
            return Err(LedgerCommandError::AccountIdRequired { kind });
        }
        let account = account.to_owned();
        match kind {
            OperationKind::Create => Ok(Self::CreateAccount {
                account_id: account,
                balance: Self::parse_amount(kind, amount.or(Some(Decimal::ZERO)))?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                from_account_id: account,
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Deposit => Ok(Self::Deposit {
                to_account_id: account,
                amount: Self::parse_amount(kind, amount)?,
            }),
            OperationKind::Transfer => {
                let Some(counterparty) = counterparty.filter(|c| !c.is_empty()) else {
                    return Err(LedgerCommandError::CounterpartyRequired { kind });
                };
                Ok(Self::Transfer {
                    from_account_id: account,
                    to_account_id: counterparty.to_owned(),
                    amount: Self::parse_amount(kind, amount)?,
                })
            }
        }
    }

    fn parse_amount(
        kind: OperationKind,
        amount: Option<Decimal>,
    ) -> Result<Decimal, LedgerCommandError> {
        let Some(amount) = amount else {
            return Err(LedgerCommandError::AmountRequired { kind });
        };
        if amount < Decimal::ZERO {
            return Err(LedgerCommandError::NegativeAmount { kind });
        }
        Ok(amount)
    }
}
