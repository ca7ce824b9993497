use std::io::Write;

use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;

#[derive(Debug, Serialize)]
struct AccountBalance<'a> {
    account: &'a str,
    balance: Decimal,
}

/// Writes one `account,balance` row per account, in the order given.
pub fn print_balances<'a, W>(
    output: &mut W,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        writer
            .serialize(AccountBalance {
                account: acc.account_id(),
                balance: acc.balance(),
            })
            .with_context(|| format!("Failed to write balance of `{}`", acc.account_id()))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
