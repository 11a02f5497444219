//! # Economy Ledger
//!
//! Pure balance arithmetic. Balances are unsigned, so a debit that would go
//! negative is rejected instead of wrapping. Callers commit the result.

use super::entities::Balances;
use super::errors::ProgressError;
use shared_types::Currency;

/// Adds `amount` to a balance.
pub fn credit(balances: &mut Balances, currency: Currency, amount: u64) -> Result<(), ProgressError> {
    let balance = balances.entry(currency).or_insert(0);
    *balance = balance
        .checked_add(amount)
        .ok_or(ProgressError::BalanceOverflow { currency })?;
    Ok(())
}

/// Removes `amount` from a balance, failing with `InsufficientFunds` when
/// the balance is smaller. Leaves `balances` untouched on failure.
pub fn debit(balances: &mut Balances, currency: Currency, amount: u64) -> Result<(), ProgressError> {
    let available = balances.get(&currency).copied().unwrap_or(0);
    if available < amount {
        return Err(ProgressError::InsufficientFunds {
            currency,
            required: amount,
            available,
        });
    }
    balances.insert(currency, available - amount);
    Ok(())
}
