use solana_program::{account_info::AccountInfo, msg, pubkey::Pubkey};

use crate::error::GuardError;

/// Rejects `account` unless its storage is owned by `expected`.
///
/// Must run before any byte of the account's data is decoded: a look-alike
/// account owned by another program can carry any layout-compatible bytes.
pub fn verify_owner(account: &AccountInfo, expected: &Pubkey) -> Result<(), GuardError> {
    if account.owner != expected {
        msg!("Account owner {} does not match expected {}", account.owner, expected);
        return Err(GuardError::OwnerMismatch);
    }
    Ok(())
}
