use solana_program::{account_info::AccountInfo, msg, pubkey::Pubkey};

use crate::error::GuardError;

/// Passes iff `claimed` is one of the keys that signed the enclosing
/// transaction (or was signed for by a PDA invocation).
pub fn verify_signer(claimed: &Pubkey, signers: &[Pubkey]) -> Result<(), GuardError> {
    if signers.contains(claimed) {
        Ok(())
    } else {
        msg!("Missing required signature for {}", claimed);
        Err(GuardError::MissingSignature)
    }
}

/// Keys of every account the instruction marks as signed.
pub fn signer_keys(accounts: &[AccountInfo]) -> Vec<Pubkey> {
    accounts
        .iter()
        .filter(|info| info.is_signer)
        .map(|info| *info.key)
        .collect()
}

/// Declares `account` signer-required within `accounts` and returns its key.
pub fn require_signer(
    account: &AccountInfo,
    accounts: &[AccountInfo],
) -> Result<Pubkey, GuardError> {
    verify_signer(account.key, &signer_keys(accounts))?;
    Ok(*account.key)
}
