use solana_program::msg;

use crate::{error::GuardError, state::DISCRIMINATOR_LEN};

/// Passes only for a record that has never been initialized: the
/// discriminator slot must still be all zeroes.
///
/// A tombstoned (closed) record counts as initialized, so a closed address
/// can never be brought back through an init path.
pub fn guarded_init(data: &[u8]) -> Result<(), GuardError> {
    let tag = data
        .get(..DISCRIMINATOR_LEN)
        .ok_or(GuardError::AccountDataTooSmall)?;
    if tag.iter().any(|b| *b != 0) {
        msg!("Account already initialized");
        return Err(GuardError::AlreadyInitialized);
    }
    Ok(())
}
