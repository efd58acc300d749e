use solana_program::msg;

use crate::{
    error::GuardError,
    state::{CLOSED_ACCOUNT_DISCRIMINATOR, DISCRIMINATOR_LEN},
};

/// Checks the leading type tag of `data` against `expected`.
///
/// Runs before any field is read. A closed tombstone never matches a live
/// record type.
pub fn verify_discriminator(
    data: &[u8],
    expected: &[u8; DISCRIMINATOR_LEN],
) -> Result<(), GuardError> {
    let Some(tag) = data.get(..DISCRIMINATOR_LEN) else {
        msg!("Account data shorter than a discriminator");
        return Err(GuardError::DiscriminatorMismatch);
    };
    if tag == CLOSED_ACCOUNT_DISCRIMINATOR {
        msg!("Account is closed");
        return Err(GuardError::DiscriminatorMismatch);
    }
    if tag != expected {
        msg!("Expected discriminator {:?}, got {:?}", expected, tag);
        return Err(GuardError::DiscriminatorMismatch);
    }
    Ok(())
}

pub fn is_closed(data: &[u8]) -> bool {
    data.get(..DISCRIMINATOR_LEN) == Some(&CLOSED_ACCOUNT_DISCRIMINATOR[..])
}
