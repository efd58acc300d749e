use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg};

use crate::{
    error::GuardError,
    state::{CLOSED_ACCOUNT_DISCRIMINATOR, DISCRIMINATOR_LEN},
    validation::{arithmetic::checked_add, discriminator::is_closed},
};

/// Lifecycle of a closable account as read from its data. The transition
/// happens entirely inside [`close_account`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    Open,
    Closed,
}

pub fn close_state(data: &[u8]) -> CloseState {
    if is_closed(data) {
        CloseState::Closed
    } else {
        CloseState::Open
    }
}

pub fn ensure_not_closed(data: &[u8]) -> Result<(), GuardError> {
    match close_state(data) {
        CloseState::Open => Ok(()),
        CloseState::Closed => {
            msg!("Account already closed");
            Err(GuardError::UnauthorizedClose)
        }
    }
}

/// Rejects a close aimed at an account that has nothing left to close.
///
/// Runs before the owner check: once a closed account is drained the runtime
/// purges it and hands it back to the system program, so a replayed close
/// sees an empty, unowned account rather than a tombstone.
pub fn ensure_closable(account: &AccountInfo) -> Result<(), GuardError> {
    if account.lamports() == 0 || account.data_is_empty() {
        msg!("Account {} is drained", account.key);
        return Err(GuardError::UnauthorizedClose);
    }
    let data = account.try_borrow_data().map_err(|_| GuardError::AccountDataTooSmall)?;
    ensure_not_closed(&data)
}

/// Retires `account`: zeroes its data, stamps the closed tombstone and moves
/// every lamport to `destination`.
///
/// The tombstone keeps the account dead even if it is re-funded in the same
/// transaction: no handler decodes a closed record and a second close is
/// rejected.
pub fn close_account(account: &AccountInfo, destination: &AccountInfo) -> ProgramResult {
    ensure_closable(account)?;
    if account.data_len() < DISCRIMINATOR_LEN {
        return Err(GuardError::AccountDataTooSmall.into());
    }
    if !destination.is_writable {
        return Err(GuardError::AccountNotWritable.into());
    }

    {
        let mut data = account.try_borrow_mut_data()?;
        data.fill(0);
        data[..DISCRIMINATOR_LEN].copy_from_slice(&CLOSED_ACCOUNT_DISCRIMINATOR);
    }
    let lamports = account.lamports();
    let credited = checked_add(destination.lamports(), lamports)?;
    **destination.try_borrow_mut_lamports()? = credited;
    **account.try_borrow_mut_lamports()? = 0;

    msg!("Account {} closed, {} lamports released", account.key, lamports);
    Ok(())
}
