use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use super::create_pda_account;
use crate::{
    constants::{ADMIN_SEED, USER_SEED},
    error::GuardError,
    state::{AdminAccount, Record, UserAccount},
    validation::{checked_sub, guarded_init, require_signer, validate_authority, verify_owner},
};

/// Allocates the PDA for a balance record and writes it.
fn initialize_record<R: Record>(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    seed: &[u8],
    build: impl FnOnce(Pubkey) -> R,
) -> ProgramResult {
    let [record_info, authority_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    let seeds: &[&[u8]] = &[seed, authority.as_ref()];
    let bump = validate_authority(record_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        authority_info,
        record_info,
        system_program,
        seeds,
        bump,
        R::LEN,
        0,
    )?;
    guarded_init(&record_info.try_borrow_data()?)?;
    build(authority).pack(&mut record_info.try_borrow_mut_data()?)?;
    Ok(())
}

pub fn initialize_user(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    balance: u64,
) -> ProgramResult {
    initialize_record(program_id, accounts, USER_SEED, |authority| UserAccount {
        authority,
        balance,
    })?;
    msg!("User account initialized with balance {}", balance);
    Ok(())
}

pub fn initialize_admin(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    balance: u64,
) -> ProgramResult {
    initialize_record(program_id, accounts, ADMIN_SEED, |authority| AdminAccount {
        authority,
        balance,
    })?;
    msg!("Admin account initialized with balance {}", balance);
    Ok(())
}

/// Debits a user record. The `UserAccount` tag is checked before the
/// authority or balance is read, so an `AdminAccount` with the identical
/// layout is refused.
pub fn withdraw_user(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [user_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    verify_owner(user_info, program_id)?;
    let mut user = UserAccount::unpack(&user_info.try_borrow_data()?)?;
    if user.authority != authority {
        msg!("User account belongs to {}, not {}", user.authority, authority);
        return Err(GuardError::Unauthorized.into());
    }
    if amount > user.balance {
        return Err(GuardError::InsufficientFunds.into());
    }

    user.balance = checked_sub(user.balance, amount)?;
    user.pack(&mut user_info.try_borrow_mut_data()?)?;
    msg!("User withdrew {}, balance {}", amount, user.balance);
    Ok(())
}
