//! Instruction handlers, one module per account-validation concern.
//!
//! Every handler runs its checks in a fixed order before touching state:
//! account count, signer, PDA and bump, owner, discriminator, stored
//! authority, arithmetic. Only then does it mutate.

pub mod bump_seed;
pub mod closing_accounts;
pub mod integer_overflow;
pub mod owner_checks;
pub mod pda_sharing;
pub mod reinitialization;
pub mod signer_checks;
pub mod type_cosplay;

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

use crate::{
    error::GuardError,
    validation::{checked_add, checked_sub, guarded_init},
};

/// Refuses a CPI target that is not the expected program.
pub(crate) fn check_program(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        msg!("Expected program {}, got {}", expected, account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Allocates `space` bytes at the PDA `target`, owned by `program_id` and
/// funded by `payer` with the rent-exempt minimum plus `extra_lamports`.
///
/// Any address that already holds a record, lamports or data fails with
/// `AlreadyInitialized` before the system program is invoked.
#[allow(clippy::too_many_arguments)]
pub(crate) fn create_pda_account<'a>(
    program_id: &Pubkey,
    payer: &AccountInfo<'a>,
    target: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    seeds: &[&[u8]],
    bump: u8,
    space: usize,
    extra_lamports: u64,
) -> ProgramResult {
    check_program(system_program, &system_program::id())?;
    if target.owner == program_id && !target.data_is_empty() {
        guarded_init(&target.try_borrow_data()?)?;
    }
    let in_use = target.lamports() > 0 || !target.data_is_empty();
    if in_use || !system_program::check_id(target.owner) {
        msg!("Account {} is already in use", target.key);
        return Err(GuardError::AlreadyInitialized.into());
    }

    let lamports = checked_add(Rent::get()?.minimum_balance(space), extra_lamports)?;
    let ix = system_instruction::create_account(
        payer.key,
        target.key,
        lamports,
        space as u64,
        program_id,
    );

    let bump_seed = [bump];
    let mut signer_seeds: Vec<&[u8]> = seeds.to_vec();
    signer_seeds.push(&bump_seed);
    invoke_signed(
        &ix,
        &[payer.clone(), target.clone(), system_program.clone()],
        &[signer_seeds.as_slice()],
    )
}

/// Pays `amount` lamports out of a program-owned account without taking it
/// below its rent-exempt minimum.
pub(crate) fn withdraw_lamports(
    from: &AccountInfo,
    to: &AccountInfo,
    amount: u64,
) -> ProgramResult {
    let floor = Rent::get()?.minimum_balance(from.data_len());
    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(GuardError::InsufficientFunds)?;
    if remaining < floor {
        return Err(GuardError::InsufficientFunds.into());
    }
    if !to.is_writable {
        return Err(GuardError::AccountNotWritable.into());
    }

    let credited = checked_add(to.lamports(), amount)?;
    **from.try_borrow_mut_lamports()? = checked_sub(from.lamports(), amount)?;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}
