use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program::invoke,
    program_error::ProgramError, pubkey::Pubkey, system_instruction, system_program,
};

use super::{check_program, create_pda_account};
use crate::{
    constants::ESCROW_SEED,
    error::GuardError,
    state::{Record, Vault},
    validation::{
        checked_add, close_account, ensure_closable, guarded_init, require_signer,
        validate_authority, verify_owner,
    },
};

pub fn open_vault(program_id: &Pubkey, accounts: &[AccountInfo], lamports: u64) -> ProgramResult {
    let [vault_info, owner_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let owner = require_signer(owner_info, accounts)?;
    let seeds: &[&[u8]] = &[ESCROW_SEED, owner.as_ref()];
    let bump = validate_authority(vault_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        owner_info,
        vault_info,
        system_program,
        seeds,
        bump,
        Vault::LEN,
        lamports,
    )?;
    guarded_init(&vault_info.try_borrow_data()?)?;
    Vault {
        owner,
        balance: lamports,
    }
    .pack(&mut vault_info.try_borrow_mut_data()?)?;

    msg!("Vault opened for {} with {} lamports", owner, lamports);
    Ok(())
}

/// Tops up an open vault. A closed vault no longer decodes, so a re-funded
/// tombstone cannot be brought back through here.
pub fn deposit(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [vault_info, depositor_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let depositor = require_signer(depositor_info, accounts)?;
    check_program(system_program, &system_program::id())?;
    verify_owner(vault_info, program_id)?;
    let mut vault = Vault::unpack(&vault_info.try_borrow_data()?)?;
    vault.balance = checked_add(vault.balance, amount)?;

    invoke(
        &system_instruction::transfer(&depositor, vault_info.key, amount),
        &[depositor_info.clone(), vault_info.clone(), system_program.clone()],
    )?;
    vault.pack(&mut vault_info.try_borrow_mut_data()?)?;

    msg!("Deposited {} lamports, vault balance {}", amount, vault.balance);
    Ok(())
}

/// Closes the vault into its owner's account. The destination must be the
/// recorded owner and must sign.
///
/// A vault that is drained, purged or already tombstoned is refused before
/// its owner is looked at, so a replayed close fails with
/// `UnauthorizedClose` whether it lands in the same transaction or a later
/// one.
pub fn close_vault(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [vault_info, destination_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let destination = require_signer(destination_info, accounts)?;
    ensure_closable(vault_info)?;
    verify_owner(vault_info, program_id)?;
    let vault = Vault::unpack(&vault_info.try_borrow_data()?)?;
    if vault.owner != destination {
        msg!("Close destination {} is not the vault owner {}", destination, vault.owner);
        return Err(GuardError::UnauthorizedClose.into());
    }

    close_account(vault_info, destination_info)
}
