use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program::invoke_signed,
    program_error::ProgramError, program_pack::Pack, pubkey::Pubkey,
};
use spl_token::state::Account as TokenAccount;

use super::{check_program, create_pda_account};
use crate::{
    constants::VAULT_AUTHORITY_SEED,
    error::GuardError,
    state::{Record, VaultAuthority},
    validation::{guarded_init, require_signer, validate_authority, verify_owner},
};

pub fn initialize_vault_authority(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [vault_authority_info, admin_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let admin = require_signer(admin_info, accounts)?;
    let bump = validate_authority(vault_authority_info.key, &[VAULT_AUTHORITY_SEED], program_id)?;

    create_pda_account(
        program_id,
        admin_info,
        vault_authority_info,
        system_program,
        &[VAULT_AUTHORITY_SEED],
        bump,
        VaultAuthority::LEN,
        0,
    )?;
    guarded_init(&vault_authority_info.try_borrow_data()?)?;
    VaultAuthority { admin, bump }.pack(&mut vault_authority_info.try_borrow_mut_data()?)?;

    msg!("Vault authority {} initialized, admin {}", vault_authority_info.key, admin);
    Ok(())
}

/// Moves tokens out of the vault. The vault authority must be the one
/// program address derived from `["vault"]`; it then signs the token
/// transfer with a bump recomputed here, so a substituted vault the PDA
/// does not own is refused.
pub fn withdraw_from_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let [vault_info, authority_info, destination_info, vault_authority_info, token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    check_program(token_program, &spl_token::id())?;
    let vault_authority = *vault_authority_info.key;
    let bump = validate_authority(&vault_authority, &[VAULT_AUTHORITY_SEED], program_id)?;

    verify_owner(vault_authority_info, program_id)?;
    let record = VaultAuthority::unpack(&vault_authority_info.try_borrow_data()?)?;
    if record.admin != authority {
        msg!("Vault admin is {}, not {}", record.admin, authority);
        return Err(GuardError::Unauthorized.into());
    }

    verify_owner(vault_info, &spl_token::id())?;
    let vault = TokenAccount::unpack(&vault_info.try_borrow_data()?)?;
    if vault.owner != vault_authority {
        msg!("Vault {} is not held by the vault authority", vault_info.key);
        return Err(GuardError::OwnerMismatch.into());
    }

    let ix = spl_token::instruction::transfer(
        token_program.key,
        vault_info.key,
        destination_info.key,
        &vault_authority,
        &[],
        amount,
    )?;
    invoke_signed(
        &ix,
        &[
            vault_info.clone(),
            destination_info.clone(),
            vault_authority_info.clone(),
            token_program.clone(),
        ],
        &[&[VAULT_AUTHORITY_SEED, &[bump]]],
    )?;

    msg!("Withdrew {} tokens from vault", amount);
    Ok(())
}
