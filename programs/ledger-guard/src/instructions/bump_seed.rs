use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use super::{create_pda_account, withdraw_lamports};
use crate::{
    constants::BUMP_VAULT_SEED,
    error::GuardError,
    state::{BumpVault, Record},
    validation::{
        accept_bump, guarded_init, require_signer, validate_canonical_address, verify_owner,
    },
};

/// Creates the authority's vault at `["vault", authority]`.
///
/// A bump from the caller is optional and only ever compared against the
/// canonical one; the stored bump is always the one recomputed here.
pub fn initialize_bump_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: Option<u8>,
) -> ProgramResult {
    let [vault_info, authority_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    let seeds: &[&[u8]] = &[BUMP_VAULT_SEED, authority.as_ref()];
    if let Some(supplied) = bump {
        accept_bump(supplied, seeds, program_id)?;
    }
    let canonical = validate_canonical_address(vault_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        authority_info,
        vault_info,
        system_program,
        seeds,
        canonical,
        BumpVault::LEN,
        0,
    )?;
    guarded_init(&vault_info.try_borrow_data()?)?;
    BumpVault {
        authority,
        bump: canonical,
    }
    .pack(&mut vault_info.try_borrow_mut_data()?)?;

    msg!("Bump vault initialized with canonical bump {}", canonical);
    Ok(())
}

pub fn withdraw_bump_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let [vault_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    let seeds: &[&[u8]] = &[BUMP_VAULT_SEED, authority.as_ref()];

    verify_owner(vault_info, program_id)?;
    let vault = BumpVault::unpack(&vault_info.try_borrow_data()?)?;
    if vault.authority != authority {
        msg!("Bump vault belongs to {}, not {}", vault.authority, authority);
        return Err(GuardError::Unauthorized.into());
    }
    accept_bump(vault.bump, seeds, program_id)?;
    validate_canonical_address(vault_info.key, seeds, program_id)?;

    withdraw_lamports(vault_info, authority_info, amount)?;
    msg!("Withdrew {} lamports from bump vault", amount);
    Ok(())
}
