use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use super::{create_pda_account, withdraw_lamports};
use crate::{
    constants::POT_SEED,
    error::GuardError,
    state::{Pot, Record},
    validation::{guarded_init, require_signer, validate_authority, verify_owner},
};

pub fn initialize_pot(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    lamports: u64,
) -> ProgramResult {
    let [pot_info, owner_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let owner = require_signer(owner_info, accounts)?;
    let seeds: &[&[u8]] = &[POT_SEED, owner.as_ref()];
    let bump = validate_authority(pot_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        owner_info,
        pot_info,
        system_program,
        seeds,
        bump,
        Pot::LEN,
        lamports,
    )?;
    guarded_init(&pot_info.try_borrow_data()?)?;
    Pot { owner }.pack(&mut pot_info.try_borrow_mut_data()?)?;

    msg!("Pot initialized for {} with {} lamports", owner, lamports);
    Ok(())
}

/// Pays out of the pot. The owner account must carry a transaction
/// signature; matching the stored owner key alone is not enough.
pub fn withdraw(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [pot_info, owner_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let owner = require_signer(owner_info, accounts)?;
    verify_owner(pot_info, program_id)?;
    let pot = Pot::unpack(&pot_info.try_borrow_data()?)?;
    if pot.owner != owner {
        msg!("Pot belongs to {}, not {}", pot.owner, owner);
        return Err(GuardError::Unauthorized.into());
    }

    withdraw_lamports(pot_info, owner_info, amount)?;
    msg!("Withdrew {} lamports from pot", amount);
    Ok(())
}
