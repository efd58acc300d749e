use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use super::create_pda_account;
use crate::{
    constants::STATE_SEED,
    state::{Record, State},
    validation::{guarded_init, require_signer, validate_authority},
};

/// Creates the caller's state record at `["state", user]`.
///
/// Two independent guards stop a second initialization: the address is
/// bound to the signer, and allocation fails once the address holds
/// anything. `guarded_init` then re-checks the tag on the fresh data.
pub fn initialize_state(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [state_info, user_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let user = require_signer(user_info, accounts)?;
    let seeds: &[&[u8]] = &[STATE_SEED, user.as_ref()];
    let bump = validate_authority(state_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        user_info,
        state_info,
        system_program,
        seeds,
        bump,
        State::LEN,
        0,
    )?;
    guarded_init(&state_info.try_borrow_data()?)?;
    State { admin: user }.pack(&mut state_info.try_borrow_mut_data()?)?;

    msg!("State initialized, admin {}", user);
    Ok(())
}
