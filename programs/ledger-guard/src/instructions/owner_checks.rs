use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program::set_return_data,
    program_error::ProgramError, pubkey::Pubkey,
};

use super::create_pda_account;
use crate::{
    constants::CONFIG_SEED,
    error::GuardError,
    state::{Config, Record},
    validation::{guarded_init, require_signer, validate_authority, verify_owner},
};

pub fn initialize_config(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [config_info, authority_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    let seeds: &[&[u8]] = &[CONFIG_SEED, authority.as_ref()];
    let bump = validate_authority(config_info.key, seeds, program_id)?;

    create_pda_account(
        program_id,
        authority_info,
        config_info,
        system_program,
        seeds,
        bump,
        Config::LEN,
        0,
    )?;
    guarded_init(&config_info.try_borrow_data()?)?;
    Config { authority, data: 0 }.pack(&mut config_info.try_borrow_mut_data()?)?;

    msg!("Config initialized, authority {}", authority);
    Ok(())
}

/// Updates the config value and returns the value it replaced.
///
/// The account's owner is checked before a single byte of it is decoded; a
/// look-alike owned by another program is rejected even when its bytes name
/// the signer as authority.
pub fn update_config(program_id: &Pubkey, accounts: &[AccountInfo], value: u64) -> ProgramResult {
    let [config_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = require_signer(authority_info, accounts)?;
    verify_owner(config_info, program_id)?;
    let mut config = Config::unpack(&config_info.try_borrow_data()?)?;
    if config.authority != authority {
        msg!("Config authority is {}, not {}", config.authority, authority);
        return Err(GuardError::Unauthorized.into());
    }

    let previous = config.data;
    config.data = value;
    config.pack(&mut config_info.try_borrow_mut_data()?)?;
    set_return_data(&previous.to_le_bytes());
    msg!("Config updated from {} to {}", previous, value);
    Ok(())
}
