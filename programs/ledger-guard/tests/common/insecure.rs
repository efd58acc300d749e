//! A deliberately broken program for adversarial tests.
//!
//! It speaks the same instruction format as the ledger program but, for
//! each vulnerable instruction, skips exactly the check the real handler
//! makes. Setup instructions fall through to the real handlers so both
//! programs start from the same state.

use ledger_guard::{
    constants::BUMP_VAULT_SEED,
    instruction::LedgerInstruction,
    processor,
    state::{BumpVault, Config, Pot, Record, State, UserAccount, Vault},
    validation::{canonical_bump, derive_with_bump},
    GuardError,
};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed, set_return_data},
    program_error::ProgramError,
    pubkey,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

pub const ID: Pubkey = pubkey!("AhmN5F5RjThDe4Q3egkXVV5AAqCghUizdGJ3kBBCjn9N");

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    match LedgerInstruction::unpack(data)? {
        LedgerInstruction::Withdraw { amount } => withdraw(accounts, amount),
        LedgerInstruction::WithdrawFromVault { amount } => withdraw_from_vault(accounts, amount),
        LedgerInstruction::InitializeState => initialize_state(accounts),
        LedgerInstruction::Add { a, b } => {
            set_return_data(&a.wrapping_add(b).to_le_bytes());
            Ok(())
        }
        LedgerInstruction::Subtract { a, b } => {
            set_return_data(&a.wrapping_sub(b).to_le_bytes());
            Ok(())
        }
        LedgerInstruction::Multiply { a, b } => {
            set_return_data(&a.wrapping_mul(b).to_le_bytes());
            Ok(())
        }
        LedgerInstruction::CloseVault => close_vault(accounts),
        LedgerInstruction::InitializeBumpVault { bump } => {
            initialize_bump_vault(program_id, accounts, bump)
        }
        LedgerInstruction::WithdrawBumpVault { amount } => {
            withdraw_bump_vault(program_id, accounts, amount)
        }
        LedgerInstruction::UpdateConfig { .. } => update_config(accounts),
        LedgerInstruction::WithdrawUser { amount } => withdraw_user(accounts, amount),
        other => processor::dispatch(program_id, accounts, other),
    }
}

fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> ProgramResult {
    **from.try_borrow_mut_lamports()? -= amount;
    **to.try_borrow_mut_lamports()? += amount;
    Ok(())
}

/// Compares the stored owner with the supplied key but never asks whether
/// that key signed.
fn withdraw(accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [pot_info, owner_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let pot = Pot::unpack(&pot_info.try_borrow_data()?)?;
    if pot.owner != *owner_info.key {
        return Err(GuardError::Unauthorized.into());
    }
    move_lamports(pot_info, owner_info, amount)
}

/// Transfers out of whatever token account is supplied as the vault.
fn withdraw_from_vault(accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [vault_info, authority_info, destination_info, _vault_authority, token_program] =
        accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let ix = spl_token::instruction::transfer(
        token_program.key,
        vault_info.key,
        destination_info.key,
        authority_info.key,
        &[],
        amount,
    )?;
    invoke(
        &ix,
        &[
            vault_info.clone(),
            destination_info.clone(),
            authority_info.clone(),
            token_program.clone(),
        ],
    )
}

/// Writes the caller in as admin over any state-sized account it owns.
fn initialize_state(accounts: &[AccountInfo]) -> ProgramResult {
    let [state_info, admin_info, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    State { admin: *admin_info.key }.pack(&mut state_info.try_borrow_mut_data()?)?;
    msg!("State admin set to {}", admin_info.key);
    Ok(())
}

/// Pays out the lamports and zeroes the balance field but leaves the tag,
/// so the record still decodes as an open vault.
fn close_vault(accounts: &[AccountInfo]) -> ProgramResult {
    let [vault_info, destination_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let mut vault = Vault::unpack(&vault_info.try_borrow_data()?)?;
    vault.balance = 0;
    vault.pack(&mut vault_info.try_borrow_mut_data()?)?;
    move_lamports(vault_info, destination_info, vault_info.lamports())
}

/// Creates the vault at whatever bump the caller names.
fn initialize_bump_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: Option<u8>,
) -> ProgramResult {
    let [vault_info, authority_info, system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = *authority_info.key;
    let seeds: &[&[u8]] = &[BUMP_VAULT_SEED, authority.as_ref()];
    let bump = match bump {
        Some(bump) => bump,
        None => canonical_bump(seeds, program_id)?,
    };

    let ix = system_instruction::create_account(
        &authority,
        vault_info.key,
        Rent::get()?.minimum_balance(BumpVault::LEN),
        BumpVault::LEN as u64,
        program_id,
    );
    invoke_signed(
        &ix,
        &[authority_info.clone(), vault_info.clone(), system_program.clone()],
        &[&[BUMP_VAULT_SEED, authority.as_ref(), &[bump]]],
    )?;
    BumpVault { authority, bump }.pack(&mut vault_info.try_borrow_mut_data()?)?;
    Ok(())
}

/// Re-derives with the stored bump, whichever one that is.
fn withdraw_bump_vault(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let [vault_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let authority = *authority_info.key;
    let vault = BumpVault::unpack(&vault_info.try_borrow_data()?)?;
    if vault.authority != authority {
        return Err(GuardError::Unauthorized.into());
    }
    let seeds: &[&[u8]] = &[BUMP_VAULT_SEED, authority.as_ref()];
    if derive_with_bump(seeds, vault.bump, program_id)? != *vault_info.key {
        return Err(GuardError::InvalidPDA.into());
    }
    move_lamports(vault_info, authority_info, amount)
}

/// Decodes the config without looking at who owns it, authorizes against
/// the authority written in those bytes and acts on the stored value by
/// returning it.
fn update_config(accounts: &[AccountInfo]) -> ProgramResult {
    let [config_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let config = Config::unpack_unchecked(&config_info.try_borrow_data()?)?;
    if config.authority != *authority_info.key || !authority_info.is_signer {
        return Err(GuardError::Unauthorized.into());
    }
    msg!("Trusting config authority {}", config.authority);
    set_return_data(&config.data.to_le_bytes());
    Ok(())
}

/// Reads any layout-compatible record as a user account.
fn withdraw_user(accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [user_info, authority_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let mut user = UserAccount::unpack_unchecked(&user_info.try_borrow_data()?)?;
    if user.authority != *authority_info.key || !authority_info.is_signer {
        return Err(GuardError::Unauthorized.into());
    }
    user.balance = user
        .balance
        .checked_sub(amount)
        .ok_or(ProgramError::InsufficientFunds)?;
    user.pack(&mut user_info.try_borrow_mut_data()?)?;
    Ok(())
}
