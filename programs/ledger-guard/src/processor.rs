use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    instruction::LedgerInstruction,
    instructions::{
        bump_seed, closing_accounts, integer_overflow, owner_checks, pda_sharing,
        reinitialization, signer_checks, type_cosplay,
    },
};

/// Program entrypoint. Rejects any invocation addressed to a program id
/// other than [`crate::ID`].
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if program_id != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    dispatch(program_id, accounts, LedgerInstruction::unpack(instruction_data)?)
}

/// Routes a decoded instruction to its handler without checking which
/// program id is executing.
pub fn dispatch(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction: LedgerInstruction,
) -> ProgramResult {
    match instruction {
        LedgerInstruction::InitializePot { lamports } => {
            msg!("Instruction: InitializePot");
            signer_checks::initialize_pot(program_id, accounts, lamports)
        }
        LedgerInstruction::Withdraw { amount } => {
            msg!("Instruction: Withdraw");
            signer_checks::withdraw(program_id, accounts, amount)
        }
        LedgerInstruction::InitializeVaultAuthority => {
            msg!("Instruction: InitializeVaultAuthority");
            pda_sharing::initialize_vault_authority(program_id, accounts)
        }
        LedgerInstruction::WithdrawFromVault { amount } => {
            msg!("Instruction: WithdrawFromVault");
            pda_sharing::withdraw_from_vault(program_id, accounts, amount)
        }
        LedgerInstruction::InitializeState => {
            msg!("Instruction: InitializeState");
            reinitialization::initialize_state(program_id, accounts)
        }
        LedgerInstruction::Add { a, b } => integer_overflow::add(a, b),
        LedgerInstruction::Subtract { a, b } => integer_overflow::subtract(a, b),
        LedgerInstruction::Multiply { a, b } => integer_overflow::multiply(a, b),
        LedgerInstruction::OpenVault { lamports } => {
            msg!("Instruction: OpenVault");
            closing_accounts::open_vault(program_id, accounts, lamports)
        }
        LedgerInstruction::Deposit { amount } => {
            msg!("Instruction: Deposit");
            closing_accounts::deposit(program_id, accounts, amount)
        }
        LedgerInstruction::CloseVault => {
            msg!("Instruction: CloseVault");
            closing_accounts::close_vault(program_id, accounts)
        }
        LedgerInstruction::InitializeBumpVault { bump } => {
            msg!("Instruction: InitializeBumpVault");
            bump_seed::initialize_bump_vault(program_id, accounts, bump)
        }
        LedgerInstruction::WithdrawBumpVault { amount } => {
            msg!("Instruction: WithdrawBumpVault");
            bump_seed::withdraw_bump_vault(program_id, accounts, amount)
        }
        LedgerInstruction::InitializeConfig => {
            msg!("Instruction: InitializeConfig");
            owner_checks::initialize_config(program_id, accounts)
        }
        LedgerInstruction::UpdateConfig { value } => {
            msg!("Instruction: UpdateConfig");
            owner_checks::update_config(program_id, accounts, value)
        }
        LedgerInstruction::InitializeUser { balance } => {
            msg!("Instruction: InitializeUser");
            type_cosplay::initialize_user(program_id, accounts, balance)
        }
        LedgerInstruction::InitializeAdmin { balance } => {
            msg!("Instruction: InitializeAdmin");
            type_cosplay::initialize_admin(program_id, accounts, balance)
        }
        LedgerInstruction::WithdrawUser { amount } => {
            msg!("Instruction: WithdrawUser");
            type_cosplay::withdraw_user(program_id, accounts, amount)
        }
    }
}
