//! Instruction wire format and client-side builders.
//!
//! The first byte selects the instruction; arguments follow as
//! little-endian integers.

use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    constants::{
        ADMIN_SEED, BUMP_VAULT_SEED, CONFIG_SEED, ESCROW_SEED, POT_SEED, STATE_SEED, USER_SEED,
        VAULT_AUTHORITY_SEED,
    },
    error::GuardError,
    validation::derive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerInstruction {
    /// Creates the owner's pot PDA and funds it.
    ///
    /// Accounts:
    /// 0. `[writable]` pot, PDA `["pot", owner]`
    /// 1. `[writable, signer]` owner
    /// 2. `[]` system program
    InitializePot { lamports: u64 },

    /// Moves lamports from the pot back to its owner.
    ///
    /// Accounts:
    /// 0. `[writable]` pot
    /// 1. `[writable, signer]` owner
    Withdraw { amount: u64 },

    /// Accounts:
    /// 0. `[writable]` vault authority, PDA `["vault"]`
    /// 1. `[writable, signer]` admin
    /// 2. `[]` system program
    InitializeVaultAuthority,

    /// Token transfer out of the vault, signed by the vault authority PDA.
    ///
    /// Accounts:
    /// 0. `[writable]` vault token account
    /// 1. `[signer]` authority
    /// 2. `[writable]` destination token account
    /// 3. `[]` vault authority
    /// 4. `[]` token program
    WithdrawFromVault { amount: u64 },

    /// Accounts:
    /// 0. `[writable]` state, PDA `["state", user]`
    /// 1. `[writable, signer]` user
    /// 2. `[]` system program
    InitializeState,

    Add { a: u64, b: u64 },

    /// Accounts:
    /// 0. `[writable]` vault, PDA `["escrow", owner]`
    /// 1. `[writable, signer]` owner
    /// 2. `[]` system program
    OpenVault { lamports: u64 },

    /// Accounts:
    /// 0. `[writable]` vault
    /// 1. `[writable, signer]` depositor
    /// 2. `[]` system program
    Deposit { amount: u64 },

    /// Accounts:
    /// 0. `[writable]` vault
    /// 1. `[writable, signer]` destination, the vault owner
    CloseVault,

    /// Accounts:
    /// 0. `[writable]` vault, PDA `["vault", authority]`
    /// 1. `[writable, signer]` authority
    /// 2. `[]` system program
    InitializeBumpVault { bump: Option<u8> },

    /// Accounts:
    /// 0. `[writable]` vault
    /// 1. `[writable, signer]` authority
    WithdrawBumpVault { amount: u64 },

    /// Accounts:
    /// 0. `[writable]` config, PDA `["config", authority]`
    /// 1. `[writable, signer]` authority
    /// 2. `[]` system program
    InitializeConfig,

    /// Stores `value` and returns the previous value as little-endian
    /// return data.
    ///
    /// Accounts:
    /// 0. `[writable]` config
    /// 1. `[signer]` authority
    UpdateConfig { value: u64 },

    /// Accounts:
    /// 0. `[writable]` user account, PDA `["user", authority]`
    /// 1. `[writable, signer]` authority
    /// 2. `[]` system program
    InitializeUser { balance: u64 },

    /// Accounts:
    /// 0. `[writable]` admin account, PDA `["admin", authority]`
    /// 1. `[writable, signer]` authority
    /// 2. `[]` system program
    InitializeAdmin { balance: u64 },

    /// Debits the recorded balance of a user account.
    ///
    /// Accounts:
    /// 0. `[writable]` user account
    /// 1. `[signer]` authority
    WithdrawUser { amount: u64 },

    Subtract { a: u64, b: u64 },
    Multiply { a: u64, b: u64 },
}

fn read_u64(data: &[u8]) -> Result<u64, GuardError> {
    data.try_into()
        .map(u64::from_le_bytes)
        .map_err(|_| GuardError::InvalidInstruction)
}

fn read_pair(data: &[u8]) -> Result<(u64, u64), GuardError> {
    if data.len() != 16 {
        return Err(GuardError::InvalidInstruction);
    }
    Ok((read_u64(&data[..8])?, read_u64(&data[8..])?))
}

fn no_args(data: &[u8]) -> Result<(), GuardError> {
    if data.is_empty() {
        Ok(())
    } else {
        Err(GuardError::InvalidInstruction)
    }
}

impl LedgerInstruction {
    pub fn unpack(data: &[u8]) -> Result<Self, GuardError> {
        let (&opcode, rest) = data.split_first().ok_or(GuardError::InvalidInstruction)?;
        Ok(match opcode {
            0 => Self::InitializePot { lamports: read_u64(rest)? },
            1 => Self::Withdraw { amount: read_u64(rest)? },
            2 => no_args(rest).map(|_| Self::InitializeVaultAuthority)?,
            3 => Self::WithdrawFromVault { amount: read_u64(rest)? },
            4 => no_args(rest).map(|_| Self::InitializeState)?,
            5 => read_pair(rest).map(|(a, b)| Self::Add { a, b })?,
            6 => Self::OpenVault { lamports: read_u64(rest)? },
            7 => Self::Deposit { amount: read_u64(rest)? },
            8 => no_args(rest).map(|_| Self::CloseVault)?,
            9 => match rest {
                [] => Self::InitializeBumpVault { bump: None },
                [bump] => Self::InitializeBumpVault { bump: Some(*bump) },
                _ => return Err(GuardError::InvalidInstruction),
            },
            10 => Self::WithdrawBumpVault { amount: read_u64(rest)? },
            11 => no_args(rest).map(|_| Self::InitializeConfig)?,
            12 => Self::UpdateConfig { value: read_u64(rest)? },
            13 => Self::InitializeUser { balance: read_u64(rest)? },
            14 => Self::InitializeAdmin { balance: read_u64(rest)? },
            15 => Self::WithdrawUser { amount: read_u64(rest)? },
            16 => read_pair(rest).map(|(a, b)| Self::Subtract { a, b })?,
            17 => read_pair(rest).map(|(a, b)| Self::Multiply { a, b })?,
            _ => return Err(GuardError::InvalidInstruction),
        })
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(17);
        match *self {
            Self::InitializePot { lamports } => push(&mut buf, 0, &[lamports]),
            Self::Withdraw { amount } => push(&mut buf, 1, &[amount]),
            Self::InitializeVaultAuthority => push(&mut buf, 2, &[]),
            Self::WithdrawFromVault { amount } => push(&mut buf, 3, &[amount]),
            Self::InitializeState => push(&mut buf, 4, &[]),
            Self::Add { a, b } => push(&mut buf, 5, &[a, b]),
            Self::OpenVault { lamports } => push(&mut buf, 6, &[lamports]),
            Self::Deposit { amount } => push(&mut buf, 7, &[amount]),
            Self::CloseVault => push(&mut buf, 8, &[]),
            Self::InitializeBumpVault { bump } => {
                buf.push(9);
                buf.extend(bump);
            }
            Self::WithdrawBumpVault { amount } => push(&mut buf, 10, &[amount]),
            Self::InitializeConfig => push(&mut buf, 11, &[]),
            Self::UpdateConfig { value } => push(&mut buf, 12, &[value]),
            Self::InitializeUser { balance } => push(&mut buf, 13, &[balance]),
            Self::InitializeAdmin { balance } => push(&mut buf, 14, &[balance]),
            Self::WithdrawUser { amount } => push(&mut buf, 15, &[amount]),
            Self::Subtract { a, b } => push(&mut buf, 16, &[a, b]),
            Self::Multiply { a, b } => push(&mut buf, 17, &[a, b]),
        }
        buf
    }
}

fn push(buf: &mut Vec<u8>, opcode: u8, args: &[u64]) {
    buf.push(opcode);
    for arg in args {
        buf.extend_from_slice(&arg.to_le_bytes());
    }
}

// Address helpers. These go through the same derivation the handlers use.

pub fn pot_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), GuardError> {
    derive(&[POT_SEED, owner.as_ref()], program_id)
}

pub fn vault_authority_address(program_id: &Pubkey) -> Result<(Pubkey, u8), GuardError> {
    derive(&[VAULT_AUTHORITY_SEED], program_id)
}

pub fn state_address(user: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), GuardError> {
    derive(&[STATE_SEED, user.as_ref()], program_id)
}

pub fn escrow_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), GuardError> {
    derive(&[ESCROW_SEED, owner.as_ref()], program_id)
}

pub fn bump_vault_address(
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), GuardError> {
    derive(&[BUMP_VAULT_SEED, authority.as_ref()], program_id)
}

pub fn config_address(
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), GuardError> {
    derive(&[CONFIG_SEED, authority.as_ref()], program_id)
}

pub fn user_address(
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), GuardError> {
    derive(&[USER_SEED, authority.as_ref()], program_id)
}

pub fn admin_address(
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), GuardError> {
    derive(&[ADMIN_SEED, authority.as_ref()], program_id)
}

// Builders. Every account is passed explicitly so callers can name any
// address, including ones the program will reject.

fn build(program_id: &Pubkey, ix: LedgerInstruction, accounts: Vec<AccountMeta>) -> Instruction {
    Instruction::new_with_bytes(*program_id, &ix.pack(), accounts)
}

/// `[writable] target, [writable, signer] payer`, the shape shared by the
/// lamport withdrawals and the close.
fn target_and_payer(target: &Pubkey, payer: &Pubkey) -> Vec<AccountMeta> {
    vec![AccountMeta::new(*target, false), AccountMeta::new(*payer, true)]
}

/// [`target_and_payer`] followed by the system program, for every
/// instruction that allocates or transfers through it.
fn with_system_program(target: &Pubkey, payer: &Pubkey) -> Vec<AccountMeta> {
    let mut accounts = target_and_payer(target, payer);
    accounts.push(AccountMeta::new_readonly(system_program::id(), false));
    accounts
}

pub fn initialize_pot(
    program_id: &Pubkey,
    pot: &Pubkey,
    owner: &Pubkey,
    lamports: u64,
) -> Instruction {
    let accounts = with_system_program(pot, owner);
    build(program_id, LedgerInstruction::InitializePot { lamports }, accounts)
}

pub fn withdraw(program_id: &Pubkey, pot: &Pubkey, owner: &Pubkey, amount: u64) -> Instruction {
    build(program_id, LedgerInstruction::Withdraw { amount }, target_and_payer(pot, owner))
}

pub fn initialize_vault_authority(
    program_id: &Pubkey,
    vault_authority: &Pubkey,
    admin: &Pubkey,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::InitializeVaultAuthority,
        with_system_program(vault_authority, admin),
    )
}

pub fn withdraw_from_vault(
    program_id: &Pubkey,
    vault: &Pubkey,
    authority: &Pubkey,
    destination: &Pubkey,
    vault_authority: &Pubkey,
    amount: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::WithdrawFromVault { amount },
        vec![
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*vault_authority, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
    )
}

pub fn initialize_state(program_id: &Pubkey, state: &Pubkey, user: &Pubkey) -> Instruction {
    build(program_id, LedgerInstruction::InitializeState, with_system_program(state, user))
}

pub fn add(program_id: &Pubkey, a: u64, b: u64) -> Instruction {
    build(program_id, LedgerInstruction::Add { a, b }, vec![])
}

pub fn subtract(program_id: &Pubkey, a: u64, b: u64) -> Instruction {
    build(program_id, LedgerInstruction::Subtract { a, b }, vec![])
}

pub fn multiply(program_id: &Pubkey, a: u64, b: u64) -> Instruction {
    build(program_id, LedgerInstruction::Multiply { a, b }, vec![])
}

pub fn open_vault(
    program_id: &Pubkey,
    vault: &Pubkey,
    owner: &Pubkey,
    lamports: u64,
) -> Instruction {
    let accounts = with_system_program(vault, owner);
    build(program_id, LedgerInstruction::OpenVault { lamports }, accounts)
}

pub fn deposit(
    program_id: &Pubkey,
    vault: &Pubkey,
    depositor: &Pubkey,
    amount: u64,
) -> Instruction {
    let accounts = with_system_program(vault, depositor);
    build(program_id, LedgerInstruction::Deposit { amount }, accounts)
}

pub fn close_vault(program_id: &Pubkey, vault: &Pubkey, destination: &Pubkey) -> Instruction {
    build(program_id, LedgerInstruction::CloseVault, target_and_payer(vault, destination))
}

pub fn initialize_bump_vault(
    program_id: &Pubkey,
    vault: &Pubkey,
    authority: &Pubkey,
    bump: Option<u8>,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::InitializeBumpVault { bump },
        with_system_program(vault, authority),
    )
}

pub fn withdraw_bump_vault(
    program_id: &Pubkey,
    vault: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::WithdrawBumpVault { amount },
        target_and_payer(vault, authority),
    )
}

pub fn initialize_config(program_id: &Pubkey, config: &Pubkey, authority: &Pubkey) -> Instruction {
    build(program_id, LedgerInstruction::InitializeConfig, with_system_program(config, authority))
}

pub fn update_config(
    program_id: &Pubkey,
    config: &Pubkey,
    authority: &Pubkey,
    value: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::UpdateConfig { value },
        vec![AccountMeta::new(*config, false), AccountMeta::new_readonly(*authority, true)],
    )
}

pub fn initialize_user(
    program_id: &Pubkey,
    account: &Pubkey,
    authority: &Pubkey,
    balance: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::InitializeUser { balance },
        with_system_program(account, authority),
    )
}

pub fn initialize_admin(
    program_id: &Pubkey,
    account: &Pubkey,
    authority: &Pubkey,
    balance: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::InitializeAdmin { balance },
        with_system_program(account, authority),
    )
}

pub fn withdraw_user(
    program_id: &Pubkey,
    user_account: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    build(
        program_id,
        LedgerInstruction::WithdrawUser { amount },
        vec![AccountMeta::new(*user_account, false), AccountMeta::new_readonly(*authority, true)],
    )
}
