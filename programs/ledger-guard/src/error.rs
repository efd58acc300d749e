use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Security rejections raised by the validators.
///
/// Codes start at 6000 so they line up with Anchor's custom error range and
/// never collide with the runtime's builtin `ProgramError` variants. The
/// first eight codes are part of the public contract and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u32)]
pub enum GuardError {
    #[error("Required signer did not sign the transaction")]
    MissingSignature = 6000,
    #[error("Supplied address does not match the derived program address")]
    InvalidPDA,
    #[error("Account is already initialized")]
    AlreadyInitialized,
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Account is not owned by the expected program")]
    OwnerMismatch,
    #[error("Account discriminator does not match the expected type")]
    DiscriminatorMismatch,
    #[error("Account cannot be closed by this caller or is already closed")]
    UnauthorizedClose,
    #[error("Bump seed is not the canonical bump for these seeds")]
    NonCanonicalBump,

    #[error("Signer is not the authority recorded in the account")]
    Unauthorized,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Account must be writable")]
    AccountNotWritable,
    #[error("Account data too small for this record")]
    AccountDataTooSmall,
    #[error("Invalid instruction data")]
    InvalidInstruction,
}

impl GuardError {
    const ALL: [GuardError; 13] = [
        GuardError::MissingSignature,
        GuardError::InvalidPDA,
        GuardError::AlreadyInitialized,
        GuardError::ArithmeticOverflow,
        GuardError::OwnerMismatch,
        GuardError::DiscriminatorMismatch,
        GuardError::UnauthorizedClose,
        GuardError::NonCanonicalBump,
        GuardError::Unauthorized,
        GuardError::InsufficientFunds,
        GuardError::AccountNotWritable,
        GuardError::AccountDataTooSmall,
        GuardError::InvalidInstruction,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Inverse of [`GuardError::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

impl From<GuardError> for ProgramError {
    fn from(e: GuardError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
