//! Persisted record layouts.
//!
//! Every record starts with an 8-byte discriminator, the first eight bytes
//! of `sha256("account:<Name>")`, followed by little-endian fields. Records
//! sharing a field layout (`UserAccount` / `AdminAccount`) differ only in
//! that tag, which is why it is checked before any field is read.

use solana_program::pubkey::Pubkey;

use crate::{error::GuardError, validation::discriminator::verify_discriminator};

pub const DISCRIMINATOR_LEN: usize = 8;

/// Tombstone written over the discriminator of a closed account.
pub const CLOSED_ACCOUNT_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [0xff; DISCRIMINATOR_LEN];

pub trait Record: Sized {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];
    /// Serialized length including the discriminator.
    const LEN: usize;

    /// Writes the fields into `dst`, which is exactly `LEN - 8` bytes.
    fn pack_fields(&self, dst: &mut [u8]);

    /// Reads the fields from `src`, which is exactly `LEN - 8` bytes.
    fn unpack_fields(src: &[u8]) -> Self;

    /// Stamps the discriminator and writes the record.
    fn pack(&self, data: &mut [u8]) -> Result<(), GuardError> {
        if data.len() < Self::LEN {
            return Err(GuardError::AccountDataTooSmall);
        }
        data[..DISCRIMINATOR_LEN].copy_from_slice(&Self::DISCRIMINATOR);
        self.pack_fields(&mut data[DISCRIMINATOR_LEN..Self::LEN]);
        Ok(())
    }

    /// Decodes the record after checking its discriminator.
    fn unpack(data: &[u8]) -> Result<Self, GuardError> {
        verify_discriminator(data, &Self::DISCRIMINATOR)?;
        Self::unpack_unchecked(data)
    }

    /// Decodes by size alone, ignoring the discriminator.
    ///
    /// Never call this on caller-supplied data in a handler; it exists so
    /// the type-confusion hazard can be reproduced in tests.
    fn unpack_unchecked(data: &[u8]) -> Result<Self, GuardError> {
        if data.len() < Self::LEN {
            return Err(GuardError::AccountDataTooSmall);
        }
        Ok(Self::unpack_fields(&data[DISCRIMINATOR_LEN..Self::LEN]))
    }
}

fn read_pubkey(src: &[u8], at: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&src[at..at + 32]);
    Pubkey::new_from_array(bytes)
}

fn read_u64(src: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&src[at..at + 8]);
    u64::from_le_bytes(bytes)
}

/// Lamport pot withdrawable only by its owner.
///
/// Layout: [0..8] discriminator, [8..40] owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pot {
    pub owner: Pubkey,
}

impl Record for Pot {
    const DISCRIMINATOR: [u8; 8] = [238, 118, 60, 175, 178, 191, 59, 58];
    const LEN: usize = 8 + 32;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.owner.as_ref());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self { owner: read_pubkey(src, 0) }
    }
}

/// Per-user state whose admin may be set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub admin: Pubkey,
}

impl Record for State {
    const DISCRIMINATOR: [u8; 8] = [216, 146, 107, 94, 104, 75, 182, 177];
    const LEN: usize = 8 + 32;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.admin.as_ref());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self { admin: read_pubkey(src, 0) }
    }
}

/// The `["vault"]` PDA. Holds the admin allowed to move tokens out of the
/// token vault this PDA is the authority of.
///
/// Layout: [0..8] discriminator, [8..40] admin, [40] bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAuthority {
    pub admin: Pubkey,
    pub bump: u8,
}

impl Record for VaultAuthority {
    const DISCRIMINATOR: [u8; 8] = [132, 34, 187, 202, 202, 195, 211, 53];
    const LEN: usize = 8 + 32 + 1;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.admin.as_ref());
        dst[32] = self.bump;
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            admin: read_pubkey(src, 0),
            bump: src[32],
        }
    }
}

/// Closable escrow vault.
///
/// Layout: [0..8] discriminator, [8..40] owner, [40..48] balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vault {
    pub owner: Pubkey,
    pub balance: u64,
}

impl Record for Vault {
    const DISCRIMINATOR: [u8; 8] = [211, 8, 232, 43, 2, 152, 117, 119];
    const LEN: usize = 8 + 32 + 8;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.owner.as_ref());
        dst[32..40].copy_from_slice(&self.balance.to_le_bytes());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            owner: read_pubkey(src, 0),
            balance: read_u64(src, 32),
        }
    }
}

/// Vault that remembers the bump it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpVault {
    pub authority: Pubkey,
    pub bump: u8,
}

impl Record for BumpVault {
    const DISCRIMINATOR: [u8; 8] = [205, 56, 232, 201, 177, 16, 169, 25];
    const LEN: usize = 8 + 32 + 1;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.authority.as_ref());
        dst[32] = self.bump;
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            authority: read_pubkey(src, 0),
            bump: src[32],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub authority: Pubkey,
    pub data: u64,
}

impl Record for Config {
    const DISCRIMINATOR: [u8; 8] = [155, 12, 170, 224, 30, 250, 204, 130];
    const LEN: usize = 8 + 32 + 8;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.authority.as_ref());
        dst[32..40].copy_from_slice(&self.data.to_le_bytes());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            authority: read_pubkey(src, 0),
            data: read_u64(src, 32),
        }
    }
}

/// Regular user balance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAccount {
    pub authority: Pubkey,
    pub balance: u64,
}

impl Record for UserAccount {
    const DISCRIMINATOR: [u8; 8] = [211, 33, 136, 16, 186, 110, 242, 127];
    const LEN: usize = 8 + 32 + 8;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.authority.as_ref());
        dst[32..40].copy_from_slice(&self.balance.to_le_bytes());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            authority: read_pubkey(src, 0),
            balance: read_u64(src, 32),
        }
    }
}

/// Same byte layout as [`UserAccount`]; only the tag tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAccount {
    pub authority: Pubkey,
    pub balance: u64,
}

impl Record for AdminAccount {
    const DISCRIMINATOR: [u8; 8] = [153, 119, 180, 178, 43, 66, 235, 148];
    const LEN: usize = 8 + 32 + 8;

    fn pack_fields(&self, dst: &mut [u8]) {
        dst[0..32].copy_from_slice(self.authority.as_ref());
        dst[32..40].copy_from_slice(&self.balance.to_le_bytes());
    }

    fn unpack_fields(src: &[u8]) -> Self {
        Self {
            authority: read_pubkey(src, 0),
            balance: read_u64(src, 32),
        }
    }
}

/// Any record this program persists, decoded by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerRecord {
    Pot(Pot),
    State(State),
    VaultAuthority(VaultAuthority),
    Vault(Vault),
    BumpVault(BumpVault),
    Config(Config),
    User(UserAccount),
    Admin(AdminAccount),
}

impl LedgerRecord {
    /// Reads the discriminator and dispatches to the matching decoder.
    /// Unknown and closed tags fail closed; there is no structural fallback.
    pub fn decode(data: &[u8]) -> Result<Self, GuardError> {
        let tag: [u8; DISCRIMINATOR_LEN] = data
            .get(..DISCRIMINATOR_LEN)
            .and_then(|t| t.try_into().ok())
            .ok_or(GuardError::DiscriminatorMismatch)?;

        match tag {
            t if t == Pot::DISCRIMINATOR => Pot::unpack(data).map(Self::Pot),
            t if t == State::DISCRIMINATOR => State::unpack(data).map(Self::State),
            t if t == VaultAuthority::DISCRIMINATOR => {
                VaultAuthority::unpack(data).map(Self::VaultAuthority)
            }
            t if t == Vault::DISCRIMINATOR => Vault::unpack(data).map(Self::Vault),
            t if t == BumpVault::DISCRIMINATOR => BumpVault::unpack(data).map(Self::BumpVault),
            t if t == Config::DISCRIMINATOR => Config::unpack(data).map(Self::Config),
            t if t == UserAccount::DISCRIMINATOR => UserAccount::unpack(data).map(Self::User),
            t if t == AdminAccount::DISCRIMINATOR => AdminAccount::unpack(data).map(Self::Admin),
            _ => Err(GuardError::DiscriminatorMismatch),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pot(_) => "Pot",
            Self::State(_) => "State",
            Self::VaultAuthority(_) => "VaultAuthority",
            Self::Vault(_) => "Vault",
            Self::BumpVault(_) => "BumpVault",
            Self::Config(_) => "Config",
            Self::User(_) => "UserAccount",
            Self::Admin(_) => "AdminAccount",
        }
    }
}
