/// Seed prefix for the lamport pot guarded by the signer check.
pub const POT_SEED: &[u8] = b"pot";

/// Seed for the single vault authority PDA that owns the token vault.
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault";

/// Seed prefix for per-user state records (re-initialization guard).
pub const STATE_SEED: &[u8] = b"state";

/// Seed prefix for closable escrow vaults.
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Seed prefix for per-authority vaults that store their canonical bump.
/// Shares the `vault` label; the authority key keeps it distinct from the
/// vault authority PDA.
pub const BUMP_VAULT_SEED: &[u8] = b"vault";

pub const CONFIG_SEED: &[u8] = b"config";
pub const USER_SEED: &[u8] = b"user";
pub const ADMIN_SEED: &[u8] = b"admin";
