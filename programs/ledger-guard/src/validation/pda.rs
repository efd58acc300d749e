use solana_program::{msg, pubkey::Pubkey};

use crate::error::GuardError;

/// Derives the canonical program address for `seeds` under `program_id`.
///
/// The canonical bump is the highest value in `255..=0` whose derivation
/// lands off the ed25519 curve. Instruction handlers and the client-side
/// address helpers both call this, so the two can never drift apart.
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), GuardError> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(GuardError::InvalidPDA)
}

/// Derives the address for `seeds ++ [bump]`, canonical or not.
pub fn derive_with_bump(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, GuardError> {
    let bump_seed = [bump];
    let mut full: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
    full.extend_from_slice(seeds);
    full.push(&bump_seed);
    Pubkey::create_program_address(&full, program_id).map_err(|_| GuardError::InvalidPDA)
}

pub fn canonical_bump(seeds: &[&[u8]], program_id: &Pubkey) -> Result<u8, GuardError> {
    derive(seeds, program_id).map(|(_, bump)| bump)
}

/// Requires `supplied` to be bit-for-bit the canonical address for `seeds`.
/// Returns the canonical bump, recomputed here rather than read from the
/// caller, for use as a signing seed.
pub fn validate_authority(
    supplied: &Pubkey,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<u8, GuardError> {
    let (expected, bump) = derive(seeds, program_id)?;
    if supplied != &expected {
        msg!("Invalid PDA: expected {}, got {}", expected, supplied);
        return Err(GuardError::InvalidPDA);
    }
    Ok(bump)
}

/// Rejects any caller-supplied bump other than the canonical one, even when
/// it derives a perfectly valid address.
pub fn accept_bump(
    supplied_bump: u8,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(), GuardError> {
    let canonical = canonical_bump(seeds, program_id)?;
    if supplied_bump != canonical {
        msg!("Non-canonical bump {} (canonical is {})", supplied_bump, canonical);
        return Err(GuardError::NonCanonicalBump);
    }
    Ok(())
}

/// Like [`validate_authority`], but tells a non-canonical PDA for the same
/// seeds (`NonCanonicalBump`) apart from an unrelated address (`InvalidPDA`).
pub fn validate_canonical_address(
    supplied: &Pubkey,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<u8, GuardError> {
    let (expected, canonical) = derive(seeds, program_id)?;
    if supplied == &expected {
        return Ok(canonical);
    }
    let forged = (0..canonical).rev().find(|bump| {
        derive_with_bump(seeds, *bump, program_id).is_ok_and(|addr| addr == *supplied)
    });
    match forged {
        Some(bump) => {
            msg!("Address derives from non-canonical bump {} (canonical is {})", bump, canonical);
            Err(GuardError::NonCanonicalBump)
        }
        None => {
            msg!("Invalid PDA: expected {}, got {}", expected, supplied);
            Err(GuardError::InvalidPDA)
        }
    }
}
