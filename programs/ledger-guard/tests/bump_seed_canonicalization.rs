mod common;

use common::{assert_guard_error, insecure, TestContext, LAMPORTS_PER_SOL};
use ledger_guard::{
    constants::BUMP_VAULT_SEED,
    instruction,
    state::{BumpVault, Record},
    validation::derive_with_bump,
    GuardError, ID,
};
use solana_program_test::tokio;
use solana_sdk::{account::Account, pubkey::Pubkey, signature::Signer};

/// The highest valid bump below the canonical one, with its address.
fn non_canonical(authority: &Pubkey, program_id: &Pubkey) -> (u8, Pubkey) {
    let (_, canonical) = instruction::bump_vault_address(authority, program_id).unwrap();
    (0..canonical)
        .rev()
        .find_map(|bump| {
            derive_with_bump(&[BUMP_VAULT_SEED, authority.as_ref()], bump, program_id)
                .ok()
                .map(|address| (bump, address))
        })
        .unwrap()
}

async fn stored_bump(ctx: &mut TestContext, vault: &Pubkey) -> u8 {
    BumpVault::unpack(&ctx.account(vault).await.unwrap().data).unwrap().bump
}

#[tokio::test]
async fn test_initialize_stores_canonical_bump() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(2);
    let (vault, canonical) = instruction::bump_vault_address(&authority.pubkey(), &ID).unwrap();

    let ix = instruction::initialize_bump_vault(&ID, &vault, &authority.pubkey(), None);
    ctx.send(&[ix], &[&authority]).await.unwrap();
    assert_eq!(stored_bump(&mut ctx, &vault).await, canonical);
}

#[tokio::test]
async fn test_canonical_bump_from_caller_is_accepted() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(2);
    let (vault, canonical) = instruction::bump_vault_address(&authority.pubkey(), &ID).unwrap();

    let ix = instruction::initialize_bump_vault(&ID, &vault, &authority.pubkey(), Some(canonical));
    ctx.send(&[ix], &[&authority]).await.unwrap();
    assert_eq!(stored_bump(&mut ctx, &vault).await, canonical);
}

#[tokio::test]
async fn test_non_canonical_bump_is_rejected() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(2);
    let (vault, _) = instruction::bump_vault_address(&authority.pubkey(), &ID).unwrap();
    let (bump, _) = non_canonical(&authority.pubkey(), &ID);

    let ix = instruction::initialize_bump_vault(&ID, &vault, &authority.pubkey(), Some(bump));
    assert_guard_error(ctx.send(&[ix], &[&authority]).await, GuardError::NonCanonicalBump);
    assert!(ctx.account(&vault).await.is_none());
}

#[tokio::test]
async fn test_non_canonical_address_is_rejected() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(2);
    let (_, address) = non_canonical(&authority.pubkey(), &ID);

    // A valid, unoccupied program address for the same seeds.
    let ix = instruction::initialize_bump_vault(&ID, &address, &authority.pubkey(), None);
    assert_guard_error(ctx.send(&[ix], &[&authority]).await, GuardError::NonCanonicalBump);
    assert!(ctx.account(&address).await.is_none());
}

#[tokio::test]
async fn test_unrelated_address_is_invalid_pda() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(2);
    let unrelated = Pubkey::new_unique();
    let ix = instruction::initialize_bump_vault(&ID, &unrelated, &authority.pubkey(), None);
    assert_guard_error(ctx.send(&[ix], &[&authority]).await, GuardError::InvalidPDA);
}

#[tokio::test]
async fn test_withdraw_rederives_canonical_bump() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(5);
    let (vault, _) = instruction::bump_vault_address(&authority.pubkey(), &ID).unwrap();
    let ix = instruction::initialize_bump_vault(&ID, &vault, &authority.pubkey(), None);
    ctx.send(&[ix], &[&authority]).await.unwrap();
    ctx.fund(&vault, LAMPORTS_PER_SOL).await;

    let before = ctx.lamports(&authority.pubkey()).await;
    let ix = instruction::withdraw_bump_vault(&ID, &vault, &authority.pubkey(), 1_000);
    ctx.send(&[ix], &[&authority]).await.unwrap();
    assert_eq!(ctx.lamports(&authority.pubkey()).await, before + 1_000);
}

#[tokio::test]
async fn test_withdraw_rejects_tampered_stored_bump() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(1);
    let (vault, _) = instruction::bump_vault_address(&authority.pubkey(), &ID).unwrap();
    let (bump, _) = non_canonical(&authority.pubkey(), &ID);

    let mut data = vec![0; BumpVault::LEN];
    BumpVault { authority: authority.pubkey(), bump }
        .pack(&mut data)
        .unwrap();
    let account = Account {
        lamports: LAMPORTS_PER_SOL,
        data,
        owner: ID,
        ..Account::default()
    };
    ctx.set_account(&vault, account);

    let ix = instruction::withdraw_bump_vault(&ID, &vault, &authority.pubkey(), 1_000);
    assert_guard_error(ctx.send(&[ix], &[&authority]).await, GuardError::NonCanonicalBump);
}

#[tokio::test]
async fn test_insecure_initialize_fragments_authority() {
    let mut ctx = TestContext::new().await;
    let authority = ctx.funded_wallet(5);
    let key = authority.pubkey();
    let (canonical_vault, canonical) =
        instruction::bump_vault_address(&key, &insecure::ID).unwrap();
    let (bump, shadow_vault) = non_canonical(&key, &insecure::ID);

    let ixs = [
        instruction::initialize_bump_vault(&insecure::ID, &canonical_vault, &key, None),
        instruction::initialize_bump_vault(&insecure::ID, &shadow_vault, &key, Some(bump)),
    ];
    ctx.send(&ixs, &[&authority]).await.unwrap();

    // Two live vaults for one authority and one seed prefix.
    assert_eq!(stored_bump(&mut ctx, &canonical_vault).await, canonical);
    assert_eq!(stored_bump(&mut ctx, &shadow_vault).await, bump);

    ctx.fund(&shadow_vault, LAMPORTS_PER_SOL).await;
    let ix = instruction::withdraw_bump_vault(&insecure::ID, &shadow_vault, &key, 1_000);
    ctx.send(&[ix], &[&authority]).await.unwrap();
}
