//! Account validators.
//!
//! Each check is a plain function returning `Result<_, GuardError>` and is
//! called explicitly at the top of an instruction handler, before any state
//! is touched. None of them keep state between calls.

pub mod arithmetic;
pub mod close;
pub mod discriminator;
pub mod init;
pub mod owner;
pub mod pda;
pub mod signer;

pub use arithmetic::{checked_add, checked_mul, checked_sub};
pub use close::{close_account, close_state, ensure_closable, ensure_not_closed, CloseState};
pub use discriminator::{is_closed, verify_discriminator};
pub use init::guarded_init;
pub use owner::verify_owner;
pub use pda::{
    accept_bump, canonical_bump, derive, derive_with_bump, validate_authority,
    validate_canonical_address,
};
pub use signer::{require_signer, signer_keys, verify_signer};
