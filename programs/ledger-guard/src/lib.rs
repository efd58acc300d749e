//! Account-validation engine for a ledger program.
//!
//! Handlers in [`instructions`] compose the validators in [`validation`]
//! explicitly before mutating any account. [`processor`] is the program
//! entrypoint; [`instruction`] holds the wire format and client builders.

use solana_program::declare_id;

pub mod constants;
pub mod error;
pub mod instruction;
pub mod instructions;
pub mod processor;
pub mod state;
pub mod validation;

pub use error::GuardError;

declare_id!("HMcJbgHERxZmqxQRT7sKEW6brbauCfz8M9GFxSVLr1nH");

#[cfg(not(feature = "no-entrypoint"))]
use processor::process_instruction;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
