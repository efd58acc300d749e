use solana_program::{entrypoint::ProgramResult, msg, program::set_return_data};

use crate::{
    error::GuardError,
    validation::{checked_add, checked_mul, checked_sub},
};

fn compute(
    name: &str,
    op: fn(u64, u64) -> Result<u64, GuardError>,
    a: u64,
    b: u64,
) -> ProgramResult {
    let result = op(a, b).inspect_err(|_| msg!("{} overflowed: {}, {}", name, a, b))?;
    set_return_data(&result.to_le_bytes());
    msg!("{}({}, {}) = {}", name, a, b, result);
    Ok(())
}

/// The sum is returned as little-endian return data.
pub fn add(a: u64, b: u64) -> ProgramResult {
    compute("add", checked_add, a, b)
}

pub fn subtract(a: u64, b: u64) -> ProgramResult {
    compute("subtract", checked_sub, a, b)
}

pub fn multiply(a: u64, b: u64) -> ProgramResult {
    compute("multiply", checked_mul, a, b)
}
