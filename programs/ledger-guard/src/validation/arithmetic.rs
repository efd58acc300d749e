use crate::error::GuardError;

// Every balance mutation goes through these; raw `+`/`-`/`*` on balances
// would wrap silently in builds without overflow checks.

pub fn checked_add(a: u64, b: u64) -> Result<u64, GuardError> {
    a.checked_add(b).ok_or(GuardError::ArithmeticOverflow)
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64, GuardError> {
    a.checked_sub(b).ok_or(GuardError::ArithmeticOverflow)
}

pub fn checked_mul(a: u64, b: u64) -> Result<u64, GuardError> {
    a.checked_mul(b).ok_or(GuardError::ArithmeticOverflow)
}
