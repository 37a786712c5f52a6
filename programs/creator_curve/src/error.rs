//! Program-wide error codes.

use anchor_lang::prelude::*;

/// Canonical error taxonomy for the pool engine.
///
/// Account-existence conditions (`AlreadyExists`, `NotFound`) are normally
/// raised by the runtime's account constraints before a handler body runs;
/// the variants are defined here so clients and the instruction codec share
/// one set of codes.
#[error_code]
pub enum PoolError {
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Pool is not active")]
    InactivePool,

    #[msg("Trader balance cannot cover the total cost")]
    InsufficientFunds,

    #[msg("Insufficient token supply for sell")]
    InsufficientSupply,

    #[msg("Reserve underflow: refund exceeds pool reserve")]
    ReserveUnderflow,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("A pool already exists at the derived address")]
    AlreadyExists,

    #[msg("No pool exists at the derived address")]
    NotFound,

    #[msg("Malformed instruction data")]
    MalformedInstruction,

    #[msg("Beneficiary account does not match pool record")]
    InvalidBeneficiary,

    #[msg("Identifier exceeds maximum length of 32 bytes")]
    IdentifierTooLong,

    #[msg("Display name exceeds maximum length of 64 bytes")]
    DisplayNameTooLong,

    #[msg("Metadata URI exceeds maximum length of 128 bytes")]
    UriTooLong,
}
