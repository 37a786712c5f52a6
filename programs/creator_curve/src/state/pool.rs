//! Pool State
//!
//! One pool per content identifier per curve namespace. The pool account is
//! a PDA derived from the namespace seed and the identifier, holds the
//! reserve lamports itself, and carries the curve parameters that price
//! every trade against it.

use anchor_lang::prelude::*;

use crate::amm::curve::CurveKind;
use crate::error::PoolError;

/// Bonding-curve pool for one content identifier.
///
/// Seeds: `[namespace_seed(kind), identifier.as_bytes()]`
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// Curve shape; also selects the derivation namespace.
    pub kind: CurveKind,

    /// External content key (a channel id or a video id).
    /// Doubles as the PDA seed, hence the 32-byte cap.
    #[max_len(32)]
    pub identifier: String,

    /// Human-readable label, set at creation.
    #[max_len(64)]
    pub display_name: String,

    /// Identifier of the owning channel for content-level pools;
    /// empty for top-level pools.
    #[max_len(32)]
    pub parent_identifier: String,

    /// Receives the per-trade fee.
    pub beneficiary: Pubkey,

    /// The signer that created the pool. Informational only.
    pub controller: Pubkey,

    /// Outstanding tokens.
    pub supply: u64,

    /// Lamports backing `supply`: the curve integral from 0 to `supply`,
    /// net of integer rounding, never net of fees.
    pub reserve: u64,

    /// Curve parameter P0 in lamports.
    pub base_price: u64,

    /// Slope in lamports (Linear) or growth in basis points (Exponential).
    pub curve_param: u64,

    /// Opaque pointer to off-chain descriptive content.
    #[max_len(128)]
    pub metadata_uri: String,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Trades fail fast when false. Reserved pause capability; always
    /// written `true` at creation.
    pub active: bool,

    /// PDA bump seed.
    pub bump: u8,
}

impl Pool {
    /// Namespace seed for linear pools.
    pub const LINEAR_SEED: &'static [u8] = b"linear_pool";
    /// Namespace seed for exponential pools.
    pub const EXPONENTIAL_SEED: &'static [u8] = b"expo_pool";

    pub const MAX_IDENTIFIER_LEN: usize = 32;
    pub const MAX_DISPLAY_NAME_LEN: usize = 64;
    pub const MAX_METADATA_URI_LEN: usize = 128;

    /// Derivation namespace for a curve kind.
    pub fn namespace_seed(kind: CurveKind) -> &'static [u8] {
        match kind {
            CurveKind::Linear => Self::LINEAR_SEED,
            CurveKind::Exponential => Self::EXPONENTIAL_SEED,
        }
    }

    /// This pool's own namespace seed, for re-deriving its address.
    pub fn namespace(&self) -> &'static [u8] {
        Self::namespace_seed(self.kind)
    }

    /// Derive the unique address (and bump) for `(kind, identifier)`.
    ///
    /// Pure function of its inputs: the same pair always maps to the same
    /// address, and distinct identifiers collide only with the negligible
    /// probability of a SHA-256 collision.
    pub fn find_address(kind: CurveKind, identifier: &str) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::namespace_seed(kind), identifier.as_bytes()],
            &crate::ID,
        )
    }

    /// Settle a buy: `gross` enters the reserve, `amount` tokens are
    /// issued. Both additions are checked and the struct is untouched on
    /// failure.
    pub fn apply_buy(&mut self, amount: u64, gross: u64) -> Result<()> {
        let reserve = self
            .reserve
            .checked_add(gross)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let supply = self
            .supply
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;
        self.reserve = reserve;
        self.supply = supply;
        Ok(())
    }

    /// Settle a sell: `gross` leaves the reserve, `amount` tokens are
    /// retired. Fails `InsufficientSupply` / `ReserveUnderflow` without
    /// touching the struct.
    pub fn apply_sell(&mut self, amount: u64, gross: u64) -> Result<()> {
        let supply = self
            .supply
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientSupply)?;
        let reserve = self
            .reserve
            .checked_sub(gross)
            .ok_or(PoolError::ReserveUnderflow)?;
        self.reserve = reserve;
        self.supply = supply;
        Ok(())
    }

    /// Marginal price at the current supply level.
    pub fn current_price(&self) -> Result<u64> {
        self.kind.price(self.supply, self.base_price, self.curve_param)
    }
}

// ============================================================================
// TESTS
// ============================================================================
