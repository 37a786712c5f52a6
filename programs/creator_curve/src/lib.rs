//! # Creator Curve: Bonding-Curve Pools for Content Tokens
//!
//! A token pool per content identifier (a channel or a video), priced by a
//! bonding curve and backed by a lamport reserve held on the pool account.
//!
//! ## Overview
//!
//! Each pool owns two numbers, the outstanding `supply` and the `reserve`
//! backing it, plus a curve fixed at creation:
//!
//! ```text
//! Linear:       price(n) = base_price + n * slope
//! Exponential:  price(n) = base_price * (1 + growth_bps / 10_000)^n
//! ```
//!
//! Buying `amount` tokens costs the sum of marginal prices over the range
//! being issued plus a 1% fee routed to the pool's beneficiary; selling
//! refunds the sum over the range being retired minus the same fee. All of
//! it is integer arithmetic, so an off-chain preview computes the exact
//! lamport figures the program will settle.
//!
//! Pool addresses are derived, not registered: a PDA of the curve
//! namespace and the content identifier. Creating the same pool twice
//! therefore fails on the address itself.

use anchor_lang::prelude::*;

pub mod amm;
pub mod codec;
pub mod error;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;

declare_id!("6CjCR8opDsrFKasc2wsmUWs6nqDWAZnbi5VQZfcsixLX");

/// Main Creator Curve program
#[program]
pub mod creator_curve {
    use super::*;

    /// Create a linear-curve pool for a content identifier
    pub fn create_linear_pool(
        ctx: Context<CreateLinearPool>,
        args: CreatePoolArgs,
    ) -> Result<()> {
        ctx.accounts.create_linear_pool(args, ctx.bumps.pool)
    }

    /// Create an exponential-curve pool for a content identifier
    pub fn create_exponential_pool(
        ctx: Context<CreateExponentialPool>,
        args: CreatePoolArgs,
    ) -> Result<()> {
        ctx.accounts.create_exponential_pool(args, ctx.bumps.pool)
    }

    /// Buy tokens from the bonding curve; returns the total lamports charged
    pub fn buy_tokens(ctx: Context<Trade>, amount: u64) -> Result<u64> {
        ctx.accounts.buy_tokens(amount)
    }

    /// Sell tokens back to the bonding curve; returns the net lamports paid
    pub fn sell_tokens(ctx: Context<Trade>, amount: u64) -> Result<u64> {
        ctx.accounts.sell_tokens(amount)
    }

    /// Current marginal price (read-only)
    pub fn get_current_price(ctx: Context<ViewPool>) -> Result<u64> {
        ctx.accounts.get_current_price()
    }

    /// Total cost a buy of `amount` would charge (read-only)
    pub fn get_buy_cost(ctx: Context<ViewPool>, amount: u64) -> Result<u64> {
        ctx.accounts.get_buy_cost(amount)
    }

    /// Net refund a sell of `amount` would pay out (read-only)
    pub fn get_sell_refund(ctx: Context<ViewPool>, amount: u64) -> Result<u64> {
        ctx.accounts.get_sell_refund(amount)
    }
}
