//! Read-Only Queries
//!
//! Price previews over an existing pool. These handlers call the same quote
//! functions the trade executor uses, so a preview is always exactly what a
//! trade of the same size would charge or pay out.

use anchor_lang::prelude::*;

use crate::amm::quote::{quote_buy, quote_sell};
use crate::state::Pool;

/// Accounts for read-only pool queries
#[derive(Accounts)]
pub struct ViewPool<'info> {
    #[account(
        seeds = [pool.namespace(), pool.identifier.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> ViewPool<'info> {
    /// Marginal price of the next token.
    pub fn get_current_price(&self) -> Result<u64> {
        self.pool.current_price()
    }

    /// Total lamports a buy of `amount` would charge (gross plus fee).
    pub fn get_buy_cost(&self, amount: u64) -> Result<u64> {
        let quote = quote_buy(
            self.pool.kind,
            self.pool.supply,
            amount,
            self.pool.base_price,
            self.pool.curve_param,
        )?;
        Ok(quote.total_cost)
    }

    /// Net lamports a sell of `amount` would pay out (gross minus fee).
    pub fn get_sell_refund(&self, amount: u64) -> Result<u64> {
        let quote = quote_sell(
            self.pool.kind,
            self.pool.supply,
            amount,
            self.pool.base_price,
            self.pool.curve_param,
        )?;
        Ok(quote.net_refund)
    }
}
