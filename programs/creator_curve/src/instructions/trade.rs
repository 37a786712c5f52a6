//! Token Trading
//!
//! Buy and sell against a pool's bonding curve. The quote layer computes
//! every lamport figure before anything moves; the handlers only settle:
//! buys fund the reserve with system transfers from the trader, sells pay
//! out of the program-owned pool account by direct lamport moves. A failed
//! check aborts the transaction before any transfer or state write, so the
//! pool account is byte-for-byte unchanged on error.

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::amm::quote::{quote_buy, quote_sell};
use crate::error::PoolError;
use crate::state::Pool;

/// Event emitted when tokens are bought
#[event]
pub struct TokensPurchased {
    pub pool: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub gross_cost: u64,
    pub fee: u64,
    pub total_cost: u64,
    pub post_trade_price: u64,
    pub new_supply: u64,
}

/// Event emitted when tokens are sold
#[event]
pub struct TokensSold {
    pub pool: Pubkey,
    pub seller: Pubkey,
    pub amount: u64,
    pub gross_refund: u64,
    pub fee: u64,
    pub net_refund: u64,
    pub post_trade_price: u64,
    pub new_supply: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Pool being traded against
    #[account(
        mut,
        seeds = [pool.namespace(), pool.identifier.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Fee destination, validated against the pool record
    #[account(
        mut,
        constraint = beneficiary.key() == pool.beneficiary @ PoolError::InvalidBeneficiary,
    )]
    pub beneficiary: AccountInfo<'info>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy `amount` tokens from the curve.
    ///
    /// Returns the total lamports charged (gross cost plus fee).
    pub fn buy_tokens(&mut self, amount: u64) -> Result<u64> {
        require!(self.pool.active, PoolError::InactivePool);
        require!(amount > 0, PoolError::InvalidAmount);

        let quote = quote_buy(
            self.pool.kind,
            self.pool.supply,
            amount,
            self.pool.base_price,
            self.pool.curve_param,
        )?;
        require!(
            self.trader.to_account_info().lamports() >= quote.total_cost,
            PoolError::InsufficientFunds
        );

        // Gross funds the reserve held by the pool account itself
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.trader.to_account_info(),
                    to: self.pool.to_account_info(),
                },
            ),
            quote.gross_cost,
        )?;

        // Fee goes straight to the beneficiary, never through the reserve
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.trader.to_account_info(),
                    to: self.beneficiary.to_account_info(),
                },
            ),
            quote.fee,
        )?;

        self.pool.apply_buy(amount, quote.gross_cost)?;

        emit!(TokensPurchased {
            pool: self.pool.key(),
            buyer: self.trader.key(),
            amount,
            gross_cost: quote.gross_cost,
            fee: quote.fee,
            total_cost: quote.total_cost,
            post_trade_price: quote.post_trade_price,
            new_supply: self.pool.supply,
        });

        Ok(quote.total_cost)
    }

    /// Sell `amount` tokens back to the curve.
    ///
    /// Returns the net lamports paid out (gross refund minus fee).
    pub fn sell_tokens(&mut self, amount: u64) -> Result<u64> {
        require!(self.pool.active, PoolError::InactivePool);
        require!(amount > 0, PoolError::InvalidAmount);

        let quote = quote_sell(
            self.pool.kind,
            self.pool.supply,
            amount,
            self.pool.base_price,
            self.pool.curve_param,
        )?;
        require!(
            quote.gross_refund <= self.pool.reserve,
            PoolError::ReserveUnderflow
        );

        // The pool is a PDA owned by this program, so the payout is a
        // direct lamport move: net to the seller, fee to the beneficiary,
        // gross off the reserve in total.
        **self.pool.to_account_info().try_borrow_mut_lamports()? -= quote.net_refund;
        **self.trader.to_account_info().try_borrow_mut_lamports()? += quote.net_refund;

        **self.pool.to_account_info().try_borrow_mut_lamports()? -= quote.fee;
        **self.beneficiary.try_borrow_mut_lamports()? += quote.fee;

        self.pool.apply_sell(amount, quote.gross_refund)?;

        emit!(TokensSold {
            pool: self.pool.key(),
            seller: self.trader.key(),
            amount,
            gross_refund: quote.gross_refund,
            fee: quote.fee,
            net_refund: quote.net_refund,
            post_trade_price: quote.post_trade_price,
            new_supply: self.pool.supply,
        });

        Ok(quote.net_refund)
    }
}
