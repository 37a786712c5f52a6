//! Pool Creation
//!
//! One instruction per curve namespace. The pool account is a PDA seeded by
//! the namespace tag and the content identifier, so creation is naturally
//! idempotent-checked: a second creation for the same pair lands on the same
//! address and fails the `init` constraint instead of overwriting state.

use anchor_lang::prelude::*;

use crate::amm::curve::CurveKind;
use crate::error::PoolError;
use crate::state::Pool;

/// Event emitted when a new pool is created
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub kind: CurveKind,
    pub identifier: String,
    pub parent_identifier: String,
    pub beneficiary: Pubkey,
    pub controller: Pubkey,
    pub base_price: u64,
    pub curve_param: u64,
}

/// Creation parameters shared by both namespaces.
///
/// `base_price` and `curve_param` fall back to the curve-kind defaults when
/// unset; the creating signer is recorded as the pool's controller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreatePoolArgs {
    pub identifier: String,
    pub display_name: String,
    pub parent_identifier: String,
    pub beneficiary: Pubkey,
    pub metadata_uri: String,
    pub base_price: Option<u64>,
    pub curve_param: Option<u64>,
}

/// Accounts for creating a linear pool
#[derive(Accounts)]
#[instruction(args: CreatePoolArgs)]
pub struct CreateLinearPool<'info> {
    /// Pool creator; pays rent and becomes the controller
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The new pool account
    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::LINEAR_SEED, args.identifier.as_bytes()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> CreateLinearPool<'info> {
    pub fn create_linear_pool(&mut self, args: CreatePoolArgs, bump: u8) -> Result<()> {
        init_pool(
            &mut self.pool,
            CurveKind::Linear,
            args,
            self.creator.key(),
            bump,
        )
    }
}

/// Accounts for creating an exponential pool
#[derive(Accounts)]
#[instruction(args: CreatePoolArgs)]
pub struct CreateExponentialPool<'info> {
    /// Pool creator; pays rent and becomes the controller
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The new pool account
    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::EXPONENTIAL_SEED, args.identifier.as_bytes()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> CreateExponentialPool<'info> {
    pub fn create_exponential_pool(&mut self, args: CreatePoolArgs, bump: u8) -> Result<()> {
        init_pool(
            &mut self.pool,
            CurveKind::Exponential,
            args,
            self.creator.key(),
            bump,
        )
    }
}

fn init_pool(
    pool: &mut Account<'_, Pool>,
    kind: CurveKind,
    args: CreatePoolArgs,
    controller: Pubkey,
    bump: u8,
) -> Result<()> {
    require!(
        args.identifier.len() <= Pool::MAX_IDENTIFIER_LEN,
        PoolError::IdentifierTooLong
    );
    require!(
        args.parent_identifier.len() <= Pool::MAX_IDENTIFIER_LEN,
        PoolError::IdentifierTooLong
    );
    require!(
        args.display_name.len() <= Pool::MAX_DISPLAY_NAME_LEN,
        PoolError::DisplayNameTooLong
    );
    require!(
        args.metadata_uri.len() <= Pool::MAX_METADATA_URI_LEN,
        PoolError::UriTooLong
    );

    let base_price = args.base_price.unwrap_or_else(|| kind.default_base_price());
    let curve_param = args
        .curve_param
        .unwrap_or_else(|| kind.default_curve_param());
    let clock = Clock::get()?;

    pool.set_inner(Pool {
        kind,
        identifier: args.identifier.clone(),
        display_name: args.display_name,
        parent_identifier: args.parent_identifier.clone(),
        beneficiary: args.beneficiary,
        controller,
        supply: 0,
        reserve: 0,
        base_price,
        curve_param,
        metadata_uri: args.metadata_uri,
        created_at: clock.unix_timestamp,
        active: true,
        bump,
    });

    msg!("Pool created: {}", args.identifier);
    msg!("Base price: {} lamports", base_price);

    emit!(PoolCreated {
        pool: pool.key(),
        kind,
        identifier: args.identifier,
        parent_identifier: args.parent_identifier,
        beneficiary: args.beneficiary,
        controller,
        base_price,
        curve_param,
    });

    Ok(())
}
