//! # Trade Quotes
//!
//! The single arithmetic path for pricing a trade. Instruction handlers and
//! the read-only views both call [`quote_buy`] / [`quote_sell`], so a
//! client-side preview always matches what execution will charge, lamport
//! for lamport.
//!
//! Fee policy: a flat [`FEE_BPS`] (1%) of the gross curve cost, floored.
//! On a buy the fee is added on top of the gross (the gross funds the
//! reserve, the fee goes to the beneficiary). On a sell the fee is
//! subtracted from the gross refund (the reserve releases the gross, the
//! trader receives the net).

use anchor_lang::prelude::*;

use crate::amm::curve::{CurveKind, BPS_DENOMINATOR};
use crate::error::PoolError;

/// Per-trade fee in basis points: 100 bps = 1%.
pub const FEE_BPS: u64 = 100;

/// Cost breakdown for buying `amount` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    /// Curve integral over the purchased range; funds the reserve.
    pub gross_cost: u64,
    /// Beneficiary fee, charged on top of the gross.
    pub fee: u64,
    /// What the buyer pays: `gross_cost + fee`.
    pub total_cost: u64,
    /// Marginal price after the buy settles.
    pub post_trade_price: u64,
}

/// Refund breakdown for selling `amount` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellQuote {
    /// Curve integral over the released range; drains the reserve.
    pub gross_refund: u64,
    /// Beneficiary fee, taken out of the gross.
    pub fee: u64,
    /// What the seller receives: `gross_refund - fee`.
    pub net_refund: u64,
    /// Marginal price after the sell settles.
    pub post_trade_price: u64,
}

/// Price a buy of `amount` tokens at the given supply level.
///
/// A zero `amount` yields an all-zero quote (current price still reported)
/// and is never an error here; rejecting zero-amount trades is the
/// executor's job.
pub fn quote_buy(
    kind: CurveKind,
    supply: u64,
    amount: u64,
    base_price: u64,
    curve_param: u64,
) -> Result<BuyQuote> {
    let gross_cost = kind.integral(supply, amount, base_price, curve_param)?;
    let fee = trade_fee(gross_cost)?;
    let total_cost = gross_cost
        .checked_add(fee)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let end_supply = supply
        .checked_add(amount)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let post_trade_price = kind.price(end_supply, base_price, curve_param)?;
    Ok(BuyQuote {
        gross_cost,
        fee,
        total_cost,
        post_trade_price,
    })
}

/// Price a sell of `amount` tokens at the given supply level.
///
/// Fails with `InsufficientSupply` when `amount > supply`; the refund is
/// the integral over the descending range `[supply - amount, supply)`.
pub fn quote_sell(
    kind: CurveKind,
    supply: u64,
    amount: u64,
    base_price: u64,
    curve_param: u64,
) -> Result<SellQuote> {
    let start = supply
        .checked_sub(amount)
        .ok_or(PoolError::InsufficientSupply)?;
    let gross_refund = kind.integral(start, amount, base_price, curve_param)?;
    let fee = trade_fee(gross_refund)?;
    let net_refund = gross_refund
        .checked_sub(fee)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let post_trade_price = kind.price(start, base_price, curve_param)?;
    Ok(SellQuote {
        gross_refund,
        fee,
        net_refund,
        post_trade_price,
    })
}

/// `floor(gross * FEE_BPS / 10_000)`
fn trade_fee(gross: u64) -> Result<u64> {
    let fee = (gross as u128) * (FEE_BPS as u128) / (BPS_DENOMINATOR as u128);
    u64::try_from(fee).map_err(|_| PoolError::ArithmeticOverflow.into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::curve::{
        DEFAULT_EXPONENTIAL_BASE_PRICE, DEFAULT_EXPONENTIAL_GROWTH_BPS, DEFAULT_LINEAR_BASE_PRICE,
        DEFAULT_LINEAR_SLOPE,
    };

    fn code_of(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn buy_quote_matches_hand_computed_linear_scenario() {
        let quote = quote_buy(
            CurveKind::Linear,
            0,
            10,
            DEFAULT_LINEAR_BASE_PRICE,
            DEFAULT_LINEAR_SLOPE,
        )
        .unwrap();
        assert_eq!(quote.gross_cost, 104_500_000);
        assert_eq!(quote.fee, 1_045_000);
        assert_eq!(quote.total_cost, 105_545_000);
        assert_eq!(quote.post_trade_price, 11_000_000);
    }

    #[test]
    fn zero_amount_quotes_are_zero_valued_successes() {
        let buy = quote_buy(CurveKind::Linear, 7, 0, 10_000_000, 100_000).unwrap();
        assert_eq!(
            (buy.gross_cost, buy.fee, buy.total_cost),
            (0, 0, 0)
        );
        assert_eq!(buy.post_trade_price, 10_700_000);

        let sell = quote_sell(CurveKind::Linear, 7, 0, 10_000_000, 100_000).unwrap();
        assert_eq!(
            (sell.gross_refund, sell.fee, sell.net_refund),
            (0, 0, 0)
        );
        assert_eq!(sell.post_trade_price, 10_700_000);
    }

    #[test]
    fn sell_beyond_supply_is_insufficient_supply() {
        let err = quote_sell(CurveKind::Linear, 5, 6, 10_000_000, 100_000).unwrap_err();
        assert_eq!(code_of(err), 6000 + PoolError::InsufficientSupply as u32);
    }

    #[test]
    fn sell_after_buy_returns_no_more_than_the_buy_gross() {
        for kind in [CurveKind::Linear, CurveKind::Exponential] {
            let (base, param) = (kind.default_base_price(), kind.default_curve_param());
            for start in [0u64, 5, 90] {
                for amount in [1u64, 3, 25] {
                    let buy = quote_buy(kind, start, amount, base, param).unwrap();
                    let sell = quote_sell(kind, start + amount, amount, base, param).unwrap();
                    // Identical range, so the gross legs match exactly and
                    // the fee is what the round trip loses.
                    assert_eq!(sell.gross_refund, buy.gross_cost);
                    assert!(sell.net_refund <= buy.gross_cost);
                    assert_eq!(
                        buy.total_cost - sell.net_refund,
                        buy.fee + sell.fee,
                        "kind={kind:?} start={start} amount={amount}"
                    );
                }
            }
        }
    }

    #[test]
    fn fee_is_one_percent_floored() {
        let quote = quote_buy(CurveKind::Linear, 0, 1, 99, 0).unwrap();
        // 1% of 99 floors to 0: small trades can be fee-free.
        assert_eq!(quote.gross_cost, 99);
        assert_eq!(quote.fee, 0);
        assert_eq!(quote.total_cost, 99);

        let quote = quote_buy(CurveKind::Linear, 0, 1, 150, 0).unwrap();
        assert_eq!(quote.fee, 1);
        assert_eq!(quote.total_cost, 151);
    }

    #[test]
    fn default_pools_quote_base_price_at_zero_supply() {
        let linear = quote_buy(
            CurveKind::Linear,
            0,
            1,
            DEFAULT_LINEAR_BASE_PRICE,
            DEFAULT_LINEAR_SLOPE,
        )
        .unwrap();
        assert_eq!(linear.gross_cost, DEFAULT_LINEAR_BASE_PRICE);

        let expo = quote_buy(
            CurveKind::Exponential,
            0,
            1,
            DEFAULT_EXPONENTIAL_BASE_PRICE,
            DEFAULT_EXPONENTIAL_GROWTH_BPS,
        )
        .unwrap();
        assert_eq!(expo.gross_cost, DEFAULT_EXPONENTIAL_BASE_PRICE);
    }

    #[test]
    fn exponential_post_trade_price_follows_the_curve() {
        let quote = quote_buy(CurveKind::Exponential, 0, 20, 1_000_000, 500).unwrap();
        assert_eq!(quote.post_trade_price, 2_653_297);
    }
}
