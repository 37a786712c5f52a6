//! # Bonding Curve Engine
//!
//! Pure pricing math for the pool engine: curve shapes and their integrals
//! ([`curve`]) and the fee-inclusive trade quotes built on top of them
//! ([`quote`]). Nothing in this module touches accounts or performs
//! transfers, so the whole arithmetic surface is testable in isolation and
//! reusable verbatim by off-chain price previews.

pub mod curve;
pub mod quote;

pub use curve::*;
pub use quote::*;
