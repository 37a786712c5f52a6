//! Instruction Codec
//!
//! One typed encoder/decoder for the four lifecycle operations, shared by
//! every caller that builds or inspects instruction data (clients, tests,
//! off-chain indexers). The wire layout is the program's own: an 8-byte
//! instruction discriminator as the opcode tag, then borsh-encoded
//! arguments. Strings are a 4-byte little-endian length followed by raw
//! bytes, integers are little-endian fixed-width, and optional values are a
//! 1-byte presence flag followed by the payload only when present.
//!
//! Decoding never reads past the buffer: unknown tags, truncated bodies,
//! length prefixes running past the end, and trailing garbage all fail with
//! `MalformedInstruction`.

use anchor_lang::prelude::*;
use anchor_lang::{AnchorDeserialize, Discriminator, InstructionData};

use crate::error::PoolError;
use crate::instructions::CreatePoolArgs;

/// A decoded lifecycle instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolInstruction {
    CreateLinearPool(CreatePoolArgs),
    CreateExponentialPool(CreatePoolArgs),
    BuyTokens { amount: u64 },
    SellTokens { amount: u64 },
}

impl PoolInstruction {
    /// Serialize to the exact bytes the program dispatches on.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::CreateLinearPool(args) => {
                crate::instruction::CreateLinearPool { args: args.clone() }.data()
            }
            Self::CreateExponentialPool(args) => {
                crate::instruction::CreateExponentialPool { args: args.clone() }.data()
            }
            Self::BuyTokens { amount } => {
                crate::instruction::BuyTokens { amount: *amount }.data()
            }
            Self::SellTokens { amount } => {
                crate::instruction::SellTokens { amount: *amount }.data()
            }
        }
    }

    /// Parse instruction data back into its typed form.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return err!(PoolError::MalformedInstruction);
        }
        let (tag, body) = data.split_at(8);

        if tag == &crate::instruction::CreateLinearPool::DISCRIMINATOR[..] {
            let ix: crate::instruction::CreateLinearPool = decode_body(body)?;
            Ok(Self::CreateLinearPool(ix.args))
        } else if tag == &crate::instruction::CreateExponentialPool::DISCRIMINATOR[..] {
            let ix: crate::instruction::CreateExponentialPool = decode_body(body)?;
            Ok(Self::CreateExponentialPool(ix.args))
        } else if tag == &crate::instruction::BuyTokens::DISCRIMINATOR[..] {
            let ix: crate::instruction::BuyTokens = decode_body(body)?;
            Ok(Self::BuyTokens { amount: ix.amount })
        } else if tag == &crate::instruction::SellTokens::DISCRIMINATOR[..] {
            let ix: crate::instruction::SellTokens = decode_body(body)?;
            Ok(Self::SellTokens { amount: ix.amount })
        } else {
            err!(PoolError::MalformedInstruction)
        }
    }
}

/// Deserialize an instruction body, rejecting short reads and leftovers.
fn decode_body<T: AnchorDeserialize>(body: &[u8]) -> Result<T> {
    let mut rest = body;
    let value = T::deserialize(&mut rest).map_err(|_| error!(PoolError::MalformedInstruction))?;
    if !rest.is_empty() {
        return err!(PoolError::MalformedInstruction);
    }
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    fn assert_malformed(result: Result<PoolInstruction>) {
        let err = result.expect_err("decode should have failed");
        assert_eq!(code_of(err), 6000 + PoolError::MalformedInstruction as u32);
    }

    fn sample_args() -> CreatePoolArgs {
        CreatePoolArgs {
            identifier: "dQw4w9WgXcQ".to_string(),
            display_name: "Never Gonna Give You Up".to_string(),
            parent_identifier: "UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
            beneficiary: Pubkey::new_unique(),
            metadata_uri: "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"
                .to_string(),
            base_price: Some(10_000_000),
            curve_param: None,
        }
    }

    #[test]
    fn round_trips_every_operation() {
        let instructions = [
            PoolInstruction::CreateLinearPool(sample_args()),
            PoolInstruction::CreateExponentialPool(sample_args()),
            PoolInstruction::BuyTokens { amount: 10 },
            PoolInstruction::SellTokens { amount: u64::MAX },
        ];
        for ix in instructions {
            let bytes = ix.encode();
            let decoded = PoolInstruction::decode(&bytes).unwrap();
            assert_eq!(decoded, ix);
        }
    }

    #[test]
    fn distinct_operations_have_distinct_tags() {
        let a = PoolInstruction::CreateLinearPool(sample_args()).encode();
        let b = PoolInstruction::CreateExponentialPool(sample_args()).encode();
        let c = PoolInstruction::BuyTokens { amount: 1 }.encode();
        let d = PoolInstruction::SellTokens { amount: 1 }.encode();
        assert_ne!(a[..8], b[..8]);
        assert_ne!(c[..8], d[..8]);
        assert_ne!(a[..8], c[..8]);
    }

    #[test]
    fn optional_fields_encode_as_presence_flag() {
        let mut args = sample_args();
        args.base_price = None;
        args.curve_param = None;
        let without = PoolInstruction::CreateLinearPool(args.clone()).encode();
        args.base_price = Some(42);
        let with = PoolInstruction::CreateLinearPool(args).encode();
        // Present optional = flag byte + 8 payload bytes, absent = flag only.
        assert_eq!(with.len(), without.len() + 8);
    }

    #[test]
    fn rejects_buffers_shorter_than_a_tag() {
        assert_malformed(PoolInstruction::decode(&[]));
        assert_malformed(PoolInstruction::decode(&[1, 2, 3, 4, 5, 6, 7]));
    }

    #[test]
    fn rejects_unknown_tags() {
        assert_malformed(PoolInstruction::decode(&[0xAB; 16]));
    }

    #[test]
    fn rejects_truncated_bodies() {
        let bytes = PoolInstruction::BuyTokens { amount: 7 }.encode();
        assert_malformed(PoolInstruction::decode(&bytes[..bytes.len() - 3]));
    }

    #[test]
    fn rejects_length_prefix_past_buffer_end() {
        let mut bytes = PoolInstruction::CreateLinearPool(sample_args())
            .encode()[..8]
            .to_vec();
        // A string length prefix claiming 4 GiB with nothing behind it.
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_malformed(PoolInstruction::decode(&bytes));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut bytes = PoolInstruction::SellTokens { amount: 3 }.encode();
        bytes.push(0);
        assert_malformed(PoolInstruction::decode(&bytes));
    }
}
