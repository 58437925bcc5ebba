//! Packed proposal batch decoding.
//!
//! Layout, repeated until the input is exhausted (big-endian integers):
//! - u8 origin domain id
//! - u64 deposit nonce
//! - bytes32 resource id
//! - u32 data length
//! - bytes data
//!
//! The data body is passed through unopened.

use alloc::vec::Vec;

use crate::{
    errors::DecodeError,
    types::Proposal,
    utils::bytes::{read_b32, read_u32_be, read_u64_be, read_u8, read_vec},
};

pub use crate::types::{MAX_PACKED_PROPOSALS, PACKED_HEADER_LEN};

/// Decode a packed batch into proposals.
pub fn decode_proposals(bytes: &[u8]) -> Result<Vec<Proposal>, DecodeError> {
    decode_proposals_with_limit(bytes, MAX_PACKED_PROPOSALS)
}

pub fn decode_proposals_with_limit(
    bytes: &[u8],
    max_proposals: usize,
) -> Result<Vec<Proposal>, DecodeError> {
    let mut proposals = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if proposals.len() >= max_proposals {
            return Err(DecodeError::TooManyProposals);
        }
        let origin_domain_id = read_u8(bytes, &mut i)?;
        let deposit_nonce = read_u64_be(bytes, &mut i)?;
        let resource_id = read_b32(bytes, &mut i)?;
        let len = read_u32_be(bytes, &mut i)? as usize;
        let data = read_vec(bytes, &mut i, len)?;

        proposals.push(Proposal {
            origin_domain_id,
            deposit_nonce,
            resource_id,
            data,
        });
    }

    Ok(proposals)
}
