use alloc::vec::Vec;

use alloy_primitives::FixedBytes;

/// Small integer identifying one participating chain.
pub type DomainId = u8;

/// Per-origin-domain deposit sequence number.
pub type DepositNonce = u64;

/// Opaque key pairing an asset with the handler that applies it.
pub type ResourceId = FixedBytes<32>;

/// Largest batch accepted in the packed encoding.
pub const MAX_PACKED_PROPOSALS: usize = 256;

/// Fixed prefix of one packed proposal: `u8 origin || u64 nonce || bytes32 resource || u32 len`.
pub const PACKED_HEADER_LEN: usize = 1 + 8 + 32 + 4;

/// A cross-domain instruction to apply a deposit's effect on this domain.
///
/// `data` is handler-specific and never interpreted by the executor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Proposal {
    pub origin_domain_id: DomainId,
    pub deposit_nonce: DepositNonce,
    pub resource_id: ResourceId,
    pub data: Vec<u8>,
}

impl Proposal {
    pub fn new(
        origin_domain_id: DomainId,
        deposit_nonce: DepositNonce,
        resource_id: ResourceId,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            origin_domain_id,
            deposit_nonce,
            resource_id,
            data: data.into(),
        }
    }

    /// The (origin domain, nonce) pair that identifies this deposit for replay protection.
    pub fn deposit_key(&self) -> (DomainId, DepositNonce) {
        (self.origin_domain_id, self.deposit_nonce)
    }
}
