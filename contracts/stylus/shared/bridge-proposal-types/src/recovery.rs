use alloy_primitives::{Address, B256, U256};

/// Half the secp256k1 group order. Signatures with `s` above this are malleable duplicates.
pub const SECP256K1N_HALF: U256 = U256::from_limbs([
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
]);

/// Errors during signer recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryError {
    /// Signature is not 65 bytes (r || s || v).
    InvalidLength(usize),
    /// `v` is not one of {0, 1, 27, 28}.
    InvalidRecoveryId(u8),
    /// `s` lies in the upper half of the curve order.
    MalleableSignature,
    /// The curve operation produced no address.
    Unrecoverable,
}

/// A 65-byte signature split into its components, with `v` normalised to {27, 28}.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
}

impl SplitSignature {
    /// Recovery id in {0, 1}.
    pub fn recovery_id(&self) -> u8 {
        self.v - 27
    }
}

/// Validate and split an `r || s || v` signature.
pub fn split_signature(signature: &[u8]) -> Result<SplitSignature, RecoveryError> {
    if signature.len() != 65 {
        return Err(RecoveryError::InvalidLength(signature.len()));
    }
    let v = match signature[64] {
        v @ (27 | 28) => v,
        v @ (0 | 1) => v + 27,
        other => return Err(RecoveryError::InvalidRecoveryId(other)),
    };

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature[0..32]);
    s.copy_from_slice(&signature[32..64]);
    if U256::from_be_bytes(s) > SECP256K1N_HALF {
        return Err(RecoveryError::MalleableSignature);
    }

    Ok(SplitSignature { r, s, v })
}

/// Recovers the address that signed a digest, implemented differently on-chain vs off-chain.
pub trait SignerRecovery {
    fn recover(&self, digest: B256, signature: &[u8]) -> Result<Address, RecoveryError>;
}
