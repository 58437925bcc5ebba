use alloy_primitives::{Address, B256};
use bridge_proposal_types::{recovery::split_signature, RecoveryError, SignerRecovery};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Software `ecrecover`, equivalent to the precompile the contract calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalRecovery;

impl SignerRecovery for LocalRecovery {
    fn recover(&self, digest: B256, signature: &[u8]) -> Result<Address, RecoveryError> {
        let sig = split_signature(signature)?;

        let rs = Signature::from_scalars(sig.r, sig.s).map_err(|_| RecoveryError::Unrecoverable)?;
        let recid = RecoveryId::from_byte(sig.recovery_id())
            .ok_or(RecoveryError::InvalidRecoveryId(sig.v))?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &rs, recid)
            .map_err(|_| RecoveryError::Unrecoverable)?;
        Ok(address_of(&key))
    }
}

/// Ethereum address of a public key: low 20 bytes of keccak256 over the uncompressed point.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..32])
}
