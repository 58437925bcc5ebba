//! Batch authorization: pause gate, signer lifecycle and EIP-712 signature check.

use stylus_sdk::alloy_primitives::Address;

use crate::{
    errors::{BatchRejected, SignerError},
    types::{proposals_digest, BridgeDomain, Proposal, SignerRecovery},
};

/// The key whose signature authorizes batches.
///
/// Lifecycle: unset → set once by keygen → optionally rotated by governance. The executor only
/// reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthorizedSigner(Option<Address>);

impl AuthorizedSigner {
    /// Storage keeps the signer as an address slot where zero means unset.
    pub fn from_stored(address: Address) -> Self {
        if address == Address::ZERO {
            Self(None)
        } else {
            Self(Some(address))
        }
    }

    pub fn current(&self) -> Option<Address> {
        self.0
    }

    pub fn end_keygen(&mut self, signer: Address) -> Result<(), SignerError> {
        if self.0.is_some() {
            return Err(SignerError::AlreadySet);
        }
        if signer == Address::ZERO {
            return Err(SignerError::ZeroAddress);
        }
        self.0 = Some(signer);
        Ok(())
    }

    /// Returns the replaced signer.
    pub fn rotate(&mut self, signer: Address) -> Result<Address, SignerError> {
        let previous = self.0.ok_or(SignerError::NotSet)?;
        if signer == Address::ZERO {
            return Err(SignerError::ZeroAddress);
        }
        self.0 = Some(signer);
        Ok(previous)
    }
}

/// Snapshot of the bridge-wide state the executor consults before touching anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    pub domain: BridgeDomain,
    pub signer: AuthorizedSigner,
    pub paused: bool,
}

impl BridgeConfig {
    /// A fresh deployment: no signer, paused until keygen completes.
    pub fn new(domain: BridgeDomain) -> Self {
        Self {
            domain,
            signer: AuthorizedSigner::default(),
            paused: true,
        }
    }

    /// Completes keygen and unpauses.
    pub fn end_keygen(&mut self, signer: Address) -> Result<(), SignerError> {
        self.signer.end_keygen(signer)?;
        self.paused = false;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Refused while no signer is set.
    pub fn unpause(&mut self) -> Result<(), SignerError> {
        if self.signer.current().is_none() {
            return Err(SignerError::NotSet);
        }
        self.paused = false;
        Ok(())
    }
}

/// Check that `signature` is the authorized signer's signature over exactly `proposals`.
///
/// Order of checks: pause gate, signer presence, non-empty batch, signature.
pub fn authorize_batch<S: SignerRecovery>(
    config: &BridgeConfig,
    recovery: &S,
    proposals: &[Proposal],
    signature: &[u8],
) -> Result<(), BatchRejected> {
    if config.paused {
        return Err(BatchRejected::Paused);
    }
    let expected = config.signer.current().ok_or(BatchRejected::SignerNotSet)?;
    if proposals.is_empty() {
        return Err(BatchRejected::EmptyBatch);
    }

    let digest = proposals_digest(&config.domain, proposals);
    let recovered = recovery.recover(digest, signature)?;
    if recovered != expected {
        return Err(BatchRejected::SignerMismatch { recovered });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use bridge_proposal_signer::{sign_batch, signer_address, LocalRecovery};
    use k256::ecdsa::SigningKey;
    use stylus_sdk::alloy_primitives::FixedBytes;

    use super::*;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_bytes(&[byte; 32].into()).unwrap()
    }

    fn live_config(signer: &SigningKey) -> BridgeConfig {
        let mut config = BridgeConfig::new(BridgeDomain::new(421614, Address::repeat_byte(0x42)));
        config.end_keygen(signer_address(signer)).unwrap();
        config
    }

    fn batch() -> vec::Vec<Proposal> {
        vec![
            Proposal::new(1, 1, FixedBytes::repeat_byte(0x11), vec![0x01]),
            Proposal::new(1, 2, FixedBytes::repeat_byte(0x22), vec![0x02]),
        ]
    }

    #[test]
    fn keygen_is_one_shot() {
        let mut signer = AuthorizedSigner::default();
        assert_eq!(signer.current(), None);
        assert_eq!(
            signer.end_keygen(Address::ZERO),
            Err(SignerError::ZeroAddress)
        );
        signer.end_keygen(Address::repeat_byte(1)).unwrap();
        assert_eq!(
            signer.end_keygen(Address::repeat_byte(2)),
            Err(SignerError::AlreadySet)
        );
        assert_eq!(signer.current(), Some(Address::repeat_byte(1)));
    }

    #[test]
    fn rotation_requires_a_signer() {
        let mut signer = AuthorizedSigner::default();
        assert_eq!(
            signer.rotate(Address::repeat_byte(2)),
            Err(SignerError::NotSet)
        );
        signer.end_keygen(Address::repeat_byte(1)).unwrap();
        assert_eq!(
            signer.rotate(Address::repeat_byte(2)),
            Ok(Address::repeat_byte(1))
        );
        assert_eq!(signer.current(), Some(Address::repeat_byte(2)));
    }

    #[test]
    fn stored_zero_is_unset() {
        assert_eq!(AuthorizedSigner::from_stored(Address::ZERO).current(), None);
        assert_eq!(
            AuthorizedSigner::from_stored(Address::repeat_byte(9)).current(),
            Some(Address::repeat_byte(9))
        );
    }

    #[test]
    fn accepts_authorized_signature() {
        let mpc = key(7);
        let config = live_config(&mpc);
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &mpc).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature),
            Ok(())
        );
    }

    #[test]
    fn fresh_deployment_is_paused() {
        let mpc = key(7);
        let config = BridgeConfig::new(BridgeDomain::new(1, Address::repeat_byte(0x42)));
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &mpc).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature),
            Err(BatchRejected::Paused)
        );
    }

    #[test]
    fn keygen_unpauses_and_cannot_repeat() {
        let mut config = BridgeConfig::new(BridgeDomain::new(1, Address::repeat_byte(0x42)));
        assert!(config.paused);

        config.end_keygen(Address::repeat_byte(0x0a)).unwrap();
        assert!(!config.paused);
        assert_eq!(config.signer.current(), Some(Address::repeat_byte(0x0a)));

        config.pause();
        assert_eq!(
            config.end_keygen(Address::repeat_byte(0x0b)),
            Err(SignerError::AlreadySet)
        );
        // a refused keygen leaves the pause as it was
        assert!(config.paused);
        assert_eq!(config.signer.current(), Some(Address::repeat_byte(0x0a)));
    }

    #[test]
    fn unpause_requires_a_signer() {
        let mut config = BridgeConfig::new(BridgeDomain::new(1, Address::repeat_byte(0x42)));
        assert_eq!(config.unpause(), Err(SignerError::NotSet));
        assert!(config.paused);

        config.signer = AuthorizedSigner::from_stored(Address::repeat_byte(0x0a));
        assert_eq!(config.unpause(), Ok(()));
        assert!(!config.paused);

        config.pause();
        assert!(config.paused);
    }

    #[test]
    fn unpaused_without_signer_is_rejected() {
        let mpc = key(7);
        let mut config = BridgeConfig::new(BridgeDomain::new(1, Address::repeat_byte(0x42)));
        config.paused = false;
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &mpc).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature),
            Err(BatchRejected::SignerNotSet)
        );
    }

    #[test]
    fn empty_batch_is_rejected() {
        let mpc = key(7);
        let config = live_config(&mpc);
        let signature = sign_batch(&config.domain, &[], &mpc).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &[], &signature),
            Err(BatchRejected::EmptyBatch)
        );
    }

    #[test]
    fn wrong_signer_is_rejected() {
        let mpc = key(7);
        let intruder = key(8);
        let config = live_config(&mpc);
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &intruder).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature),
            Err(BatchRejected::SignerMismatch {
                recovered: signer_address(&intruder)
            })
        );
    }

    #[test]
    fn subset_and_reordering_are_rejected() {
        let mpc = key(7);
        let config = live_config(&mpc);
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &mpc).unwrap();

        let mut reordered = proposals.clone();
        reordered.swap(0, 1);
        assert!(matches!(
            authorize_batch(&config, &LocalRecovery, &reordered, &signature),
            Err(BatchRejected::SignerMismatch { .. })
        ));
        assert!(matches!(
            authorize_batch(&config, &LocalRecovery, &proposals[..1], &signature),
            Err(BatchRejected::SignerMismatch { .. })
        ));
    }

    #[test]
    fn other_deployment_signature_is_rejected() {
        let mpc = key(7);
        let config = live_config(&mpc);
        let proposals = batch();
        let elsewhere = BridgeDomain::new(config.domain.chain_id, Address::repeat_byte(0x43));
        let signature = sign_batch(&elsewhere, &proposals, &mpc).unwrap();

        assert!(matches!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature),
            Err(BatchRejected::SignerMismatch { .. })
        ));
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let mpc = key(7);
        let config = live_config(&mpc);
        let proposals = batch();
        let signature = sign_batch(&config.domain, &proposals, &mpc).unwrap();

        assert_eq!(
            authorize_batch(&config, &LocalRecovery, &proposals, &signature[..64]),
            Err(BatchRejected::InvalidSignature(
                crate::errors::RecoveryError::InvalidLength(64)
            ))
        );
    }
}
