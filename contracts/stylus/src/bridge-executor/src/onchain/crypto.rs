//! Signer recovery through the EVM `ecrecover` precompile.

use stylus_sdk::{
    alloy_primitives::{Address, B256},
    call::RawCall,
};

use crate::{
    errors::RecoveryError,
    types::{split_signature, SignerRecovery},
};

/// Precompile address 0x01.
const ECRECOVER: Address = Address::with_last_byte(1);

const ECRECOVER_GAS: u64 = 50_000;

/// Recovers batch signers with the `ecrecover` precompile.
///
/// The signature is validated first (length, `v`, low `s`), so only one recovery id is tried.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrecompileRecovery;

impl SignerRecovery for PrecompileRecovery {
    fn recover(&self, digest: B256, signature: &[u8]) -> Result<Address, RecoveryError> {
        let sig = split_signature(signature)?;

        let mut input = [0u8; 128];
        input[0..32].copy_from_slice(digest.as_slice());
        // v as 32-byte big-endian word.
        input[63] = sig.v;
        input[64..96].copy_from_slice(&sig.r);
        input[96..128].copy_from_slice(&sig.s);

        let out = unsafe { RawCall::new_static().gas(ECRECOVER_GAS).call(ECRECOVER, &input) }
            .map_err(|_| RecoveryError::Unrecoverable)?;
        if out.len() < 32 {
            return Err(RecoveryError::Unrecoverable);
        }
        // precompile returns 32-byte word with address in the low 20 bytes.
        let recovered = Address::from_slice(&out[12..32]);
        if recovered == Address::ZERO {
            return Err(RecoveryError::Unrecoverable);
        }
        Ok(recovered)
    }
}
