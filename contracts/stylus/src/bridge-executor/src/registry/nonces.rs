//! Executed-deposit tracking as one dense bitmap per origin domain.
//!
//! Nonce `n` lives in word `n / 256`, bit `n % 256`. Words only ever gain bits: the sole writer is
//! [`NonceRegistry::mark_executed`], which ORs a single bit into the stored word.

use alloc::collections::BTreeMap;

use stylus_sdk::alloy_primitives::U256;

use crate::types::{DepositNonce, DomainId};

pub const NONCE_WORD_BITS: u64 = 256;

/// Word index and single-bit mask of a nonce within its domain's bitmap.
pub fn nonce_slot(nonce: DepositNonce) -> (U256, U256) {
    let word_index = U256::from(nonce / NONCE_WORD_BITS);
    let mask = U256::from(1u64) << ((nonce % NONCE_WORD_BITS) as usize);
    (word_index, mask)
}

/// Per-domain nonce bitmap, backed by contract storage on-chain and by a map off-chain.
pub trait NonceRegistry {
    /// Raw 256-bit word `word_index` of `domain`'s bitmap (zero if never written).
    fn nonce_word(&self, domain: DomainId, word_index: U256) -> U256;

    fn store_nonce_word(&mut self, domain: DomainId, word_index: U256, word: U256);

    fn is_executed(&self, domain: DomainId, nonce: DepositNonce) -> bool {
        let (word_index, mask) = nonce_slot(nonce);
        self.nonce_word(domain, word_index) & mask != U256::ZERO
    }

    /// Caller must have checked `!is_executed(domain, nonce)`.
    fn mark_executed(&mut self, domain: DomainId, nonce: DepositNonce) {
        let (word_index, mask) = nonce_slot(nonce);
        let word = self.nonce_word(domain, word_index);
        self.store_nonce_word(domain, word_index, word | mask);
    }
}

/// In-memory bitmap used by off-chain simulation and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NonceBitmap {
    words: BTreeMap<(DomainId, U256), U256>,
}

impl NonceBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-zero words held across all domains.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl NonceRegistry for NonceBitmap {
    fn nonce_word(&self, domain: DomainId, word_index: U256) -> U256 {
        self.words
            .get(&(domain, word_index))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn store_nonce_word(&mut self, domain: DomainId, word_index: U256, word: U256) {
        self.words.insert((domain, word_index), word);
    }
}
