//! Contract-storage backing for the nonce bitmap and the resource table.

use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256, U8},
    prelude::*,
};

use crate::{
    errors::RegistryError,
    registry::{GenericCallMetadata, NonceRegistry, ResourceEntry, ResourceRegistry},
    types::{DomainId, ResourceId},
};

sol_storage! {
    /// `usedNonces[domain][nonce / 256]`, bit `nonce % 256`.
    pub struct NonceStore {
        mapping(uint8 => mapping(uint256 => uint256)) used_nonces;
    }

    /// Resource routing, one slot set per resource id. A zero handler means unregistered.
    pub struct ResourceStore {
        mapping(bytes32 => address) handler_of;
        mapping(bytes32 => address) target_of;
        mapping(bytes32 => bool) is_generic;
        mapping(bytes32 => bytes4) deposit_function_sig;
        mapping(bytes32 => uint256) depositor_offset;
        mapping(bytes32 => bytes4) execute_function_sig;
    }
}

impl NonceRegistry for NonceStore {
    fn nonce_word(&self, domain: DomainId, word_index: U256) -> U256 {
        self.used_nonces.getter(U8::from(domain)).get(word_index)
    }

    fn store_nonce_word(&mut self, domain: DomainId, word_index: U256, word: U256) {
        self.used_nonces
            .setter(U8::from(domain))
            .insert(word_index, word);
    }
}

impl ResourceRegistry for ResourceStore {
    fn resolve(&self, resource_id: ResourceId) -> Result<ResourceEntry, RegistryError> {
        let handler = self.handler_of.get(resource_id);
        if handler == Address::ZERO {
            return Err(RegistryError::UnknownResource(resource_id));
        }

        let generic = if self.is_generic.get(resource_id) {
            Some(GenericCallMetadata {
                deposit_function_sig: self.deposit_function_sig.get(resource_id),
                depositor_offset: self.depositor_offset.get(resource_id),
                execute_function_sig: self.execute_function_sig.get(resource_id),
            })
        } else {
            None
        };

        Ok(ResourceEntry {
            resource_id,
            handler,
            target: self.target_of.get(resource_id),
            generic,
        })
    }

    fn register(&mut self, entry: ResourceEntry) {
        let id = entry.resource_id;
        self.handler_of.insert(id, entry.handler);
        self.target_of.insert(id, entry.target);

        // Overwrite, never merge: a plain registration clears earlier generic metadata.
        let metadata = entry.generic.unwrap_or(GenericCallMetadata {
            deposit_function_sig: FixedBytes::ZERO,
            depositor_offset: U256::ZERO,
            execute_function_sig: FixedBytes::ZERO,
        });
        self.is_generic.insert(id, entry.generic.is_some());
        self.deposit_function_sig
            .insert(id, metadata.deposit_function_sig);
        self.depositor_offset.insert(id, metadata.depositor_offset);
        self.execute_function_sig
            .insert(id, metadata.execute_function_sig);
    }
}
