//! Resource ID → handler routing table.

use alloc::collections::BTreeMap;

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{errors::RegistryError, types::ResourceId};

/// Call metadata for resources served by the generic-call handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenericCallMetadata {
    pub deposit_function_sig: FixedBytes<4>,
    /// Byte offset of the depositor address inside the deposit calldata.
    pub depositor_offset: U256,
    pub execute_function_sig: FixedBytes<4>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    pub resource_id: ResourceId,
    pub handler: Address,
    /// Asset (or call target) contract the handler acts on.
    pub target: Address,
    pub generic: Option<GenericCallMetadata>,
}

impl ResourceEntry {
    pub fn new(resource_id: ResourceId, handler: Address, target: Address) -> Self {
        Self {
            resource_id,
            handler,
            target,
            generic: None,
        }
    }

    pub fn generic(
        resource_id: ResourceId,
        handler: Address,
        target: Address,
        metadata: GenericCallMetadata,
    ) -> Self {
        Self {
            resource_id,
            handler,
            target,
            generic: Some(metadata),
        }
    }
}

/// Resource registry. Writes are admin-only; the executor only resolves.
pub trait ResourceRegistry {
    fn resolve(&self, resource_id: ResourceId) -> Result<ResourceEntry, RegistryError>;

    /// Overwrites any previous entry for the same resource ID.
    fn register(&mut self, entry: ResourceEntry);
}

/// `(handler, target, isGeneric, depositFunctionSig, depositorOffset, executeFunctionSig)`
/// as returned by the `resourceEntry` view; all zero when unregistered.
pub type ResourceView = (Address, Address, bool, FixedBytes<4>, U256, FixedBytes<4>);

pub fn resource_view(resolved: Result<ResourceEntry, RegistryError>) -> ResourceView {
    let Ok(entry) = resolved else {
        return Default::default();
    };
    let generic = entry.generic.unwrap_or_default();
    (
        entry.handler,
        entry.target,
        entry.generic.is_some(),
        generic.deposit_function_sig,
        generic.depositor_offset,
        generic.execute_function_sig,
    )
}

/// In-memory registry used by off-chain simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    entries: BTreeMap<ResourceId, ResourceEntry>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceRegistry for ResourceTable {
    fn resolve(&self, resource_id: ResourceId) -> Result<ResourceEntry, RegistryError> {
        self.entries
            .get(&resource_id)
            .copied()
            .ok_or(RegistryError::UnknownResource(resource_id))
    }

    fn register(&mut self, entry: ResourceEntry) {
        self.entries.insert(entry.resource_id, entry);
    }
}
