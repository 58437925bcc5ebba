//! Durable executor state: the nonce bitmap and the resource routing table.

pub mod nonces;
pub mod resources;

pub use nonces::{nonce_slot, NonceBitmap, NonceRegistry};
pub use resources::{
    resource_view, GenericCallMetadata, ResourceEntry, ResourceRegistry, ResourceTable,
    ResourceView,
};
