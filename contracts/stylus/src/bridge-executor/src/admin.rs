//! Admin gating for the entrypoint's management surface.

use stylus_sdk::alloy_primitives::Address;

use crate::errors::AdminError;

/// Initialization flag and admin address, as stored by the contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminGate {
    pub initialized: bool,
    pub admin: Address,
}

impl AdminGate {
    pub fn new(initialized: bool, admin: Address) -> Self {
        Self { initialized, admin }
    }

    /// One-time setup; `caller` becomes admin.
    pub fn initialize(&mut self, caller: Address) -> Result<(), AdminError> {
        if self.initialized {
            return Err(AdminError::AlreadyInitialized);
        }
        self.initialized = true;
        self.admin = caller;
        Ok(())
    }

    pub fn authorize(&self, caller: Address) -> Result<(), AdminError> {
        if !self.initialized {
            return Err(AdminError::NotInitialized);
        }
        if caller != self.admin {
            return Err(AdminError::Unauthorized(caller));
        }
        Ok(())
    }

    /// Hands the admin role to `new_admin`. Returns the previous admin.
    pub fn change_admin(
        &mut self,
        caller: Address,
        new_admin: Address,
    ) -> Result<Address, AdminError> {
        self.authorize(caller)?;
        require_handler(new_admin)?;
        Ok(core::mem::replace(&mut self.admin, new_admin))
    }
}

/// Registered handlers (and admins) must be non-zero.
pub fn require_handler(handler: Address) -> Result<(), AdminError> {
    if handler == Address::ZERO {
        return Err(AdminError::ZeroAddress);
    }
    Ok(())
}
