//! Stylus entrypoint for the cross-domain proposal executor.
//!
//! Design notes:
//! - Signature, pause and signer checks run before any nonce bit is read or written; a rejected
//!   batch reverts the whole call.
//! - Per-proposal failures never revert. Relayers learn each proposal's result from the
//!   `ProposalExecution` / `FailedHandlerExecution` events, in submission order.
//! - A single admin address gates resource registration, pausing and signer rotation.
//! - A handler cannot call back into the bridge while it runs: the SDK entrypoint reverts
//!   re-entrant calls unless the `reentrant` feature is enabled, and it is not.

use alloc::{string::String, vec::Vec};

use alloy_sol_types::sol;
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256, U8},
    prelude::*,
    stylus_core::log,
};
use stylus_sdk::stylus_proc::SolidityError;

use crate::{
    admin::{require_handler, AdminGate},
    codec::decode_proposals,
    dispatch::{execute_signed_batch, execute_signed_proposal, ExecutionOutcome},
    errors::{AdminError, BatchRejected, SignerError},
    events::{
        outcome_event, AdminChanged, KeyRefresh, KeygenCompleted, OutcomeEvent, Paused,
        ResourceRegistered, Retry, SignerRotated, Unpaused,
    },
    onchain::{NonceStore, PrecompileRecovery, RawCallInvoker, ResourceStore},
    registry::{
        resource_view, GenericCallMetadata, NonceRegistry, ResourceEntry, ResourceRegistry,
        ResourceView,
    },
    types::{BridgeDomain, Proposal},
    verifier::{authorize_batch, AuthorizedSigner, BridgeConfig},
};

/// ABI shape of a proposal:
/// `(uint8 originDomainID, uint64 depositNonce, bytes32 resourceID, bytes data)`.
pub type ProposalTuple = (u8, u64, FixedBytes<32>, Bytes);

sol! {
    error AlreadyInitialized();
    error NotInitialized();
    error Unauthorized(address caller);
    error ZeroAddress();
    error BridgePaused();
    error SignerNotSet();
    error SignerAlreadySet();
    error EmptyBatch();
    error InvalidSignature();
    error InvalidProposalSigner(address recovered);
    error MalformedBatch();
}

#[derive(SolidityError)]
pub enum BridgeError {
    AlreadyInitialized(AlreadyInitialized),
    NotInitialized(NotInitialized),
    Unauthorized(Unauthorized),
    ZeroAddress(ZeroAddress),
    BridgePaused(BridgePaused),
    SignerNotSet(SignerNotSet),
    SignerAlreadySet(SignerAlreadySet),
    EmptyBatch(EmptyBatch),
    InvalidSignature(InvalidSignature),
    InvalidProposalSigner(InvalidProposalSigner),
    MalformedBatch(MalformedBatch),
}

impl From<BatchRejected> for BridgeError {
    fn from(err: BatchRejected) -> Self {
        match err {
            BatchRejected::Paused => BridgeError::BridgePaused(BridgePaused {}),
            BatchRejected::SignerNotSet => BridgeError::SignerNotSet(SignerNotSet {}),
            BatchRejected::EmptyBatch => BridgeError::EmptyBatch(EmptyBatch {}),
            BatchRejected::InvalidSignature(_) => {
                BridgeError::InvalidSignature(InvalidSignature {})
            }
            BatchRejected::SignerMismatch { recovered } => {
                BridgeError::InvalidProposalSigner(InvalidProposalSigner { recovered })
            }
            BatchRejected::Malformed(_) => BridgeError::MalformedBatch(MalformedBatch {}),
        }
    }
}

impl From<SignerError> for BridgeError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::AlreadySet => BridgeError::SignerAlreadySet(SignerAlreadySet {}),
            SignerError::NotSet => BridgeError::SignerNotSet(SignerNotSet {}),
            SignerError::ZeroAddress => BridgeError::ZeroAddress(ZeroAddress {}),
        }
    }
}

impl From<AdminError> for BridgeError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::AlreadyInitialized => {
                BridgeError::AlreadyInitialized(AlreadyInitialized {})
            }
            AdminError::NotInitialized => BridgeError::NotInitialized(NotInitialized {}),
            AdminError::Unauthorized(caller) => {
                BridgeError::Unauthorized(Unauthorized { caller })
            }
            AdminError::ZeroAddress => BridgeError::ZeroAddress(ZeroAddress {}),
        }
    }
}

sol_storage! {
    #[entrypoint]
    pub struct Bridge {
        bool initialized;
        /// Domain id of the chain this bridge executes on.
        uint8 domain_id;
        address admin;
        /// Authorized batch signer ("MPC" address); zero until keygen completes.
        address mpc_address;
        bool paused;

        NonceStore nonces;
        ResourceStore resources;
    }
}

fn into_proposal((origin_domain_id, deposit_nonce, resource_id, data): ProposalTuple) -> Proposal {
    Proposal::new(origin_domain_id, deposit_nonce, resource_id, data.0)
}

#[public]
impl Bridge {
    /// One-time setup. The caller becomes admin and the bridge starts paused until keygen.
    pub fn initialize(&mut self, domain_id: u8) -> Result<(), BridgeError> {
        let mut gate = self.gate();
        gate.initialize(self.vm().msg_sender())?;
        let config = self.config();
        let fresh = BridgeConfig::new(config.domain);

        self.initialized.set(gate.initialized);
        self.domain_id.set(U8::from(domain_id));
        self.admin.set(gate.admin);
        self.paused.set(fresh.paused);
        Ok(())
    }

    /// Execute a single signed proposal.
    pub fn execute_proposal(
        &mut self,
        proposal: ProposalTuple,
        signature: Bytes,
    ) -> Result<(), BridgeError> {
        let proposal = into_proposal(proposal);
        let config = self.config();
        let outcome = execute_signed_proposal(
            &config,
            &PrecompileRecovery,
            &mut self.nonces,
            &self.resources,
            &mut RawCallInvoker::new(self.resources.vm()),
            &proposal,
            &signature,
        )?;

        if let Some(outcome) = outcome {
            self.emit_outcome(outcome);
        }
        Ok(())
    }

    /// Execute a signed batch. One signature covers the whole ordered batch.
    pub fn execute_proposals(
        &mut self,
        proposals: Vec<ProposalTuple>,
        signature: Bytes,
    ) -> Result<(), BridgeError> {
        let proposals: Vec<Proposal> = proposals.into_iter().map(into_proposal).collect();
        self.execute_batch(&proposals, &signature)
    }

    /// Execute a signed batch given in the packed encoding.
    pub fn execute_packed_proposals(
        &mut self,
        batch: Bytes,
        signature: Bytes,
    ) -> Result<(), BridgeError> {
        let proposals = decode_proposals(&batch).map_err(BatchRejected::from)?;
        self.execute_batch(&proposals, &signature)
    }

    /// Whether `signature` is the authorized signer's signature over exactly `proposals`.
    ///
    /// Ignores the pause flag.
    pub fn verify(&self, proposals: Vec<ProposalTuple>, signature: Bytes) -> bool {
        let proposals: Vec<Proposal> = proposals.into_iter().map(into_proposal).collect();
        let mut config = self.config();
        config.paused = false;
        authorize_batch(&config, &PrecompileRecovery, &proposals, &signature).is_ok()
    }

    pub fn is_proposal_executed(&self, domain_id: u8, deposit_nonce: u64) -> bool {
        self.nonces.is_executed(domain_id, deposit_nonce)
    }

    /// Raw bitmap word `word_index` for `domain_id` (nonces `256 * word_index ..`).
    pub fn used_nonces(&self, domain_id: u8, word_index: U256) -> U256 {
        self.nonces.nonce_word(domain_id, word_index)
    }

    pub fn admin_set_resource(
        &mut self,
        handler: Address,
        resource_id: FixedBytes<32>,
        target: Address,
    ) -> Result<(), BridgeError> {
        self.only_admin()?;
        require_handler(handler)?;
        self.register_resource(ResourceEntry::new(resource_id, handler, target));
        Ok(())
    }

    pub fn admin_set_generic_resource(
        &mut self,
        handler: Address,
        resource_id: FixedBytes<32>,
        target: Address,
        deposit_function_sig: FixedBytes<4>,
        depositor_offset: U256,
        execute_function_sig: FixedBytes<4>,
    ) -> Result<(), BridgeError> {
        self.only_admin()?;
        require_handler(handler)?;
        let metadata = GenericCallMetadata {
            deposit_function_sig,
            depositor_offset,
            execute_function_sig,
        };
        self.register_resource(ResourceEntry::generic(
            resource_id,
            handler,
            target,
            metadata,
        ));
        Ok(())
    }

    pub fn resource_id_to_handler_address(&self, resource_id: FixedBytes<32>) -> Address {
        self.resources
            .resolve(resource_id)
            .map(|entry| entry.handler)
            .unwrap_or(Address::ZERO)
    }

    /// `(handler, target, isGeneric, depositFunctionSig, depositorOffset, executeFunctionSig)`;
    /// all zero when unregistered.
    pub fn resource_entry(&self, resource_id: FixedBytes<32>) -> ResourceView {
        resource_view(self.resources.resolve(resource_id))
    }

    /// Sets the authorized signer once and unpauses the bridge.
    pub fn end_keygen(&mut self, signer: Address) -> Result<(), BridgeError> {
        self.only_admin()?;
        let mut config = self.config();
        config.end_keygen(signer)?;

        self.mpc_address.set(signer);
        self.paused.set(config.paused);

        let sender = self.vm().msg_sender();
        log(self.vm(), KeygenCompleted { signer });
        log(self.vm(), Unpaused { account: sender });
        Ok(())
    }

    pub fn admin_rotate_signer(&mut self, signer: Address) -> Result<(), BridgeError> {
        self.only_admin()?;
        let mut current = AuthorizedSigner::from_stored(self.mpc_address.get());
        let previous = current.rotate(signer)?;

        self.mpc_address.set(signer);
        log(
            self.vm(),
            SignerRotated {
                previous,
                current: signer,
            },
        );
        Ok(())
    }

    /// Announces a key refresh of the signing group; the signer address is unchanged.
    pub fn refresh_key(&mut self, hash: String) -> Result<(), BridgeError> {
        self.only_admin()?;
        log(self.vm(), KeyRefresh { hash });
        Ok(())
    }

    /// Asks relayers to re-scan a source-domain transaction. Open to anyone.
    pub fn retry(&mut self, tx_hash: String) {
        log(self.vm(), Retry { txHash: tx_hash });
    }

    pub fn admin_pause_transfers(&mut self) -> Result<(), BridgeError> {
        self.only_admin()?;
        let mut config = self.config();
        config.pause();
        self.paused.set(config.paused);

        let sender = self.vm().msg_sender();
        log(self.vm(), Paused { account: sender });
        Ok(())
    }

    pub fn admin_unpause_transfers(&mut self) -> Result<(), BridgeError> {
        self.only_admin()?;
        let mut config = self.config();
        config.unpause()?;
        self.paused.set(config.paused);

        let sender = self.vm().msg_sender();
        log(self.vm(), Unpaused { account: sender });
        Ok(())
    }

    pub fn admin_change_admin(&mut self, new_admin: Address) -> Result<(), BridgeError> {
        let mut gate = self.gate();
        let previous = gate.change_admin(self.vm().msg_sender(), new_admin)?;

        self.admin.set(gate.admin);
        log(
            self.vm(),
            AdminChanged {
                previous,
                current: new_admin,
            },
        );
        Ok(())
    }

    pub fn domain_id(&self) -> u8 {
        self.domain_id.get().to::<u8>()
    }

    pub fn admin(&self) -> Address {
        self.admin.get()
    }

    pub fn mpc_address(&self) -> Address {
        self.mpc_address.get()
    }

    pub fn paused(&self) -> bool {
        self.paused.get()
    }
}

impl Bridge {
    fn config(&self) -> BridgeConfig {
        BridgeConfig {
            domain: BridgeDomain::new(self.vm().chain_id(), self.vm().contract_address()),
            signer: AuthorizedSigner::from_stored(self.mpc_address.get()),
            paused: self.paused.get(),
        }
    }

    fn gate(&self) -> AdminGate {
        AdminGate::new(self.initialized.get(), self.admin.get())
    }

    fn only_admin(&self) -> Result<(), BridgeError> {
        Ok(self.gate().authorize(self.vm().msg_sender())?)
    }

    fn register_resource(&mut self, entry: ResourceEntry) {
        self.resources.register(entry);
        log(
            self.vm(),
            ResourceRegistered {
                resourceID: entry.resource_id,
                handler: entry.handler,
                target: entry.target,
            },
        );
    }

    fn execute_batch(
        &mut self,
        proposals: &[Proposal],
        signature: &[u8],
    ) -> Result<(), BridgeError> {
        let config = self.config();
        let outcomes = execute_signed_batch(
            &config,
            &PrecompileRecovery,
            &mut self.nonces,
            &self.resources,
            &mut RawCallInvoker::new(self.resources.vm()),
            proposals,
            signature,
        )?;

        for outcome in outcomes {
            self.emit_outcome(outcome);
        }
        Ok(())
    }

    fn emit_outcome(&self, outcome: ExecutionOutcome) {
        match outcome_event(outcome) {
            OutcomeEvent::Executed(event) => log(self.vm(), event),
            OutcomeEvent::Failed(event) => log(self.vm(), event),
        }
    }
}
