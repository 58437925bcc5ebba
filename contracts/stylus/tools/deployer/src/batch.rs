use std::{fs, path::PathBuf};

use alloy_primitives::{Address, Bytes, FixedBytes};
use anyhow::{anyhow, bail, Context, Result};
use bridge_proposal_signer::{
    decode_failure, execute_packed_proposals_calldata, execute_proposals_calldata, sign_and_verify,
    signer_address, SignedBatch,
};
use bridge_proposal_types::{BridgeDomain, Proposal};
use clap::Args;
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deploy::write_json_atomic;

/// One proposal as written in batch files.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalJson {
    #[serde(rename = "originDomainID")]
    pub origin_domain_id: u8,
    pub deposit_nonce: u64,
    #[serde(rename = "resourceID")]
    pub resource_id: FixedBytes<32>,
    #[serde(default)]
    pub data: Bytes,
}

impl From<ProposalJson> for Proposal {
    fn from(p: ProposalJson) -> Self {
        Proposal::new(p.origin_domain_id, p.deposit_nonce, p.resource_id, p.data.to_vec())
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchFile {
    pub proposals: Vec<ProposalJson>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBatchFile {
    pub chain_id: u64,
    pub bridge: Address,
    pub signer: Address,
    pub proposals: Vec<ProposalJson>,
    pub signature: Bytes,
    /// `executeProposals(...)` calldata.
    pub calldata: Bytes,
    /// `executePackedProposals(...)` calldata, when the batch fits the packed limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packed_calldata: Option<Bytes>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// JSON file with `{ "proposals": [...] }`.
    #[arg(long)]
    pub batch: PathBuf,

    /// Chain id of the destination chain.
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: u64,

    /// Deployed bridge address (EIP-712 verifying contract).
    #[arg(long, env = "BRIDGE_ADDRESS")]
    pub bridge: Address,

    /// Signer private key (hex, 0x...).
    #[arg(long, env = "MPC_KEY", hide_env_values = true)]
    pub mpc_key: String,

    /// Where to write the signed batch; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeFailureArgs {
    /// `lowLevelData` from a `FailedHandlerExecution` event (hex, 0x...).
    pub data: String,
}

pub fn sign(args: &SignArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.batch)
        .with_context(|| format!("failed reading {}", args.batch.display()))?;
    let file: BatchFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing batch {}", args.batch.display()))?;
    if file.proposals.is_empty() {
        bail!("batch {} has no proposals", args.batch.display());
    }

    let key = parse_signing_key(&args.mpc_key)?;
    let domain = BridgeDomain::new(args.chain_id, args.bridge);
    let signed = sign_file(domain, file, &key)?;
    info!(
        proposals = signed.proposals.len(),
        signer = %signed.signer,
        bridge = %signed.bridge,
        "batch signed"
    );

    let value = serde_json::to_value(&signed).context("failed serialising signed batch")?;
    match &args.out {
        Some(path) => {
            write_json_atomic(path, &value)?;
            info!(path = %path.display(), "signed batch written");
        }
        None => println!(
            "{}",
            serde_json::to_string_pretty(&value).context("failed serialising signed batch")?
        ),
    }
    Ok(())
}

pub fn sign_file(
    domain: BridgeDomain,
    file: BatchFile,
    key: &SigningKey,
) -> Result<SignedBatchFile> {
    let proposals: Vec<Proposal> = file.proposals.iter().cloned().map(Proposal::from).collect();
    let batch: SignedBatch = sign_and_verify(domain, proposals, key)?;

    let packed_calldata = match execute_packed_proposals_calldata(&batch) {
        Ok(calldata) => Some(calldata.into()),
        Err(err) => {
            debug!(%err, "batch does not fit the packed encoding");
            None
        }
    };

    Ok(SignedBatchFile {
        chain_id: domain.chain_id,
        bridge: domain.verifying_contract,
        signer: signer_address(key),
        proposals: file.proposals,
        signature: batch.signature.clone().into(),
        calldata: execute_proposals_calldata(&batch).into(),
        packed_calldata,
    })
}

pub fn decode(args: &DecodeFailureArgs) -> Result<()> {
    let bytes = decode_hex(&args.data).context("lowLevelData is not valid hex")?;
    println!("{}", decode_failure(&bytes));
    Ok(())
}

fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(hex_str)?)
}

pub fn parse_signing_key(input: &str) -> Result<SigningKey> {
    let decoded = decode_hex(input).context("invalid private key hex")?;
    let bytes: [u8; 32] = decoded
        .try_into()
        .map_err(|_| anyhow!("private key must be 32 bytes"))?;
    SigningKey::from_bytes((&bytes).into()).map_err(|e| anyhow!("invalid private key: {e}"))
}
