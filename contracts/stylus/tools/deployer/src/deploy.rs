use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use regex::Regex;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info, warn};

/// Cap on the `cargo stylus` transcript kept in the deployments file.
const MAX_RECORDED_OUTPUT: usize = 16_000;

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Directory of the bridge contract crate (where `cargo stylus deploy` runs).
    #[arg(long, default_value = "contracts/stylus/src/bridge-executor")]
    pub contract_dir: PathBuf,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    pub private_key_path: Option<String>,

    /// Deployer private key (hex, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    pub private_key: Option<String>,

    /// Deployments record to create or update.
    #[arg(long, default_value = "deployments.devnet.json")]
    pub deployments_path: PathBuf,

    /// Key under `deployments` for this contract.
    #[arg(long, default_value = "bridge")]
    pub contract_key: String,

    /// Network label stored alongside the record (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    pub network: String,

    /// Extra args for `cargo stylus deploy`, after `--` (eg, `-- --estimate-gas`).
    #[arg(last = true)]
    pub passthrough: Vec<String>,
}

/// Parsed result of a `cargo stylus deploy` run.
#[derive(Debug)]
pub struct Deployment {
    pub address: String,
    pub tx_hashes: Vec<String>,
    pub output: String,
}

pub fn run(args: &DeployArgs) -> Result<()> {
    let deployment = cargo_stylus_deploy(args)?;
    record_deployment(args, &deployment)?;

    info!(
        contract = %args.contract_key,
        address = %deployment.address,
        txs = deployment.tx_hashes.len(),
        "bridge deployed; call initialize(domainID) then endKeygen(signer) to unpause"
    );
    println!("{}", deployment.address);
    Ok(())
}

fn cargo_stylus_deploy(args: &DeployArgs) -> Result<Deployment> {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&args.contract_dir)
        .arg("stylus")
        .arg("deploy")
        .arg("-e")
        .arg(&args.rpc_url);

    match (&args.private_key_path, &args.private_key) {
        (Some(path), _) => {
            cmd.arg("--private-key-path").arg(path);
        }
        (None, Some(key)) => {
            cmd.arg("--private-key").arg(key);
        }
        (None, None) => bail!(
            "missing deployer key: pass --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
        ),
    }
    cmd.args(&args.passthrough);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    debug!(dir = %args.contract_dir.display(), "running cargo stylus deploy");
    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        bail!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        );
    }

    parse_deploy_output(&combined)
}

/// Pull the program address and confirmed tx hashes out of `cargo stylus deploy` output.
pub fn parse_deploy_output(output: &str) -> Result<Deployment> {
    let re_address = Regex::new(r"Deploying program to address (0x[a-fA-F0-9]{40})")?;
    let re_tx = Regex::new(r"Confirmed tx (0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            anyhow!("could not parse deployed address from `cargo stylus deploy` output")
        })?;

    let tx_hashes: Vec<String> = re_tx
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    if tx_hashes.is_empty() {
        warn!("no confirmed tx hashes found in deploy output");
    }

    Ok(Deployment {
        address,
        tx_hashes,
        output: output.to_string(),
    })
}

fn record_deployment(args: &DeployArgs, deployment: &Deployment) -> Result<()> {
    let path = &args.deployments_path;
    let existing = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?
    } else {
        String::new()
    };

    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", path.display()))?
    };
    if !root.is_object() {
        root = json!({});
    }

    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    upsert_entry(&mut root, args, deployment, &now);

    write_json_atomic(path, &root)?;
    info!(path = %path.display(), "deployments record updated");
    Ok(())
}

fn upsert_entry(root: &mut Value, args: &DeployArgs, deployment: &Deployment, now: &str) {
    root["network"] = json!(args.network);
    root["updated_at"] = json!(now);
    if root.get("deployments").and_then(Value::as_object).is_none() {
        root["deployments"] = json!({});
    }

    let mut entry = json!({
        "address": deployment.address,
        "rpc_url": args.rpc_url,
        "deployed_at": now,
    });
    if !deployment.tx_hashes.is_empty() {
        entry["tx_hashes"] = json!(deployment.tx_hashes);
    }

    let trimmed = deployment.output.trim();
    if !trimmed.is_empty() {
        let end = floor_char_boundary(trimmed, MAX_RECORDED_OUTPUT);
        entry["cargo_stylus_output"] = json!(&trimmed[..end]);
    }

    root["deployments"][&args.contract_key] = entry;
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

pub fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised = serde_json::to_string_pretty(value).context("failed serialising JSON")?;
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}
