//! Operator CLI for the bridge: deploy the Stylus contract, sign proposal batches, and read back
//! handler failures.

mod batch;
mod deploy;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Deploy with `cargo stylus deploy` and record the result in a deployments JSON.
    Deploy(deploy::DeployArgs),
    /// Sign a JSON proposal batch for a deployed bridge and emit the relayer calldata.
    Sign(batch::SignArgs),
    /// Decode `FailedHandlerExecution.lowLevelData` into a readable reason.
    DecodeFailure(batch::DecodeFailureArgs),
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match &cli.command {
        Cmd::Deploy(args) => deploy::run(args),
        Cmd::Sign(args) => batch::sign(args),
        Cmd::DecodeFailure(args) => batch::decode(args),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}
