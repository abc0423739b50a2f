use crate::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "svc-host")]
#[command(about = "Supervised host for the echo RPC service")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// What to do; defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}
