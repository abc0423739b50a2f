use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the service under the supervisor (default)
    Run,

    /// Print a systemd unit for the configured service
    Unit {
        /// Binary the unit should start (defaults to this executable)
        #[arg(long)]
        exec_start: Option<PathBuf>,
    },
}
