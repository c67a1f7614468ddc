use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Demo API serving coded error responses
#[derive(Debug, Parser)]
#[command(name = "coded-error-demo", about = "Demo API serving coded error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "coded-error.toml", env = "CODED_ERROR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CODED_ERROR_LISTEN")]
    pub listen: Option<SocketAddr>,
}
