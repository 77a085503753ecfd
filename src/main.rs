//! memberchat - ask questions about members from the terminal

use std::path::PathBuf;

use clap::Parser;
use memberchat::runner::{run, AppConfig};

/// Chat with the member query service
#[derive(Parser, Debug)]
#[command(name = "memberchat")]
#[command(version, about, long_about = None)]
struct Args {
    /// Query endpoint URL
    #[arg(long, env = "MEMBERCHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long)]
    timeout: Option<u64>,

    /// Settings file (defaults to $XDG_CONFIG_HOME/memberchat/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask a single question, print the reply and exit
    #[arg(long, value_name = "QUESTION")]
    ask: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            config_path: args.config,
            endpoint: args.endpoint,
            timeout_secs: args.timeout,
            ask: args.ask,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(AppConfig::from(args))
}
