use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fortigate-copy")]
#[command(about = "Copy configuration objects from one FortiGate to another")]
pub struct Cli {
    /// The FortiGate to copy from.
    #[arg(short, long)]
    pub source: String,
    /// The FortiGate to copy to.
    #[arg(short, long)]
    pub destination: String,
    /// Per-request timeout in seconds (0 waits indefinitely).
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    /// Verify appliance TLS certificates.
    #[arg(long)]
    pub verify_tls: bool,
    /// Policy rewrite TOML file (defaults to the embedded rewrites/policy.toml).
    #[arg(long)]
    pub rewrite_file: Option<PathBuf>,
    /// Enable logging of all traffic on every copied policy.
    #[arg(long)]
    pub log_all_traffic: bool,
    /// Drop comments from copied policies.
    #[arg(long)]
    pub strip_comments: bool,
    /// Show debug diagnostics on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
