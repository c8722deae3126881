//! CLI argument definitions using clap.

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use satip_detect_core::config::{DetectConfig, DiscoveryConfig, ResolverConfig};

/// satip-detect - Find SAT>IP servers on the local network and list their tuners
#[derive(Parser, Debug)]
#[command(name = "satip-detect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json, env = "SATIP_FORMAT")]
    pub format: OutputFormat,

    /// Description fetch timeout in milliseconds
    #[arg(long, global = true, default_value = "2000", env = "SATIP_FETCH_TIMEOUT")]
    pub fetch_timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover SAT>IP servers and list their frontends (default)
    Discover,

    /// Resolve a single description URL without discovery
    Describe(DescribeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoveryArgs {
    /// Local IPv4 address to bind; a specific address also selects the multicast interface
    #[arg(long, global = true, default_value = "0.0.0.0", env = "SATIP_BIND")]
    pub bind: Ipv4Addr,

    /// Local UDP port to bind (0 for any)
    #[arg(long, global = true, default_value = "0", env = "SATIP_PORT")]
    pub port: u16,

    /// Per-receive listen timeout in milliseconds; discovery ends on the first silent wait
    #[arg(long, global = true, default_value = "1000", env = "SATIP_LISTEN_TIMEOUT")]
    pub listen_timeout: u64,

    /// Number of description documents fetched in parallel
    #[arg(long, global = true, default_value = "8")]
    pub concurrency: usize,

    /// Overall deadline in milliseconds; devices not resolved by then are left out
    #[arg(long, global = true)]
    pub deadline: Option<u64>,
}

// ==================== Describe ====================

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Description document URL, as advertised in an SSDP LOCATION header
    pub url: String,
}

impl Cli {
    /// Build the detection settings from the parsed arguments.
    pub fn detect_config(&self) -> DetectConfig {
        DetectConfig {
            discovery: DiscoveryConfig {
                bind_addr: self.discovery.bind,
                bind_port: self.discovery.port,
                listen_timeout: Duration::from_millis(self.discovery.listen_timeout),
            },
            resolver: ResolverConfig {
                fetch_timeout: self.fetch_timeout(),
                concurrency: self.discovery.concurrency,
            },
            deadline: self.discovery.deadline.map(Duration::from_millis),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout)
    }
}
