//! Construction-time settings for a detection round.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Per-receive timeout of the listen window
pub const DEFAULT_LISTEN_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout for fetching one description document
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Description documents fetched in parallel
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Discovery socket and listen window settings.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Local address to bind. A specific address also selects the
    /// outgoing multicast interface.
    pub bind_addr: Ipv4Addr,
    /// Local port to bind, 0 for an ephemeral port
    pub bind_port: u16,
    /// Each receive waits at most this long; the window closes on the first
    /// receive that times out.
    pub listen_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            bind_addr: Ipv4Addr::UNSPECIFIED,
            bind_port: 0,
            listen_timeout: DEFAULT_LISTEN_TIMEOUT,
        }
    }
}

/// Description fetch settings.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub fetch_timeout: Duration,
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Settings for a full detection round.
#[derive(Debug, Clone, Default)]
pub struct DetectConfig {
    pub discovery: DiscoveryConfig,
    pub resolver: ResolverConfig,
    /// Overall deadline. When it passes, listening and any in-flight fetches
    /// stop and the inventory holds whatever was resolved so far.
    pub deadline: Option<Duration>,
}
