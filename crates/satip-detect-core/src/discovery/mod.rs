//! SSDP discovery of SAT>IP servers.
//!
//! Builds the M-SEARCH query, runs one listen window, and extracts the unique
//! description URLs advertised in the replies.

pub mod location;
pub mod query;
pub mod service;

pub use location::{extract_urls, parse_locations, LocationSet};
pub use query::{build_query, DiscoveryQuery, SATIP_SEARCH_TARGET, SSDP_ADDR, SSDP_PORT};
pub use service::{discover, discover_until, listen, listen_until, start_round, DatagramSource};
