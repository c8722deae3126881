//! SSDP M-SEARCH query for SAT>IP servers.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// SSDP multicast group
pub const SSDP_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// SSDP port
pub const SSDP_PORT: u16 = 1900;

/// Maximum reply delay hint sent to responders, in seconds.
pub const SSDP_MX: u32 = 1;

/// Search target that SAT>IP servers answer to.
pub const SATIP_SEARCH_TARGET: &str = "urn:ses-com:device:SatIPServer:1";

/// Destination of the discovery query.
pub fn ssdp_group() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(SSDP_ADDR, SSDP_PORT))
}

/// An encoded M-SEARCH request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    message: String,
}

impl DiscoveryQuery {
    pub fn as_str(&self) -> &str {
        &self.message
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.message.as_bytes()
    }
}

/// Build the SAT>IP discovery query.
pub fn build_query() -> DiscoveryQuery {
    let message = format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}:{}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\
         \r\n",
        SSDP_ADDR, SSDP_PORT, SSDP_MX, SATIP_SEARCH_TARGET
    );

    DiscoveryQuery { message }
}
