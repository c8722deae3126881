//! Shared core library for SAT>IP server detection.
//!
//! A detection round sends one SSDP M-SEARCH for SAT>IP servers, collects the
//! advertised description URLs until the listen window closes, then fetches
//! each description and counts the tuner frontends per delivery system.

pub mod config;
pub mod detect;
pub mod device;
pub mod discovery;
pub mod error;
pub mod types;

pub use config::{DetectConfig, DiscoveryConfig, ResolverConfig};
pub use detect::{detect, detect_from, detect_with};
pub use error::{CoreError, FetchError, ParseError, ResolveError, TransportError};
pub use types::{DeviceInventory, DeviceRecord, Frontends};
