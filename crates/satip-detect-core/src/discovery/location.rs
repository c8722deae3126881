//! LOCATION header extraction from SSDP replies.

use indexmap::IndexSet;
use tracing::debug;

/// Header token that carries the description URL. Matched case-sensitively
/// anywhere in a line.
pub const LOCATION_TOKEN: &str = "LOCATION:";

/// Ordered set of candidate description URLs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationSet {
    urls: IndexSet<String>,
}

impl LocationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a URL unless already present. Returns whether it was new.
    pub fn insert(&mut self, url: String) -> bool {
        self.urls.insert(url)
    }

    /// Add every LOCATION found in a reply payload.
    pub fn extend_from_payload(&mut self, payload: &[u8]) {
        for url in parse_locations(payload) {
            if self.insert(url.clone()) {
                debug!("New SAT>IP location: {}", url);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls.into_iter().collect()
    }
}

/// Parse all LOCATION values in one reply payload, in line order.
///
/// Payloads that are not valid UTF-8 are decoded lossily; lines without the
/// token are ignored.
pub fn parse_locations(payload: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(payload);

    text.split("\r\n")
        .filter(|line| line.contains(LOCATION_TOKEN))
        .map(|line| line.replace(LOCATION_TOKEN, "").trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

/// Extract unique candidate URLs from reply payloads, first-seen order.
pub fn extract_urls<I, P>(payloads: I) -> Vec<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut set = LocationSet::new();
    for payload in payloads {
        set.extend_from_payload(payload.as_ref());
    }
    set.into_vec()
}
