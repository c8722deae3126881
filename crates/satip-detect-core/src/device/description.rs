//! UPnP device description parsing with the SAT>IP capability extension.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::error::ParseError;
use crate::types::{DeviceRecord, Frontends};

/// UPnP device description namespace
pub const UPNP_DEVICE_NS: &str = "urn:schemas-upnp-org:device-1-0";

/// SAT>IP vendor extension namespace
pub const SATIP_NS: &str = "urn:ses-com:satip";

const FRIENDLY_NAME: &str = "friendlyName";
const SATIP_CAP: &str = "X_SATIPCAP";

/// Parse a description document into a device record.
///
/// Both `friendlyName` and `X_SATIPCAP` must be present somewhere below the
/// root element. The record's location is left empty.
pub fn parse_description(xml: &str) -> Result<DeviceRecord, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    let name = find_element(root, UPNP_DEVICE_NS, FRIENDLY_NAME)
        .ok_or(ParseError::MissingField(FRIENDLY_NAME))?;
    let caps = find_element(root, SATIP_NS, SATIP_CAP).ok_or(ParseError::MissingField(SATIP_CAP))?;

    let name = name.text().unwrap_or_default().trim();
    let frontends = parse_capabilities(caps.text().unwrap_or_default());

    Ok(DeviceRecord::new(name, frontends))
}

fn find_element<'a, 'input>(
    root: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    root.descendants().skip(1).find(|n| {
        n.is_element()
            && n.tag_name().namespace() == Some(namespace)
            && n.tag_name().name() == name
    })
}

/// Parse an `X_SATIPCAP` value such as `DVBS2-2,DVBT-1`.
///
/// Counts for the same delivery system are summed. Entries that are empty or
/// not of the form `<code>-<count>` are skipped.
pub fn parse_capabilities(text: &str) -> Frontends {
    let mut frontends = Frontends::new();

    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match parse_capability_entry(entry) {
            Some((code, count)) => {
                let total = frontends.entry(code.to_string()).or_insert(0);
                *total = total.saturating_add(count);
            }
            None => debug!("Skipping malformed capability entry '{}'", entry),
        }
    }

    frontends
}

fn parse_capability_entry(entry: &str) -> Option<(&str, u32)> {
    let mut fields = entry.split('-');
    let code = fields.next()?.trim();
    let count = fields.next()?.trim();

    if fields.next().is_some() || code.is_empty() {
        return None;
    }

    let count = count.parse::<u32>().ok()?;
    Some((code, count))
}
