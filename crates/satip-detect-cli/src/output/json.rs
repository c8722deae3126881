//! JSON-formatted output for CLI.
//!
//! The inventory is a pretty-printed array of `{"frontends": {...}, "name": ...}`
//! objects with sorted keys.

use serde::Serialize;

use satip_detect_core::types::DeviceRecord;

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[DeviceRecord]) -> String {
        Self::to_json(devices)
    }

    fn format_device(&self, device: &DeviceRecord) -> String {
        Self::to_json(device)
    }
}
