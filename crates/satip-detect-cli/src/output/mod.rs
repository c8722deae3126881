//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use satip_detect_core::types::DeviceRecord;

use crate::cli::OutputFormat;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the discovered inventory
    fn format_devices(&self, devices: &[DeviceRecord]) -> String;

    /// Format a single resolved device
    fn format_device(&self, device: &DeviceRecord) -> String;
}

/// Get the formatter for the requested output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Table => Box::new(TableOutput::new()),
    }
}

/// Render frontend counts as `DVBS2 x4, DVBT x1`.
pub fn frontends_summary(device: &DeviceRecord) -> String {
    if device.frontends.is_empty() {
        return "-".to_string();
    }

    device
        .frontends
        .iter()
        .map(|(code, count)| format!("{} x{}", code, count))
        .collect::<Vec<_>>()
        .join(", ")
}
