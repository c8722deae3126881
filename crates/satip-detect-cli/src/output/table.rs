//! Table-formatted output for CLI.

use comfy_table::{Cell, ContentArrangement, Table};

use satip_detect_core::types::DeviceRecord;

use super::{frontends_summary, OutputFormatter};

fn address_text(device: &DeviceRecord) -> String {
    device
        .address
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[DeviceRecord]) -> String {
        if devices.is_empty() {
            return "No SAT>IP servers found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Address", "Frontends", "Total", "Location"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(&device.name),
                Cell::new(address_text(device)),
                Cell::new(frontends_summary(device)),
                Cell::new(device.total_frontends().to_string()),
                Cell::new(&device.location),
            ]);
        }

        format!("{}\n\nFound {} server(s)", table, devices.len())
    }

    fn format_device(&self, device: &DeviceRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Server: {}", device.name));
        lines.push(format!("  Address:   {}", address_text(device)));
        lines.push(format!("  Location:  {}", device.location));
        lines.push(format!("  Frontends: {}", device.total_frontends()));

        for (code, count) in &device.frontends {
            lines.push(format!("    {:<8} {}", code, count));
        }

        lines.join("\n")
    }
}
