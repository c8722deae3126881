//! Discover command implementation.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use satip_detect_core::detect;
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::get_formatter;

/// Run the discover command
pub async fn run_discover(cli: &Cli) -> Result<()> {
    let config = cli.detect_config();
    if config.resolver.concurrency == 0 {
        return Err(CliError::InvalidArgument(
            "--concurrency must be at least 1".to_string(),
        ));
    }

    info!(
        "Searching for SAT>IP servers from {}:{}",
        config.discovery.bind_addr, config.discovery.bind_port
    );

    // Spinner only in table mode, stdout and stderr stay clean for JSON consumers
    let spinner = (cli.format == OutputFormat::Table).then(|| {
        new_spinner(format!(
            "Searching for SAT>IP servers ({} ms listen window)...",
            config.discovery.listen_timeout.as_millis()
        ))
    });

    let result = detect(&config).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let devices = result?;
    println!("{}", get_formatter(cli.format).format_devices(&devices));

    Ok(())
}

fn new_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
