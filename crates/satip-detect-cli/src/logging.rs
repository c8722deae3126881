//! Log setup for the CLI.
//!
//! Logs go to stderr so stdout only carries the inventory.

use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Crate prefixes stripped from event targets.
const TARGET_PREFIXES: [&str; 2] = ["satip_detect_core::", "satip_detect::"];

/// `level message` log lines. Debug and trace lines also name the module.
pub struct SatipFormatter;

impl<S, N> FormatEvent<S, N> for SatipFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        write!(writer, "{} ", level_label(level))?;
        if level >= Level::DEBUG {
            write!(writer, "{} ", short_target(metadata.target()).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn level_label(level: Level) -> ColoredString {
    match level {
        Level::ERROR => "error".red().bold(),
        Level::WARN => "warn".yellow().bold(),
        Level::INFO => "info".green(),
        Level::DEBUG => "debug".blue(),
        Level::TRACE => "trace".dimmed(),
    }
}

/// Module path of an event target without the crate prefix.
fn short_target(target: &str) -> &str {
    TARGET_PREFIXES
        .iter()
        .find_map(|prefix| target.strip_prefix(prefix))
        .unwrap_or(target)
}

/// Default filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(SatipFormatter)
        .try_init();
}
