//! Describe command implementation.

use satip_detect_core::device::{resolve, HttpFetcher};

use crate::cli::{Cli, DescribeArgs};
use crate::error::{CliError, Result};
use crate::output::get_formatter;

/// Run the describe command
pub async fn run_describe(args: &DescribeArgs, cli: &Cli) -> Result<()> {
    if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
        return Err(CliError::InvalidArgument(format!(
            "expected an http(s) URL, got '{}'",
            args.url
        )));
    }

    let fetcher = HttpFetcher::new(cli.fetch_timeout())?;
    let device = resolve(&fetcher, &args.url).await?;

    println!("{}", get_formatter(cli.format).format_device(&device));

    Ok(())
}
