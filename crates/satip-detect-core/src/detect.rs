//! One full detection round: discovery, then resolution.

use std::future::Future;

use futures::future::{self, Either};
use futures::StreamExt;
use tokio::time::{sleep_until, Instant};
use tracing::info;

use crate::config::DetectConfig;
use crate::device::{into_input_order, resolve_stream, DescriptionFetcher, HttpFetcher};
use crate::discovery::{listen_until, start_round, DatagramSource};
use crate::error::Result;
use crate::types::DeviceInventory;

/// Discover SAT>IP servers and resolve their capabilities over HTTP.
///
/// Only socket setup or the query send can fail; unreachable or malformed
/// devices are skipped.
pub async fn detect(config: &DetectConfig) -> Result<DeviceInventory> {
    let fetcher = HttpFetcher::new(config.resolver.fetch_timeout)?;
    detect_with(config, &fetcher).await
}

/// Run a detection round with a caller-supplied fetcher.
pub async fn detect_with<F>(config: &DetectConfig, fetcher: &F) -> Result<DeviceInventory>
where
    F: DescriptionFetcher + ?Sized,
{
    let deadline = config.deadline.map(|d| Instant::now() + d);
    let socket = start_round(&config.discovery).await?;

    Ok(detect_from(socket, fetcher, config, deadline).await)
}

/// Listen for replies on `source`, then resolve what was collected.
///
/// The source is released when the listen window closes, before the first
/// description fetch starts. `deadline` bounds both phases.
pub async fn detect_from<S, F>(
    source: S,
    fetcher: &F,
    config: &DetectConfig,
    deadline: Option<Instant>,
) -> DeviceInventory
where
    S: DatagramSource,
    F: DescriptionFetcher + ?Sized,
{
    let urls = listen_until(
        source,
        config.discovery.listen_timeout,
        deadline_reached(deadline),
    )
    .await;
    let inventory = resolve_within(fetcher, urls, config.resolver.concurrency, deadline).await;

    info!("Detected {} SAT>IP server(s)", inventory.len());
    inventory
}

/// Resolve candidate URLs, dropping whatever is still in flight at `deadline`.
///
/// Records that completed before the deadline are kept in input order, even
/// when an earlier URL is still pending.
pub async fn resolve_within<F>(
    fetcher: &F,
    urls: Vec<String>,
    concurrency: usize,
    deadline: Option<Instant>,
) -> DeviceInventory
where
    F: DescriptionFetcher + ?Sized,
{
    let resolved = resolve_stream(fetcher, urls, concurrency)
        .take_until(deadline_reached(deadline))
        .collect()
        .await;
    into_input_order(resolved)
}

fn deadline_reached(deadline: Option<Instant>) -> impl Future<Output = ()> {
    match deadline {
        Some(at) => Either::Left(sleep_until(at)),
        None => Either::Right(future::pending()),
    }
}
