//! Resolve candidate URLs into device records.

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use super::description::parse_description;
use super::fetch::DescriptionFetcher;
use crate::error::ResolveError;
use crate::types::{DeviceInventory, DeviceRecord};

/// Fetch and parse one description document.
pub async fn resolve<F>(fetcher: &F, url: &str) -> Result<DeviceRecord, ResolveError>
where
    F: DescriptionFetcher + ?Sized,
{
    let description = fetcher.fetch(url).await?;
    let record = parse_description(&description.body).map_err(|source| ResolveError::Parse {
        url: url.to_string(),
        source,
    })?;

    debug!(
        "Resolved '{}' at {} with {} frontend(s)",
        record.name,
        url,
        record.total_frontends()
    );
    Ok(record
        .with_location(url)
        .with_address(description.address))
}

/// Resolve candidates concurrently, yielding records as they complete.
///
/// Each record is tagged with the index of its URL in `urls`, so callers that
/// stop early can still restore discovery order with [`into_input_order`]. A
/// URL that fails to fetch or parse is logged and skipped.
pub fn resolve_stream<'a, F>(
    fetcher: &'a F,
    urls: Vec<String>,
    concurrency: usize,
) -> impl Stream<Item = (usize, DeviceRecord)> + 'a
where
    F: DescriptionFetcher + ?Sized + 'a,
{
    stream::iter(urls.into_iter().enumerate())
        .map(move |(index, url)| async move {
            match resolve(fetcher, &url).await {
                Ok(record) => Some((index, record)),
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    None
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(|resolved| async move { resolved })
}

/// Sort index-tagged records back into input order.
pub fn into_input_order(mut resolved: Vec<(usize, DeviceRecord)>) -> DeviceInventory {
    resolved.sort_by_key(|(index, _)| *index);
    resolved.into_iter().map(|(_, record)| record).collect()
}

/// Resolve all candidates and collect the inventory in input order.
pub async fn resolve_all<F>(fetcher: &F, urls: Vec<String>, concurrency: usize) -> DeviceInventory
where
    F: DescriptionFetcher + ?Sized,
{
    into_input_order(resolve_stream(fetcher, urls, concurrency).collect().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fetch::Description;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory fetcher that records every request.
    #[derive(Default)]
    struct MockFetcher {
        bodies: HashMap<String, String>,
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }

        fn delayed(mut self, url: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DescriptionFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<Description, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }
            self.bodies
                .get(url)
                .map(|body| Description::new(body.as_str()).with_address([10, 0, 0, 9].into()))
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn body(name: &str, caps: &str) -> String {
        format!(
            r#"<root xmlns="urn:schemas-upnp-org:device-1-0"><device><friendlyName>{}</friendlyName><satip:X_SATIPCAP xmlns:satip="urn:ses-com:satip">{}</satip:X_SATIPCAP></device></root>"#,
            name, caps
        )
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolve_sets_location_and_address() {
        let fetcher = MockFetcher::default().with("http://a/desc.xml", &body("A", "DVBT-2"));
        let record = resolve(&fetcher, "http://a/desc.xml").await.unwrap();
        assert_eq!(record.name, "A");
        assert_eq!(record.location, "http://a/desc.xml");
        assert_eq!(record.address, Some([10, 0, 0, 9].into()));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_isolated() {
        let fetcher = MockFetcher::default()
            .with("http://one/d.xml", &body("One", "DVBS2-1"))
            .with("http://three/d.xml", &body("Three", "DVBC-4"));

        let inventory = resolve_all(
            &fetcher,
            urls(&["http://one/d.xml", "http://two/d.xml", "http://three/d.xml"]),
            4,
        )
        .await;

        let names: Vec<_> = inventory.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Three"]);
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_parse_failure_is_isolated() {
        let fetcher = MockFetcher::default()
            .with("http://bad/d.xml", "<root><device/></root>")
            .with("http://good/d.xml", &body("Good", "DVBT-1"));

        let inventory =
            resolve_all(&fetcher, urls(&["http://bad/d.xml", "http://good/d.xml"]), 2).await;

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].name, "Good");
    }

    #[tokio::test]
    async fn test_order_preserved_with_slow_first_fetch() {
        let fetcher = MockFetcher::default()
            .with("http://slow/d.xml", &body("Slow", "DVBS2-2"))
            .with("http://fast/d.xml", &body("Fast", "DVBT-1"))
            .delayed("http://slow/d.xml", Duration::from_millis(150));

        let inventory =
            resolve_all(&fetcher, urls(&["http://slow/d.xml", "http://fast/d.xml"]), 4).await;

        let names: Vec<_> = inventory.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Slow", "Fast"]);
    }

    #[tokio::test]
    async fn test_stream_yields_in_completion_order_with_indices() {
        let fetcher = MockFetcher::default()
            .with("http://slow/d.xml", &body("Slow", "DVBS2-2"))
            .with("http://fast/d.xml", &body("Fast", "DVBT-1"))
            .delayed("http://slow/d.xml", Duration::from_millis(150));

        let resolved: Vec<(usize, DeviceRecord)> = resolve_stream(
            &fetcher,
            urls(&["http://slow/d.xml", "http://fast/d.xml"]),
            4,
        )
        .collect()
        .await;

        let tagged: Vec<_> = resolved.iter().map(|(i, d)| (*i, d.name.as_str())).collect();
        assert_eq!(tagged, vec![(1, "Fast"), (0, "Slow")]);

        let names: Vec<_> = into_input_order(resolved)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Slow", "Fast"]);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_resolves() {
        let fetcher = MockFetcher::default().with("http://a/d.xml", &body("A", "DVBS2-1"));
        let inventory = resolve_all(&fetcher, urls(&["http://a/d.xml"]), 0).await;
        assert_eq!(inventory.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let fetcher = MockFetcher::default();
        assert!(resolve_all(&fetcher, Vec::new(), 4).await.is_empty());
        assert!(fetcher.calls().is_empty());
    }
}
