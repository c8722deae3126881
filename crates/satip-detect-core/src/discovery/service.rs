//! SSDP discovery transport.
//!
//! Sends one M-SEARCH to the SSDP group and listens for replies until a
//! receive times out. Everything after the query is sent is best effort:
//! receive errors end the window and keep whatever was collected.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, info};

use super::location::LocationSet;
use super::query::{build_query, ssdp_group, DiscoveryQuery};
use crate::config::DiscoveryConfig;
use crate::error::TransportError;

/// Receive buffer size for SSDP replies
const RECV_BUFFER_SIZE: usize = 2048;

/// Source of reply datagrams.
#[async_trait]
pub trait DatagramSource: Send {
    /// Receive one datagram into `buf`, returning its length and sender.
    async fn recv_datagram(&mut self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)>;
}

#[async_trait]
impl DatagramSource for UdpSocket {
    async fn recv_datagram(&mut self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)> {
        self.recv_from(buf).await
    }
}

/// Create the discovery socket with broadcast and address reuse enabled.
///
/// Port reuse is attempted where the platform supports it and silently
/// skipped otherwise.
pub fn create_discovery_socket(
    bind_addr: Ipv4Addr,
    port: u16,
) -> Result<std::net::UdpSocket, TransportError> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(TransportError::Socket)?;

    socket
        .set_broadcast(true)
        .map_err(|source| TransportError::SocketOption {
            option: "SO_BROADCAST",
            source,
        })?;

    socket
        .set_reuse_address(true)
        .map_err(|source| TransportError::SocketOption {
            option: "SO_REUSEADDR",
            source,
        })?;

    #[cfg(unix)]
    let _ = socket.set_reuse_port(true);

    if !bind_addr.is_unspecified() {
        socket
            .set_multicast_if_v4(&bind_addr)
            .map_err(|source| TransportError::SocketOption {
                option: "IP_MULTICAST_IF",
                source,
            })?;
    }

    let addr = SocketAddr::from((bind_addr, port));
    socket
        .bind(&addr.into())
        .map_err(|source| TransportError::Bind { addr, source })?;

    socket
        .set_nonblocking(true)
        .map_err(|source| TransportError::SocketOption {
            option: "O_NONBLOCK",
            source,
        })?;

    Ok(socket.into())
}

/// Open the discovery socket on the tokio runtime.
pub fn open_socket(config: &DiscoveryConfig) -> Result<UdpSocket, TransportError> {
    let std_socket = create_discovery_socket(config.bind_addr, config.bind_port)?;
    UdpSocket::from_std(std_socket).map_err(TransportError::Socket)
}

/// Send the query as a single datagram to the SSDP group.
pub async fn send_query(socket: &UdpSocket, query: &DiscoveryQuery) -> Result<(), TransportError> {
    let addr = ssdp_group();
    socket
        .send_to(query.as_bytes(), addr)
        .await
        .map_err(|source| TransportError::Send { addr, source })?;
    debug!("Sent M-SEARCH to {}", addr);
    Ok(())
}

/// Lazily yield reply payloads from `source`.
///
/// Each receive waits at most `per_receive`. The stream ends on the first
/// timeout, on an empty datagram, or on any receive error. The source is
/// dropped together with the stream.
pub fn listen<S>(source: S, per_receive: Duration) -> impl Stream<Item = Vec<u8>>
where
    S: DatagramSource,
{
    let buf = vec![0u8; RECV_BUFFER_SIZE];

    stream::unfold((source, buf), move |(mut source, mut buf)| async move {
        match timeout(per_receive, source.recv_datagram(&mut buf)).await {
            Ok(Ok((0, addr))) => {
                debug!("Empty datagram from {}, closing listen window", addr);
                None
            }
            Ok(Ok((len, addr))) => {
                debug!("Received {} bytes from {}", len, addr);
                let payload = buf[..len].to_vec();
                Some((payload, (source, buf)))
            }
            Ok(Err(e)) => {
                debug!("Receive error, closing listen window: {}", e);
                None
            }
            Err(_) => {
                debug!("No reply within {:?}, closing listen window", per_receive);
                None
            }
        }
    })
}

/// Drain reply payloads into unique candidate URLs, first-seen order.
pub async fn collect_locations<P>(payloads: P) -> Vec<String>
where
    P: Stream<Item = Vec<u8>>,
{
    payloads
        .fold(LocationSet::new(), |mut set, payload| async move {
            set.extend_from_payload(&payload);
            set
        })
        .await
        .into_vec()
}

/// Run one discovery round and return the unique description URLs.
pub async fn discover(config: &DiscoveryConfig) -> Result<Vec<String>, TransportError> {
    discover_until(config, std::future::pending::<()>()).await
}

/// Like [`discover`], but the listen window also closes when `stop` completes.
pub async fn discover_until<F>(config: &DiscoveryConfig, stop: F) -> Result<Vec<String>, TransportError>
where
    F: Future<Output = ()>,
{
    let socket = start_round(config).await?;
    Ok(listen_until(socket, config.listen_timeout, stop).await)
}

/// Open the discovery socket and send the query once.
pub async fn start_round(config: &DiscoveryConfig) -> Result<UdpSocket, TransportError> {
    let socket = open_socket(config)?;
    if let Ok(local) = socket.local_addr() {
        debug!("Discovery socket bound to {}", local);
    }

    send_query(&socket, &build_query()).await?;
    Ok(socket)
}

/// Run the listen window on `source` and return the unique locations.
///
/// The window closes on the first receive timeout, an empty datagram, a
/// receive error, or when `stop` completes. `source` is dropped before this
/// returns.
pub async fn listen_until<S, F>(source: S, per_receive: Duration, stop: F) -> Vec<String>
where
    S: DatagramSource,
    F: Future<Output = ()>,
{
    let urls = collect_locations(listen(source, per_receive).take_until(stop)).await;
    info!("Discovery window closed with {} location(s)", urls.len());
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Instant;

    /// Replays scripted receive results, then never delivers again.
    struct ScriptedSource {
        script: VecDeque<std::io::Result<Vec<u8>>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<std::io::Result<Vec<u8>>>) -> Self {
            Self {
                script: script.into(),
            }
        }
    }

    #[async_trait]
    impl DatagramSource for ScriptedSource {
        async fn recv_datagram(&mut self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)> {
            let from: SocketAddr = "192.168.1.50:1900".parse().unwrap();
            match self.script.pop_front() {
                Some(Ok(data)) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok((data.len(), from))
                }
                Some(Err(e)) => Err(e),
                None => std::future::pending().await,
            }
        }
    }

    fn reply(location: &str) -> Vec<u8> {
        format!("HTTP/1.1 200 OK\r\nLOCATION: {}\r\n\r\n", location).into_bytes()
    }

    #[tokio::test]
    async fn test_silent_source_times_out() {
        let start = Instant::now();
        let payloads: Vec<Vec<u8>> = listen(ScriptedSource::new(vec![]), Duration::from_millis(300))
            .collect()
            .await;

        assert!(payloads.is_empty());
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_empty_datagram_ends_window() {
        let source = ScriptedSource::new(vec![
            Ok(reply("http://10.0.0.2/a.xml")),
            Ok(Vec::new()),
            Ok(reply("http://10.0.0.3/b.xml")),
        ]);

        let payloads: Vec<Vec<u8>> = listen(source, Duration::from_secs(5)).collect().await;
        assert_eq!(payloads, vec![reply("http://10.0.0.2/a.xml")]);
    }

    #[tokio::test]
    async fn test_receive_error_ends_window_quietly() {
        let source = ScriptedSource::new(vec![
            Ok(reply("http://10.0.0.2/a.xml")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
            Ok(reply("http://10.0.0.3/b.xml")),
        ]);

        let urls = collect_locations(listen(source, Duration::from_secs(5))).await;
        assert_eq!(urls, vec!["http://10.0.0.2/a.xml"]);
    }

    #[tokio::test]
    async fn test_duplicate_replies_collapse() {
        let source = ScriptedSource::new(vec![
            Ok(reply("http://10.0.0.2/a.xml")),
            Ok(reply("http://10.0.0.2/a.xml")),
            Ok(reply("http://10.0.0.4/c.xml")),
            Ok(reply("http://10.0.0.2/a.xml")),
        ]);

        let urls = collect_locations(listen(source, Duration::from_millis(200))).await;
        assert_eq!(urls, vec!["http://10.0.0.2/a.xml", "http://10.0.0.4/c.xml"]);
    }

    #[tokio::test]
    async fn test_stop_future_closes_window() {
        let start = Instant::now();
        let stop = tokio::time::sleep(Duration::from_millis(100));
        let urls = collect_locations(
            listen(ScriptedSource::new(vec![]), Duration::from_secs(30)).take_until(stop),
        )
        .await;

        assert!(urls.is_empty());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_stop_keeps_locations_seen_before_it() {
        let start = Instant::now();
        let source = ScriptedSource::new(vec![
            Ok(reply("http://10.0.0.2/a.xml")),
            Ok(reply("http://10.0.0.3/b.xml")),
        ]);

        let urls = listen_until(
            source,
            Duration::from_secs(30),
            tokio::time::sleep(Duration::from_millis(150)),
        )
        .await;

        assert_eq!(urls, vec!["http://10.0.0.2/a.xml", "http://10.0.0.3/b.xml"]);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_loopback_socket_replies() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        sender
            .send_to(&reply("http://127.0.0.1:8080/desc.xml"), target)
            .await
            .unwrap();
        sender
            .send_to(&reply("http://127.0.0.1:8080/desc.xml"), target)
            .await
            .unwrap();
        sender.send_to(&[], target).await.unwrap();
        sender
            .send_to(&reply("http://127.0.0.1:9090/late.xml"), target)
            .await
            .unwrap();

        let urls = collect_locations(listen(receiver, Duration::from_secs(2))).await;
        assert_eq!(urls, vec!["http://127.0.0.1:8080/desc.xml"]);
    }

    #[tokio::test]
    async fn test_create_socket_on_loopback() {
        let socket = create_discovery_socket(Ipv4Addr::LOCALHOST, 0).unwrap();
        let local = socket.local_addr().unwrap();
        assert_eq!(local.ip(), std::net::IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_ne!(local.port(), 0);
    }
}
