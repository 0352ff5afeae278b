use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use gelf_tee_core::api::{LogSink, SinkConfig};
use tokio::net::UdpSocket;

use super::chunk;

/// Fire-and-forget GELF over UDP.
///
/// Resolution and bind happen once in [`GelfUdpSink::connect`]. If either
/// fails the sink stays usable and drops every payload.
pub struct GelfUdpSink {
    socket: Option<UdpSocket>,
    target: String,
    max_chunk_size: usize,
    compress: bool,
}

impl GelfUdpSink {
    pub async fn connect(cfg: &SinkConfig) -> Self {
        let target = cfg.address();
        let socket = match open_socket(&target).await {
            Ok(socket) => Some(socket),
            Err(e) => {
                tracing::debug!(
                    addr = %target,
                    error = %e,
                    "gelf sink unavailable, records will be dropped"
                );
                None
            }
        };

        Self {
            socket,
            target,
            max_chunk_size: cfg.max_chunk_size,
            compress: cfg.compress,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

async fn open_socket(target: &str) -> std::io::Result<UdpSocket> {
    let addr = tokio::net::lookup_host(target)
        .await?
        .next()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no address resolved"))?;
    let local = if addr.is_ipv4() {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
    } else {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
    };
    let socket = UdpSocket::bind(local).await?;
    socket.connect(addr).await?;
    Ok(socket)
}

#[async_trait]
impl LogSink for GelfUdpSink {
    fn name(&self) -> &str {
        "gelf-udp"
    }

    async fn send(&self, payload: &[u8]) {
        let Some(socket) = &self.socket else {
            return;
        };

        let data = if self.compress {
            match chunk::zlib(payload) {
                Ok(d) => d,
                Err(e) => {
                    tracing::debug!(error = %e, "gelf compression failed, dropping record");
                    return;
                }
            }
        } else {
            payload.to_vec()
        };

        let Some(datagrams) = chunk::chunk(&data, self.max_chunk_size, chunk::message_id()) else {
            tracing::debug!(bytes = data.len(), "gelf record too large to chunk, dropping");
            return;
        };

        for dgram in datagrams {
            if let Err(e) = socket.send(&dgram).await {
                tracing::debug!(addr = %self.target, error = %e, "gelf send failed");
                return;
            }
        }
    }
}
