//! Local HTTP/3 server for integration tests
//!
//! Serves every request on 127.0.0.1 with a fresh self-signed certificate,
//! either after a fixed delay or never. Counts accepted and currently open
//! QUIC connections so tests can check that probes close what they open.

#![allow(dead_code)]

use bytes::Bytes;
use h3_latency_probe::ProbeConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How the server answers requests
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Wait, then answer 200 OK with a short body
    Delay(Duration),
    /// Accept the request and never send response headers
    Silent,
}

pub struct TestServer {
    addr: SocketAddr,
    cert_der: CertificateDer<'static>,
    accepted: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    endpoint: quinn::Endpoint,
}

impl TestServer {
    /// Start a server on an ephemeral UDP port; must run inside a tokio runtime
    pub fn start(behavior: Behavior) -> Self {
        let certified = rcgen::generate_simple_self_signed(vec![
            "localhost".to_string(),
            "127.0.0.1".to_string(),
        ])
        .unwrap();
        let cert_der = certified.cert.der().clone();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let mut tls = rustls::ServerConfig::builder_with_provider(provider)
            .with_protocol_versions(&[&rustls::version::TLS13])
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![cert_der.clone()], key)
            .unwrap();
        tls.alpn_protocols = vec![b"h3".to_vec()];

        let crypto = quinn::crypto::rustls::QuicServerConfig::try_from(tls).unwrap();
        let server_config = quinn::ServerConfig::with_crypto(Arc::new(crypto));
        let endpoint = quinn::Endpoint::server(server_config, "127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = endpoint.local_addr().unwrap();

        let accepted = Arc::new(AtomicUsize::new(0));
        let active = Arc::new(AtomicUsize::new(0));

        tokio::spawn(accept_loop(endpoint.clone(), behavior, accepted.clone(), active.clone()));

        Self {
            addr,
            cert_der,
            accepted,
            active,
            endpoint,
        }
    }

    pub fn url(&self) -> String {
        format!("https://127.0.0.1:{}/", self.addr.port())
    }

    pub fn cert_der(&self) -> &[u8] {
        self.cert_der.as_ref()
    }

    /// Probe settings that trust this server's certificate
    pub fn probe_config(&self, timeout: Duration) -> ProbeConfig {
        ProbeConfig::default()
            .with_timeout(timeout)
            .with_root_certificate(self.cert_der().to_vec())
    }

    /// QUIC connections accepted so far
    pub fn accepted_connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// QUIC connections not yet closed
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait until every connection has closed, up to `limit`
    pub async fn wait_until_idle(&self, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if self.active_connections() == 0 {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        self.active_connections() == 0
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.endpoint.close(0u32.into(), b"test over");
    }
}

async fn accept_loop(
    endpoint: quinn::Endpoint,
    behavior: Behavior,
    accepted: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
) {
    while let Some(incoming) = endpoint.accept().await {
        let accepted = accepted.clone();
        let active = active.clone();

        tokio::spawn(async move {
            let Ok(connection) = incoming.await else {
                return;
            };
            accepted.fetch_add(1, Ordering::SeqCst);
            active.fetch_add(1, Ordering::SeqCst);

            serve_connection(connection, behavior).await;

            active.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

async fn serve_connection(connection: quinn::Connection, behavior: Behavior) {
    let mut h3_conn: h3::server::Connection<h3_quinn::Connection, Bytes> =
        match h3::server::Connection::new(h3_quinn::Connection::new(connection)).await {
            Ok(conn) => conn,
            Err(_) => return,
        };

    // Runs until the client closes the connection
    while let Ok(Some(resolver)) = h3_conn.accept().await {
        tokio::spawn(async move {
            let Ok((_request, mut stream)) = resolver.resolve_request().await else {
                return;
            };

            match behavior {
                Behavior::Delay(delay) => {
                    tokio::time::sleep(delay).await;
                    let response = http::Response::builder()
                        .status(http::StatusCode::OK)
                        .body(())
                        .unwrap();
                    if stream.send_response(response).await.is_ok() {
                        let _ = stream.send_data(Bytes::from_static(b"pong")).await;
                        let _ = stream.finish().await;
                    }
                }
                Behavior::Silent => {
                    // Hold the stream open without ever answering
                    let _stream = stream;
                    std::future::pending::<()>().await;
                }
            }
        });
    }
}

/// A UDP port on 127.0.0.1 with nothing listening on it
pub fn closed_port() -> u16 {
    let socket = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap().port()
}
