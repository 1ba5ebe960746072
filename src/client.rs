//! HTTP/3 client construction

use crate::{
    error::{AppError, Result},
    probe::ProbeConfig,
};
use reqwest::{Certificate, Client};

/// User agent sent with every probe
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a client that speaks HTTP/3 only
///
/// The client is meant to serve a single probe: it owns its QUIC endpoint
/// and connection, and both are closed when the client is dropped. Redirects
/// follow reqwest's default policy (up to 10 hops), and a redirect counts
/// toward the measured latency.
pub fn build_h3_client(config: &ProbeConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .http3_prior_knowledge()
        .timeout(config.timeout)
        .user_agent(USER_AGENT);

    for bytes in &config.root_certificates {
        builder = builder.add_root_certificate(parse_certificate(bytes)?);
    }

    builder.build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP/3 client: {}", e)))
}

/// Wrap root certificate bytes given as PEM or DER
///
/// With rustls the bytes are only decoded when the client is built, so a
/// malformed certificate surfaces from `build_h3_client`.
pub fn parse_certificate(bytes: &[u8]) -> Result<Certificate> {
    let result = if is_pem(bytes) {
        Certificate::from_pem(bytes)
    } else {
        Certificate::from_der(bytes)
    };

    result.map_err(|e| AppError::tls(format!("Invalid root certificate: {}", e)))
}

fn is_pem(bytes: &[u8]) -> bool {
    bytes
        .windows(b"-----BEGIN".len())
        .any(|window| window == b"-----BEGIN")
}
