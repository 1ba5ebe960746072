//! HTTP/3 latency probe
//!
//! A probe issues one GET over HTTP/3 and times it from the moment the
//! request is sent until the response headers arrive. The body is never
//! read; the response is dropped as soon as its status line has been seen,
//! which releases the stream. Every probe builds its own client, so no
//! connection outlives the call.
//!
//! Two entry points share the same work: [`Probe::probe`] reports why a
//! probe failed, and [`Probe::measure`] collapses any failure to `0`.

use crate::{
    client,
    error::{AppError, Result},
    logging::ProbeLogger,
    models::LatencyMeasurement,
};
use async_trait::async_trait;
use reqwest::{Url, Version};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Settings for a single probe
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Total time allowed for the request, from send until headers arrive
    pub timeout: Duration,
    /// Extra trust anchors (PEM or DER) added to the built-in webpki roots
    pub root_certificates: Vec<Vec<u8>>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            root_certificates: Vec::new(),
        }
    }
}

impl ProbeConfig {
    /// Set the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Trust an additional root certificate
    pub fn with_root_certificate(mut self, certificate: impl Into<Vec<u8>>) -> Self {
        self.root_certificates.push(certificate.into());
        self
    }
}

/// Latency probe abstraction, so callers can substitute their own
#[async_trait]
pub trait Probe: Send + Sync {
    /// Time one request, reporting the failure reason on error
    async fn probe(&self, url: &str) -> Result<LatencyMeasurement>;

    /// Time one request in whole milliseconds, or 0 if it failed
    async fn measure(&self, url: &str) -> u64 {
        self.probe(url).await.map(|m| m.millis()).unwrap_or(0)
    }
}

/// HTTP/3 latency probe
#[derive(Clone, Default)]
pub struct LatencyProbe {
    config: ProbeConfig,
    logger: ProbeLogger,
}

impl LatencyProbe {
    /// Create a probe; failures are only logged at error level
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            logger: ProbeLogger::quiet(),
        }
    }

    /// Replace the probe's logger
    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    async fn execute(&self, url: &str) -> Result<LatencyMeasurement> {
        let target = Url::parse(url)?;
        if target.scheme() != "https" {
            return Err(AppError::validation(format!(
                "unsupported protocol scheme \"{}\": HTTP/3 requires https",
                target.scheme()
            )));
        }

        let client = client::build_h3_client(&self.config)?;
        let request = client.get(target).version(Version::HTTP_3);

        let start = Instant::now();

        // reqwest enforces the same deadline; this also bounds connection setup
        let response = timeout(self.config.timeout, request.send()).await
            .map_err(|_| AppError::timeout(format!(
                "no response headers within {}ms", self.config.timeout.as_millis()
            )))??;

        let http_status = response.status().as_u16();
        let http_version = format!("{:?}", response.version());

        // Release the stream without reading the body
        drop(response);

        let elapsed = start.elapsed();
        Ok(LatencyMeasurement::new(url.to_string(), elapsed, http_status, http_version))
    }
}

#[async_trait]
impl Probe for LatencyProbe {
    async fn probe(&self, url: &str) -> Result<LatencyMeasurement> {
        let correlation_id = self.logger
            .log_probe_start(url, self.config.timeout.as_millis())
            .await;

        let outcome = self.execute(url).await;

        match &outcome {
            Ok(measurement) => self.logger.log_probe_success(&correlation_id, measurement).await,
            Err(error) => self.logger.log_probe_failure(&correlation_id, url, error).await,
        }

        outcome
    }
}

/// Measure one HTTP/3 request against `url` with default settings
///
/// Returns the elapsed milliseconds, or 0 if the request failed for any
/// reason (bad URL, non-https scheme, DNS, connect, TLS, protocol, timeout).
pub async fn measure(url: &str) -> u64 {
    LatencyProbe::default().measure(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<u64>);

    #[async_trait]
    impl Probe for FixedProbe {
        async fn probe(&self, url: &str) -> Result<LatencyMeasurement> {
            match self.0 {
                Some(ms) => Ok(LatencyMeasurement::new(
                    url.to_string(),
                    Duration::from_millis(ms),
                    200,
                    "HTTP/3.0".to_string(),
                )),
                None => Err(AppError::network("connection refused")),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.root_certificates.is_empty());
    }

    #[test]
    fn test_config_builders() {
        let config = ProbeConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_root_certificate(vec![1u8, 2, 3]);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.root_certificates, vec![vec![1u8, 2, 3]]);
    }

    #[tokio::test]
    async fn test_measure_collapses_failure_to_zero() {
        assert_eq!(FixedProbe(None).measure("https://localhost/").await, 0);
        assert_eq!(FixedProbe(Some(37)).measure("https://localhost/").await, 37);
    }

    #[tokio::test]
    async fn test_malformed_url_is_parse_error() {
        let probe = LatencyProbe::new(ProbeConfig::default());
        let err = probe.probe("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(probe.measure("not a url").await, 0);
    }

    #[tokio::test]
    async fn test_non_https_scheme_is_validation_error() {
        let probe = LatencyProbe::new(ProbeConfig::default());
        for url in ["http://localhost/", "ftp://localhost/"] {
            let err = probe.probe(url).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{}: {:?}", url, err);
            assert!(err.to_string().contains("unsupported protocol scheme"));
        }
        assert_eq!(probe.measure("http://localhost/").await, 0);
    }

    #[tokio::test]
    async fn test_crate_level_measure_rejects_empty_url() {
        assert_eq!(measure("").await, 0);
    }
}
