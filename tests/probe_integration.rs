//! Probe behavior against a local HTTP/3 server
//!
//! Covers the reachable, delayed, silent, closed-port, plain-http and
//! malformed-URL cases, plus connection cleanup across repeated probes.

mod common;

use common::{closed_port, Behavior, TestServer};
use h3_latency_probe::{AppError, LatencyProbe, Probe, ProbeConfig};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_reachable_server_returns_positive_latency() {
    let server = TestServer::start(Behavior::Delay(Duration::from_millis(20)));
    let probe = LatencyProbe::new(server.probe_config(Duration::from_secs(5)));

    let ms = probe.measure(&server.url()).await;
    assert!(ms >= 20, "expected at least the injected delay, got {}ms", ms);
    assert!(ms < 2_000, "local probe took {}ms", ms);
}

#[tokio::test]
async fn test_probe_reports_status_and_http3() {
    let server = TestServer::start(Behavior::Delay(Duration::ZERO));
    let probe = LatencyProbe::new(server.probe_config(Duration::from_secs(5)));

    let measurement = probe.probe(&server.url()).await.unwrap();
    assert_eq!(measurement.http_status, 200);
    assert_eq!(measurement.http_version, "HTTP/3.0");
    assert_eq!(measurement.url, server.url());
}

#[tokio::test]
async fn test_half_second_delay_measures_in_range() {
    let server = TestServer::start(Behavior::Delay(Duration::from_millis(500)));
    let probe = LatencyProbe::new(server.probe_config(Duration::from_secs(5)));

    for _ in 0..3 {
        let ms = probe.measure(&server.url()).await;
        assert!((500..600).contains(&ms), "expected [500, 600), got {}ms", ms);
    }
}

#[tokio::test]
async fn test_silent_server_times_out_at_boundary() {
    let server = TestServer::start(Behavior::Silent);
    let timeout = Duration::from_millis(1_000);
    let probe = LatencyProbe::new(server.probe_config(timeout));

    let start = Instant::now();
    let result = probe.probe(&server.url()).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(AppError::Timeout(_))), "got {:?}", result);
    assert!(elapsed >= timeout, "returned early after {:?}", elapsed);
    assert!(elapsed < timeout + Duration::from_millis(750), "returned late after {:?}", elapsed);
}

#[tokio::test]
async fn test_silent_server_measure_returns_zero() {
    let server = TestServer::start(Behavior::Silent);
    let probe = LatencyProbe::new(server.probe_config(Duration::from_millis(300)));

    assert_eq!(probe.measure(&server.url()).await, 0);
}

#[tokio::test]
#[ignore = "waits for the full 10 second default timeout"]
async fn test_silent_server_default_timeout() {
    let server = TestServer::start(Behavior::Silent);
    let probe = LatencyProbe::new(server.probe_config(ProbeConfig::default().timeout));

    let start = Instant::now();
    assert_eq!(probe.measure(&server.url()).await, 0);
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(10), "returned early after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(11), "returned late after {:?}", elapsed);
}

#[tokio::test]
async fn test_closed_port_returns_zero() {
    let url = format!("https://127.0.0.1:{}/", closed_port());
    let timeout = Duration::from_millis(1_500);
    let probe = LatencyProbe::new(ProbeConfig::default().with_timeout(timeout));

    let start = Instant::now();
    let result = probe.probe(&url).await;
    assert!(result.is_err(), "closed port answered: {:?}", result);
    assert_eq!(probe.measure(&url).await, 0);
    // Two probes, each bounded by the timeout
    assert!(start.elapsed() < timeout * 2 + Duration::from_secs(1));
}

#[tokio::test]
async fn test_invalid_url_returns_zero_promptly() {
    let probe = LatencyProbe::new(ProbeConfig::default());

    for url in ["", "not a url", "https://", "://missing-scheme"] {
        let start = Instant::now();
        assert_eq!(probe.measure(url).await, 0, "url {:?}", url);
        assert!(start.elapsed() < Duration::from_secs(1), "url {:?} was slow", url);
    }
}

#[tokio::test]
async fn test_plain_http_url_returns_zero_without_connecting() {
    let server = TestServer::start(Behavior::Delay(Duration::ZERO));
    let probe = LatencyProbe::new(server.probe_config(Duration::from_secs(5)));
    let url = server.url().replacen("https://", "http://", 1);

    let result = probe.probe(&url).await;
    assert!(matches!(result, Err(AppError::Validation(_))), "got {:?}", result);
    assert_eq!(probe.measure(&url).await, 0);
    assert_eq!(server.accepted_connections(), 0);

    // The same server answers once the scheme is https
    assert!(probe.probe(&server.url()).await.is_ok());
}

#[tokio::test]
async fn test_untrusted_certificate_fails() {
    let server = TestServer::start(Behavior::Delay(Duration::ZERO));
    // Built-in roots only: the self-signed certificate is rejected
    let probe = LatencyProbe::new(ProbeConfig::default().with_timeout(Duration::from_secs(3)));

    let result = probe.probe(&server.url()).await;
    assert!(result.is_err(), "self-signed certificate was accepted");
    assert_eq!(probe.measure(&server.url()).await, 0);
}

#[tokio::test]
async fn test_each_probe_opens_and_closes_its_own_connection() {
    let server = TestServer::start(Behavior::Delay(Duration::ZERO));
    let probe = LatencyProbe::new(server.probe_config(Duration::from_secs(5)));

    const PROBES: usize = 5;
    for _ in 0..PROBES {
        let result = probe.probe(&server.url()).await;
        assert!(result.is_ok(), "probe failed: {:?}", result.err());
    }

    assert_eq!(server.accepted_connections(), PROBES);
    assert!(
        server.wait_until_idle(Duration::from_secs(5)).await,
        "{} connections still open after {} probes",
        server.active_connections(),
        PROBES
    );
}

#[tokio::test]
async fn test_crate_level_measure_uses_defaults() {
    // No trust anchor for the test server, so the default probe fails and collapses
    let server = TestServer::start(Behavior::Delay(Duration::ZERO));
    assert_eq!(h3_latency_probe::measure(&server.url()).await, 0);
}
