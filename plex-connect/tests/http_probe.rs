//! HttpProbe against a mock media server

use std::time::Duration;

use mockito::{Matcher, Server};
use plex_connect::{
    AddressForm, Endpoint, HttpProbe, Probe, ProbeContext, ProbeFailure, ResolutionRequest, Resolver,
};

const IDENTITY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="1" friendlyName="Basement" machineIdentifier="f00dfeed" version="1.40.1" platform="Linux">
  <Directory count="1" key="library" title="library"/>
</MediaContainer>"#;

fn context(address: String, token: &str) -> ProbeContext {
    ProbeContext::new(address, token.into(), Duration::from_secs(2))
}

fn local_endpoint(server: &Server) -> Endpoint {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port.rsplit_once(':').unwrap();
    Endpoint::new("http", host, port.parse().unwrap(), true)
}

#[tokio::test]
async fn test_probe_returns_server_identity() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("x-plex-token", "secret")
        .match_header("x-plex-client-identifier", "client-1")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(IDENTITY)
        .create_async()
        .await;

    let probe = HttpProbe::with_headers(vec![(
        "X-Plex-Client-Identifier".to_string(),
        "client-1".to_string(),
    )]);
    let connection = probe.probe(&context(server.url(), "secret")).await.unwrap();

    assert_eq!(connection.machine_identifier, "f00dfeed");
    assert_eq!(connection.friendly_name.as_deref(), Some("Basement"));
    assert_eq!(connection.base_url, server.url());
    assert_eq!(connection.token(), "secret");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(401)
        .create_async()
        .await;

    let failure = HttpProbe::new()
        .probe(&context(server.url(), "stale"))
        .await
        .unwrap_err();

    assert_eq!(failure, ProbeFailure::Unauthorized("HTTP 401".to_string()));
}

#[tokio::test]
async fn test_non_identity_body_is_malformed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body("<MediaContainer size=\"0\"/>")
        .create_async()
        .await;

    let failure = HttpProbe::new()
        .probe(&context(server.url(), "secret"))
        .await
        .unwrap_err();

    assert!(matches!(failure, ProbeFailure::MalformedResponse(_)));
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let failure = HttpProbe::new()
        .probe(&context(server.url(), "secret"))
        .await
        .unwrap_err();

    assert_eq!(failure, ProbeFailure::Network("HTTP 503".to_string()));
}

#[tokio::test]
async fn test_resolver_skips_failing_endpoint() {
    let mut broken = Server::new_async().await;
    broken
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let mut healthy = Server::new_async().await;
    healthy
        .mock("GET", "/")
        .match_header("x-plex-token", Matcher::Any)
        .with_status(200)
        .with_body(IDENTITY)
        .create_async()
        .await;

    let request = ResolutionRequest::new("Basement", vec![local_endpoint(&broken), local_endpoint(&healthy)])
        .owned(true)
        .prefer(Some(AddressForm::Plain));
    let resolution = Resolver::new(HttpProbe::new())
        .resolve(&request, "secret")
        .await
        .unwrap();

    assert_eq!(resolution.address, healthy.url());
    assert_eq!(resolution.session.machine_identifier, "f00dfeed");
    assert_eq!(resolution.failures.len(), 1);
    assert_eq!(resolution.failures[0].address, broken.url());
}
