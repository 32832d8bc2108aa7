use super::*;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::sync::Semaphore;

use crate::chain::{ChainConnector, ChainError, ChainQuery};
use crate::config::DashboardConfig;
use crate::state::test_helpers::{self, MockChain, MockConnector};

/// Holds every `connect` until `open` is called.
struct GatedConnector {
    inner: MockConnector,
    gate: Semaphore,
}

impl GatedConnector {
    fn new(chain: MockChain) -> Self {
        Self { inner: MockConnector::new(chain), gate: Semaphore::new(0) }
    }

    fn open(&self) {
        self.gate.add_permits(RegistryKind::ALL.len());
    }
}

#[async_trait::async_trait]
impl ChainConnector for GatedConnector {
    async fn connect(&self, network: Network) -> Result<Arc<dyn ChainQuery>, ChainError> {
        let _permit = self.gate.acquire().await.map_err(|e| ChainError::Request(e.to_string()))?;
        self.inner.connect(network).await
    }
}

async fn page_html(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn sample_chain() -> MockChain {
    MockChain::new()
        .with_external(42, "Polkadot", "xcDOT", test_helpers::relay_location())
        .with_external(43, "Acala", "xcACA", test_helpers::parachain_location(2000))
        .with_local(7, "Local Token", "LTK")
}

fn state_with(chain: MockChain) -> (AppState, Arc<MockConnector>) {
    let connector = Arc::new(MockConnector::new(chain));
    let state = AppState::new(Arc::new(DashboardConfig::default()), connector.clone());
    (state, connector)
}

fn query(network: Option<&str>, external: Option<&str>, local: Option<&str>) -> DashboardQuery {
    DashboardQuery {
        network: network.map(str::to_string),
        external: external.map(str::to_string),
        local: local.map(str::to_string),
    }
}

// =========================================================================
// parse_focus
// =========================================================================

#[test]
fn parse_focus_accepts_decimal_ids() {
    assert_eq!(parse_focus(Some("42")), Some(42));
    assert_eq!(parse_focus(Some(" 7 ")), Some(7));
    assert_eq!(
        parse_focus(Some("42259045809535163221576417993425387648")),
        Some(42_259_045_809_535_163_221_576_417_993_425_387_648)
    );
}

#[test]
fn parse_focus_treats_blank_and_garbage_as_unselected() {
    assert_eq!(parse_focus(None), None);
    assert_eq!(parse_focus(Some("")), None);
    assert_eq!(parse_focus(Some("abc")), None);
    assert_eq!(parse_focus(Some("-1")), None);
}

// =========================================================================
// index
// =========================================================================

#[tokio::test]
async fn index_renders_requested_network() {
    let (state, connector) = state_with(sample_chain());

    let response = index(State(state), Query(query(Some("moonriver"), None, None))).await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
    let html = page_html(response).await;

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</html>"));
    assert!(html.contains("Polkadot"));
    assert!(html.contains("Local Token"));
    assert!(!html.contains("Min. Balance"));
    assert_eq!(connector.connected_to(), vec![Network::Moonriver, Network::Moonriver]);
}

#[tokio::test]
async fn index_falls_back_to_default_for_unknown_network() {
    let (state, connector) = state_with(sample_chain());

    let _ = page_html(index(State(state), Query(query(Some("kusama"), None, None))).await).await;

    assert_eq!(connector.connected_to(), vec![Network::Moonbeam, Network::Moonbeam]);
}

#[tokio::test]
async fn index_renders_focused_asset_details() {
    let (state, _connector) = state_with(sample_chain());

    let html = page_html(index(State(state), Query(query(None, Some("43"), Some("7")))).await).await;

    assert_eq!(html.matches("Min. Balance").count(), 2);
    assert!(html.contains("1,000,043"));
    assert!(html.contains("1,000,007"));
}

#[tokio::test]
async fn index_shows_banner_when_node_unreachable() {
    let (state, _connector) = state_with(MockChain::new().failing_connect("connection refused"));

    let html = page_html(index(State(state), Query(DashboardQuery::default())).await).await;

    assert!(html.contains("Oops!"));
    assert!(html.contains("RPC request failed: connection refused"));
    assert!(html.contains("#external-loader{display:none}"));
    assert!(html.contains("#local-loader{display:none}"));
}

#[tokio::test]
async fn index_flushes_loaders_while_node_is_slow() {
    let connector = Arc::new(GatedConnector::new(sample_chain()));
    let state = AppState::new(Arc::new(DashboardConfig::default()), connector.clone());

    let page = index(State(state), Query(DashboardQuery::default()));
    let response = tokio::time::timeout(Duration::from_millis(500), page)
        .await
        .expect("page answered while registries were still loading");
    let mut body = response.into_body().into_data_stream();

    let first = tokio::time::timeout(Duration::from_millis(500), body.next())
        .await
        .expect("first slice flushed while registries were still loading")
        .unwrap()
        .unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.starts_with("<!DOCTYPE html>"));
    assert!(first.contains("External XC-20s"));
    assert!(first.contains(r#"id="external-loader""#));
    assert!(first.contains("Loading"));
    assert!(!first.contains("Polkadot"));

    assert!(tokio::time::timeout(Duration::from_millis(50), body.next()).await.is_err());

    connector.open();
    let mut rest = String::new();
    while let Some(chunk) = body.next().await {
        rest.push_str(std::str::from_utf8(&chunk.unwrap()).unwrap());
    }
    assert!(rest.contains("Polkadot"));
    assert!(rest.contains("Local Token"));
    assert!(rest.contains("#external-loader{display:none}"));
    assert!(rest.contains("#local-loader{display:none}"));
    assert!(rest.ends_with("</html>"));
    assert!(!rest.contains("Oops!"));
}

// =========================================================================
// select_network
// =========================================================================

#[tokio::test]
async fn select_redirects_to_share_url() {
    let (state, _connector) = state_with(MockChain::new());

    let response = select_network(State(state), Query(SelectQuery { network: Some("moonbase".into()) }))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/?network=moonbase");
}

#[tokio::test]
async fn select_unknown_network_redirects_to_default() {
    let (state, _connector) = state_with(MockChain::new());

    let response = select_network(State(state), Query(SelectQuery { network: Some("polkadot".into()) }))
        .await
        .into_response();

    assert_eq!(response.headers()["location"], "/?network=moonbeam");
}
