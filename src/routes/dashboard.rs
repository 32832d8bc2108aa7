//! Dashboard page and network selection.
//!
//! DESIGN
//! ======
//! `GET /` answers at once with a streamed body. The board refresh runs in a
//! spawned task and pushes one rendered slice per step into a channel: the
//! page shell with its loaders first, then each table as its load lands.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use futures::StreamExt;
use serde::Deserialize;

use crate::board::AssetBoard;
use crate::chain::RegistryKind;
use crate::network::{Network, NetworkSelector, share_url};
use crate::state::AppState;
use crate::view::render_step;

/// Query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub network: Option<String>,
    /// Focused external asset id.
    pub external: Option<String>,
    /// Focused local asset id.
    pub local: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectQuery {
    pub network: Option<String>,
}

/// `GET /`: stream the page for the URL's network while both registries load.
pub async fn index(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Response {
    let mut selector = NetworkSelector::initial(None, state.config.default_network);
    let mut board = AssetBoard::new(selector.network());
    if selector.reconcile(query.network.as_deref()) {
        board.reset(selector.network());
    }
    board.select(RegistryKind::External, parse_focus(query.external.as_deref()));
    board.select(RegistryKind::Local, parse_focus(query.local.as_deref()));

    let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
    tokio::spawn(async move {
        let network = board.network();
        board
            .refresh(state.chains.as_ref(), state.config.fetch_concurrency, move |board, step| {
                if tx.unbounded_send(render_step(board, step)).is_err() {
                    tracing::debug!(%network, ?step, "client left before the page finished");
                }
            })
            .await;
    });

    let body = Body::from_stream(rx.map(Ok::<_, Infallible>));
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response()
}

/// `GET /select?network=`: redirect to the shareable URL for the pick.
///
/// Unknown values fall back to the configured default.
pub async fn select_network(State(state): State<AppState>, Query(query): Query<SelectQuery>) -> Redirect {
    let mut selector = NetworkSelector::initial(None, state.config.default_network);
    let url = match query.network.as_deref().and_then(Network::parse) {
        Some(network) => selector.select(network),
        None => {
            tracing::warn!(value = ?query.network, "ignoring unknown network selection");
            share_url(selector.network())
        }
    };
    Redirect::temporary(&url)
}

/// Empty or non-numeric ids mean "nothing selected".
pub(crate) fn parse_focus(raw: Option<&str>) -> Option<u128> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
