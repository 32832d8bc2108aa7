//! JSON API over the asset registries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::chain::{ChainError, RegistryKind};
use crate::network::{Network, NetworkOption, network_options};
use crate::registry::{AssetRecord, DropdownOption, load_registry};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AssetsResponse {
    pub network: Network,
    pub kind: RegistryKind,
    pub records: Vec<AssetRecord>,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /api/networks`
pub async fn list_networks() -> Json<Vec<NetworkOption>> {
    Json(network_options())
}

/// `GET /api/assets/{network}/{kind}`: one registry in display order.
pub async fn list_assets(
    State(state): State<AppState>,
    Path((network, kind)): Path<(String, String)>,
) -> Result<Json<AssetsResponse>, Response> {
    let network = Network::parse(&network)
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, format!("unknown network '{network}'")))?;
    let kind = RegistryKind::parse(&kind)
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, format!("unknown registry kind '{kind}'")))?;

    let registry = load_registry(state.chains.as_ref(), network, kind, state.config.fetch_concurrency)
        .await
        .map_err(|e| {
            tracing::warn!(%network, kind = kind.as_str(), error = %e, "registry request failed");
            error_response(chain_error_to_status(&e), e.to_string())
        })?;

    Ok(Json(AssetsResponse { network, kind, records: registry.records, options: registry.options }))
}

pub(crate) fn chain_error_to_status(err: &ChainError) -> StatusCode {
    match err {
        ChainError::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ChainError::Request(_)
        | ChainError::Status { .. }
        | ChainError::Rpc { .. }
        | ChainError::Parse(_)
        | ChainError::Decode { .. }
        | ChainError::MalformedKey(_)
        | ChainError::MissingEntry { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
