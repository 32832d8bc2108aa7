mod address;
mod board;
mod chain;
mod config;
mod network;
mod registry;
mod routes;
mod state;
mod view;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Arc::new(config::DashboardConfig::from_env().expect("invalid configuration"));
    let port = config.port;
    tracing::info!(
        default_network = %config.default_network,
        fetch_concurrency = config.fetch_concurrency,
        "configuration loaded"
    );

    let chains = Arc::new(chain::rpc::RpcConnector::new(&config).expect("failed to build RPC clients"));
    let state = state::AppState::new(config, chains);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "xc20 dashboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
