use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_server::cache::CacheConfig;
use transit_server::domain::Graph;
use transit_server::osrm::{OsrmClient, OsrmConfig};
use transit_server::planner::SearchConfig;
use transit_server::transfer::{TransferConfig, with_transfers};
use transit_server::web::{AppState, create_router};

const DEFAULT_GRAPH_PATH: &str = "data/network.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load the network and add walking transfers between nearby stations
    let graph_path = std::env::var("GRAPH_PATH").unwrap_or_else(|_| DEFAULT_GRAPH_PATH.to_string());
    let network = Graph::load(&graph_path)?;
    let graph = with_transfers(&network, &TransferConfig::default());
    info!(
        path = %graph_path,
        stations = graph.node_count(),
        edges = graph.edge_count(),
        transfers = graph.edge_count() - network.edge_count(),
        "loaded transit network"
    );

    // Routing service client
    let mut osrm_config = OsrmConfig::default();
    if let Ok(url) = std::env::var("OSRM_BASE_URL") {
        osrm_config = osrm_config.with_base_url(url);
    }
    info!(base_url = %osrm_config.base_url, "using routing service");
    let client = OsrmClient::new(osrm_config)?;

    let state = AppState::new(graph, client, &CacheConfig::default(), SearchConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    info!(%addr, "transit server listening");
    info!("  GET  /health            - Health check");
    info!("  GET  /api/stations      - List stations");
    info!("  POST /api/search        - Run dijkstra, bfs or dijkstra-osrm");
    info!("  POST /api/compare       - Compare dijkstra with bfs");
    info!("  POST /api/segments      - Route segments for a path");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
