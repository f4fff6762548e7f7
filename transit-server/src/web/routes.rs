//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::{Node, NodeId};
use crate::planner::{AlgorithmResult, SearchError, bfs, compare, dijkstra, search_async};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(get_station))
        .route("/api/search", post(run_search))
        .route("/api/compare", post(run_compare))
        .route("/api/segments", post(route_segments))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations in graph order.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: state.graph.nodes().to_vec(),
    })
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Node>, AppError> {
    state
        .graph
        .node(&NodeId::new(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Station {id} not found"),
        })
}

/// Run one search.
async fn run_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<AlgorithmResult>, AppError> {
    let graph = &state.graph;
    let result = match req.algorithm {
        Algorithm::Dijkstra => dijkstra::search_with(graph, &req.start, &req.end, &state.config)?,
        Algorithm::Bfs => bfs::search_with(graph, &req.start, &req.end, &state.config)?,
        Algorithm::DijkstraOsrm => {
            search_async(graph, &req.start, &req.end, true, &state.routing, &state.config).await?
        }
    };

    Ok(Json(result))
}

/// Run Dijkstra and BFS on the same query and compare them.
async fn run_compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let graph = &state.graph;

    let (weighted, unweighted) = tokio::join!(
        search_async(
            graph,
            &req.start,
            &req.end,
            req.use_osrm_weights,
            &state.routing,
            &state.config,
        ),
        async { bfs::search_with(graph, &req.start, &req.end, &state.config) },
    );
    let (dijkstra, bfs) = (weighted?, unweighted?);

    let metrics = compare(&dijkstra, &bfs);
    Ok(Json(CompareResponse {
        dijkstra,
        bfs,
        metrics,
    }))
}

/// Segments and metrics for a computed path.
async fn route_segments(
    State(state): State<AppState>,
    Json(req): Json<SegmentsRequest>,
) -> Json<SegmentsResponse> {
    let segments = state
        .segments
        .get_route_segments(&req.path, &state.graph, req.mode)
        .await;
    let metrics = state
        .segments
        .get_route_metrics(&req.path, &state.graph, req.mode)
        .await;

    Json(SegmentsResponse {
        segments: segments.as_ref().clone(),
        metrics,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::UnknownNode(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
