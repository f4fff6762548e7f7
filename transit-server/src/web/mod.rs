//! Web layer for the transit pathfinding engine.
//!
//! Provides JSON endpoints for listing stations, running and comparing
//! searches, and building route segments.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
