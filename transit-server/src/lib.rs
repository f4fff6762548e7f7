//! Transit pathfinding server.
//!
//! Shortest-path search over a multi-modal transit network, with
//! step-by-step traces for visualisation, optional road-network weights
//! from an OSRM routing service, and renderable route segments.

pub mod cache;
pub mod domain;
pub mod osrm;
pub mod planner;
pub mod segments;
pub mod transfer;
pub mod web;
