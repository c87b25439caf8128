//! # Routine Rust Backend
//!
//! Client-facing orchestration core for a university timetable generator.
//!
//! This crate owns the schedule-run lifecycle (generate, review, commit or
//! cancel) and the deterministic aggregation of generated schedule entries
//! into the views consumers need (by day, by room, by teacher), plus a CSV
//! export path. The constraint solver that actually places courses into time
//! slots is an external collaborator reached over the network; so are
//! master-data management and persistence.
//!
//! ## Features
//!
//! - **Lifecycle control**: DRAFT → COMMITTED/CANCELLED state machine with
//!   local transition guards checked before any remote call
//! - **Aggregation**: pure, idempotent day/room/teacher projections
//! - **Export**: reproducible CSV rendering with RFC-4180 quoting
//! - **Time grid**: the fixed weekly slot table including the lunch break
//! - **HTTP API**: RESTful endpoints for the React frontend
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects shared across the crate and the wire
//! - [`models`]: the static time grid model
//! - [`store`]: the session-scoped schedule entry store
//! - [`services`]: lifecycle controller, aggregation engine, export serializer
//! - [`remote`]: collaborator traits and their local/HTTP implementations
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod error;
pub mod models;
pub mod remote;
pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{RoutineError, RoutineResult};
