//! confpilot-api — HTTP surface for confpilot.
//!
//! # Coordinator routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | POST | `/message` | Apply a natural-language config change |
//! | GET | `/healthz` | Liveness |
//!
//! # Store routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/{app_name}` | Schema or values document for an application |
//!
//! Every path segment on a store router is an application name, so stores
//! carry no other routes.

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use confpilot_coordinator::Coordinator;
use confpilot_store::DocumentStore;

/// Shared state for coordinator handlers.
#[derive(Clone)]
pub struct CoordinatorState {
    pub coordinator: Arc<Coordinator>,
}

/// Shared state for store handlers.
#[derive(Clone)]
pub struct StoreState {
    pub store: DocumentStore,
}

/// Build the coordinator router.
pub fn coordinator_router(coordinator: Coordinator) -> Router {
    let state = CoordinatorState {
        coordinator: Arc::new(coordinator),
    };

    Router::new()
        .route("/message", post(handlers::handle_message))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Build the router for a schema or values store.
pub fn store_router(store: DocumentStore) -> Router {
    let state = StoreState { store };

    Router::new()
        .route("/{app_name}", get(handlers::get_document))
        .with_state(state)
}
