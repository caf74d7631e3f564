//! livepost server
//!
//! A GraphQL post board backed by an in-memory store:
//! - `posts` query, `addPost` mutation, `postAdded` subscription
//! - one endpoint for HTTP execution and WebSocket subscriptions
//! - static hosting for the bundled client

pub mod config;
pub mod context;
pub mod error;
pub mod graphql;
pub mod routes;
pub mod state;

pub use config::{Args, ServerConfig};
pub use context::{RequestContext, TransportKind};
pub use error::ServerError;
pub use state::AppState;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let endpoint = state.config.endpoint.clone();
    let assets = routes::static_files::assets(&state.config.client_dir);

    Router::new()
        // Health check
        .merge(routes::health::routes())
        // GraphQL over HTTP and WebSocket
        .merge(routes::graphql::routes(&endpoint))
        // Client bundle
        .route("/", get(routes::static_files::serve_index))
        .fallback_service(assets)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
