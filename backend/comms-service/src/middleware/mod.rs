pub mod auth;
pub mod guards;
pub mod logging;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Apply default middleware layers (logging, CORS).
pub fn with_defaults(router: Router<AppState>) -> Router<AppState> {
    logging::add_tracing(router).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
