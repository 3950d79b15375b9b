//! Axum router construction.

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with the static file handler and middleware attached.
///
/// Every path falls through to [`handlers::serve_file`]; there are no other routes.
pub fn build(state: AppState) -> Router {
    let mut router = Router::new().fallback(handlers::serve_file);
    for layer in middleware::fixed_header_layers() {
        router = router.layer(layer);
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .with_state(state)
}
