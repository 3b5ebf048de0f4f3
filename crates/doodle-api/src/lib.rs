pub mod doodles;
pub mod error;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};

use crate::store::DoodleStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: DoodleStore,
}

/// All doodle routes, without transport layers (CORS, tracing).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/doodles", put(doodles::create).fallback(doodles::unsupported))
        .route(
            "/doodles/{day}",
            get(doodles::list_by_day).fallback(doodles::unsupported),
        )
        .route(
            "/doodles/{day}/",
            get(doodles::list_by_day).fallback(doodles::unsupported),
        )
        .route(
            "/doodles/{day}/{ts}",
            get(doodles::get_one)
                .delete(doodles::remove)
                .fallback(doodles::unsupported),
        )
        .route("/health", get(doodles::health))
        .fallback(doodles::unsupported)
        .with_state(state)
}
