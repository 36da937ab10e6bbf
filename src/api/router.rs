use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use super::{handlers, AppState};
use crate::rules::{Ip, Port, Url};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Liveness (plain text)
        .route("/", get(handlers::health::liveness))
        // Per-kind add/remove
        .route(
            "/api/firewall/ip",
            post(handlers::kind::add::<Ip>).delete(handlers::kind::remove::<Ip>),
        )
        .route(
            "/api/firewall/url",
            post(handlers::kind::add::<Url>).delete(handlers::kind::remove::<Url>),
        )
        .route(
            "/api/firewall/port",
            post(handlers::kind::add::<Port>).delete(handlers::kind::remove::<Port>),
        )
        // Full snapshot + bulk active-status update
        .route(
            "/api/firewall/rules",
            get(handlers::rules::list_all).put(handlers::rules::update_status),
        )
        .with_state(state)
}
