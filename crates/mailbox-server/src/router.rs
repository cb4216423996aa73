//! Axum router wiring.
//!
//! `/` serves the mail page data as JSON; the rest are operational endpoints.

use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};

use mailbox_core::model::PageData;

use crate::{app_state::AppState, ops, page::cookies::jar_from_headers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(mail_page))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}

/// Always 200: load failures are reported in the `error` field.
async fn mail_page(State(state): State<AppState>, headers: HeaderMap) -> Json<PageData> {
    let jar = jar_from_headers(&headers);
    Json(state.page().load(&jar).await)
}
