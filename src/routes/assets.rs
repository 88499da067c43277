use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Generic static serving under the configured root: inferred content type,
/// 404 when nothing matches, traversal rejected.
pub async fn serve(state: &AppState, request: Request) -> Response {
    let result = ServeDir::new(state.root())
        .append_index_html_on_directories(false)
        .oneshot(request)
        .await;

    match result {
        Ok(response) => response.map(Body::new),
        Err(err) => {
            tracing::warn!("static serve failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
