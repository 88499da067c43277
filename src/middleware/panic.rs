use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

fn handle_panic(error: Box<dyn Any + Send + 'static>) -> Response {
    let detail = error
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| error.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!("handler panicked: {detail}");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

pub fn middleware() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic)
}
