mod assets;
mod error;
mod livereload;
mod pages;

pub use error::AppError;

use axum::http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .merge(livereload::routes())
        .merge(pages::routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace::middleware))
                .layer(middleware::panic::middleware())
                // Permissive CORS on every response, so pages opened from
                // other local origins can still reach the poll endpoint.
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET, POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                )),
        )
        .with_state(state)
}
