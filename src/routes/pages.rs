use axum::Router;
use axum::extract::Request;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::fs;
use tracing::warn;

use crate::state::AppState;

const SCRIPT_TAG: &str = r#"<script src="/livereload.js"></script>"#;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .fallback(page)
}

/// Inserts the reload client immediately before the first `</head>`, or at
/// the top of the document when there is none.
fn inject(html: &str) -> String {
    match html.find("</head>") {
        Some(at) => format!("{}{SCRIPT_TAG}\n{}", &html[..at], &html[at..]),
        None => format!("{SCRIPT_TAG}\n{html}"),
    }
}

async fn index(state: AppState, request: Request) -> Response {
    serve_html(&state, "index.html", request).await
}

/// Fallback for every path no explicit route claims. HTML documents are
/// served with the reload client injected; everything else goes to generic
/// static serving.
async fn page(state: AppState, request: Request) -> Response {
    let name = (request.method() == Method::GET)
        .then(|| html_name(request.uri()))
        .flatten();

    match name {
        Some(name) => serve_html(&state, &name, request).await,
        None => super::assets::serve(&state, request).await,
    }
}

/// Relative file name for request paths that should get script injection.
/// Traversal segments are left for the static handler, which rejects them.
fn html_name(uri: &Uri) -> Option<String> {
    let name = uri.path().trim_start_matches('/');
    let safe = !name.split('/').any(|segment| segment == "..");
    (name.ends_with(".html") && safe).then(|| name.to_string())
}

async fn serve_html(state: &AppState, name: &str, request: Request) -> Response {
    match fs::read_to_string(state.root().join(name)).await {
        Ok(html) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            inject(&html),
        )
            .into_response(),
        Err(err) => {
            warn!("error reading {name}: {err}");
            super::assets::serve(state, request).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_places_script_before_head_close() {
        let html = "<html><head><title>x</title></head><body/></html>";
        let expected = format!(
            "<html><head><title>x</title>{SCRIPT_TAG}\n</head><body/></html>"
        );
        assert_eq!(inject(html), expected);
    }

    #[test]
    fn inject_prepends_when_head_is_missing() {
        let html = "<body>hi</body>";
        assert_eq!(inject(html), format!("{SCRIPT_TAG}\n<body>hi</body>"));
    }

    #[test]
    fn inject_targets_first_head_close_only() {
        let html = "</head></head>";
        assert_eq!(inject(html), format!("{SCRIPT_TAG}\n</head></head>"));
    }

    #[test]
    fn html_name_rejects_traversal() {
        let uri: Uri = "/../secret.html".parse().unwrap();
        assert_eq!(html_name(&uri), None);

        let uri: Uri = "/sub/page.html".parse().unwrap();
        assert_eq!(html_name(&uri), Some("sub/page.html".to_string()));
    }
}
