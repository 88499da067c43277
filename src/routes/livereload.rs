use axum::body::Bytes;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::routes::AppError;
use crate::snapshot::{self, Snapshot};
use crate::state::AppState;

/// Polling client injected into every served HTML document. It remembers the
/// `files` map from the previous poll and reloads the page whenever the
/// server reports a change; poll failures are logged and the loop keeps
/// going.
const LIVERELOAD_JS: &str = r#"(function() {
    let lastModified = {};

    function checkForChanges() {
        fetch('/check-changes', {
            method: 'POST',
            headers: {
                'Content-Type': 'application/json',
            },
            body: JSON.stringify(lastModified)
        })
        .then(response => response.json())
        .then(data => {
            if (data.changed) {
                console.log('Files changed, reloading...');
                location.reload();
            }
            lastModified = data.files;
        })
        .catch(error => console.log('Live reload check failed:', error));
    }

    setInterval(checkForChanges, 2000);
    console.log('Live reload enabled!');
})();
"#;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/livereload.js", get(script))
        .route("/check-changes", post(check_changes))
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        LIVERELOAD_JS,
    )
}

#[derive(Serialize)]
struct CheckChanges {
    changed: bool,
    files: Snapshot,
}

/// Compares the client's last-known snapshot against a fresh scan of the
/// served root. A malformed or empty body counts as an empty snapshot, never
/// as a client error.
async fn check_changes(state: AppState, body: Bytes) -> Result<Json<CheckChanges>, AppError> {
    let previous: Snapshot = serde_json::from_slice(&body).unwrap_or_default();

    let root = state.root().to_owned();
    let files = tokio::task::spawn_blocking(move || snapshot::scan(&root))
        .await
        .map_err(anyhow::Error::from)?;

    let changed = snapshot::changed(&previous, &files);
    if changed {
        tracing::debug!("change detected across {} tracked files", files.len());
    }

    Ok(Json(CheckChanges { changed, files }))
}
