//! SPA routes and static assets

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use ewiki_domain::Route;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use super::DevServerState;

/// Served for route-table paths when no built frontend is configured.
const BUILTIN_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>EWiki</title>
</head>
<body>
<div id="app"></div>
</body>
</html>
"#;

pub(super) async fn serve(State(state): State<Arc<DevServerState>>, request: Request) -> Response {
    if let Some(route) = Route::parse(request.uri().path()) {
        debug!(route = route.name(), path = %request.uri().path(), "serving SPA index");
        return index(&state).await;
    }

    let Some(dir) = &state.static_dir else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match ServeDir::new(dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn index(state: &DevServerState) -> Response {
    let Some(dir) = &state.static_dir else {
        return Html(BUILTIN_INDEX).into_response();
    };

    let path = dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "index.html unavailable, using built-in shell");
            Html(BUILTIN_INDEX).into_response()
        }
    }
}
