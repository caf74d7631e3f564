use std::path::Path;

use axum::{extract::State, response::Html};
use tower_http::services::ServeDir;

use crate::error::Result;
use crate::state::AppState;

/// Files from the client bundle directory.
pub fn assets(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}

/// Serve the client's index page, or a placeholder when none is bundled.
pub async fn serve_index(State(state): State<AppState>) -> Result<Html<String>> {
    let path = state.config.client_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no client bundle, serving placeholder");
            Ok(Html(placeholder(&state.config.endpoint)))
        }
        Err(e) => Err(e.into()),
    }
}

fn placeholder(endpoint: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>livepost</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 3rem; color: #222; }}
        code {{ background: #f2f2f2; padding: 0.2rem 0.4rem; border-radius: 4px; }}
    </style>
</head>
<body>
    <h1>livepost</h1>
    <p>No client bundle found. Point <code>--client-dir</code> at a directory containing <code>index.html</code>.</p>
    <p>The GraphQL API is available at <a href="{endpoint}">{endpoint}</a>.</p>
</body>
</html>"#
    )
}
