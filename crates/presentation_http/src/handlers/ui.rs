//! The two-panel browser page

use axum::response::Html;

/// The embedded single-page UI
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Serve the two-panel page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
