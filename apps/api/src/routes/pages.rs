use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Datelike, Utc};

use crate::render::render_page;
use crate::state::AppState;

const APP_JS: &str = include_str!("../../assets/app.js");
const STYLES_CSS: &str = include_str!("../../assets/styles.css");

/// GET /
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.profile, Utc::now().year()))
}

/// GET /assets/app.js
pub async fn app_js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// GET /assets/styles.css
pub async fn styles_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_releases_session_when_page_goes_away() {
        assert!(APP_JS.contains("if (panel.sessionId) panel.release(panel.sessionId);"));
        assert!(APP_JS.contains("method: \"DELETE\", keepalive: true"));
        // A session created after the panel closed is released, not adopted.
        assert!(APP_JS.contains("if (epoch !== self.epoch)"));
    }
}
