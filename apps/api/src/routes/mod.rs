pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::profile::handlers::handle_get_profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/assets/app.js", get(pages::app_js_handler))
        .route("/assets/styles.css", get(pages::styles_handler))
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/v1/profile", get(handle_get_profile))
        // Assistant API
        .route(
            "/api/v1/assistant/sessions",
            post(handlers::handle_open_session),
        )
        .route(
            "/api/v1/assistant/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_close_session),
        )
        .route(
            "/api/v1/assistant/sessions/:id/messages",
            post(handlers::handle_send_message),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::assistant::SessionStore;
    use crate::llm_client::{Generator, LlmError};
    use crate::profile::ProfileStore;

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
            let question = prompt.rsplit("Question: ").next().unwrap_or_default();
            Ok(Some(format!("Respuesta a: {question}")))
        }
    }

    fn app() -> Router {
        let profile = Arc::new(ProfileStore::embedded().unwrap());
        let sessions = Arc::new(SessionStore::new(
            Arc::clone(&profile),
            Arc::new(EchoGenerator),
            4,
            std::time::Duration::from_secs(60),
        ));
        build_router(AppState { profile, sessions })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "vitae");
    }

    #[tokio::test]
    async fn test_index_renders_profile_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<h1>Noah Pieras</h1>"));
    }

    #[tokio::test]
    async fn test_assets_have_content_types() {
        for (uri, expected) in [
            ("/assets/app.js", "text/javascript"),
            ("/assets/styles.css", "text/css"),
        ] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with(expected));
        }
    }

    #[tokio::test]
    async fn test_profile_endpoint_includes_fill_percent() {
        let (status, json) = send(&app(), "GET", "/api/v1/profile", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["personalInfo"]["name"], "Noah Pieras");
        let fills: Vec<u64> = json["languages"]
            .as_array()
            .expect("languages array")
            .iter()
            .map(|l| l["fill_percent"].as_u64().unwrap())
            .collect();
        assert_eq!(fills, vec![100, 100, 30, 30]);
        assert_eq!(json["experience"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app();
        let (status, opened) = send(&app, "POST", "/api/v1/assistant/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(opened["state"], "idle");
        assert_eq!(opened["messages"].as_array().unwrap().len(), 1);
        let id = opened["session_id"].as_str().unwrap().to_string();

        let (status, settled) = send(
            &app,
            "POST",
            &format!("/api/v1/assistant/sessions/{id}/messages"),
            Some(serde_json::json!({"content": "  ¿Habla catalán?  "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settled["state"], "idle");
        let messages = settled["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "¿Habla catalán?");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "Respuesta a: ¿Habla catalán?");
        assert!(settled["revision"].as_u64().unwrap() > opened["revision"].as_u64().unwrap());

        let (status, fetched) =
            send(&app, "GET", &format!("/api/v1/assistant/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["messages"], settled["messages"]);

        let (status, _) =
            send(&app, "DELETE", &format!("/api/v1/assistant/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) =
            send(&app, "GET", &format!("/api/v1/assistant/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_blank_message_is_bad_request() {
        let app = app();
        let (_, opened) = send(&app, "POST", "/api/v1/assistant/sessions", None).await;
        let id = opened["session_id"].as_str().unwrap();

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/v1/assistant/sessions/{id}/messages"),
            Some(serde_json::json!({"content": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

        let (_, after) =
            send(&app, "GET", &format!("/api/v1/assistant/sessions/{id}"), None).await;
        assert_eq!(after["messages"], opened["messages"]);
    }

    #[tokio::test]
    async fn test_session_cap_returns_service_unavailable() {
        let app = app();
        for _ in 0..4 {
            let (status, _) = send(&app, "POST", "/api/v1/assistant/sessions", None).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, json) = send(&app, "POST", "/api/v1/assistant/sessions", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    }
}
