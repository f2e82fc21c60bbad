//! Tests for feedback module
//!
//! These tests verify:
//! - Feedback request validation
//! - Public reads and token-gated writes
//! - Create, update and delete over HTTP

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::test_support::{empty_request, json_body, json_request, test_app};
    use crate::common::{AppState, Validator};
    use axum::{http::StatusCode, Router};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn request(title: Option<&str>, description: Option<&str>, rating: Option<i64>) -> models::FeedbackRequest {
        models::FeedbackRequest {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            rating,
        }
    }

    fn token_for(state: &Arc<AppState>) -> String {
        state.tokens.issue("U_TEST01", "a@x.com").unwrap()
    }

    async fn create(app: &Router, token: &str, title: &str, rating: i64) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/feedback",
                json!({ "title": title, "description": "Works well", "rating": rating }),
                Some(token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[test]
    fn test_feedback_validation_success() {
        let valid = request(Some("Great"), Some("Works well"), Some(5));
        assert!(valid.validate(&valid).is_valid);
    }

    #[test]
    fn test_feedback_validation_missing_fields() {
        let empty = request(None, Some("  "), None);
        let result = empty.validate(&empty);

        assert!(result.has_error_for("title"));
        assert!(result.has_error_for("description"));
        assert!(result.has_error_for("rating"));
    }

    #[test]
    fn test_feedback_rating_bounds() {
        for rating in [0, 6, -1] {
            let req = request(Some("t"), Some("d"), Some(rating));
            assert!(req.validate(&req).has_error_for("rating"), "rating {}", rating);
        }
        for rating in 1..=5 {
            let req = request(Some("t"), Some("d"), Some(rating));
            assert!(req.validate(&req).is_valid, "rating {}", rating);
        }
    }

    #[test]
    fn test_into_fields_trims() {
        let fields = request(Some("  Great "), Some(" ok "), Some(4))
            .into_fields()
            .unwrap();
        assert_eq!(fields.title, "Great");
        assert_eq!(fields.description, "ok");
        assert_eq!(fields.rating, 4);
    }

    #[tokio::test]
    async fn test_health_route() {
        let (app, _) = test_app().await;
        let response = app.oneshot(empty_request("GET", "/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"The server is up and running");
    }

    #[tokio::test]
    async fn test_writes_require_token() {
        let (app, _) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/feedback",
                json!({ "title": "t", "description": "d", "rating": 3 }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/feedback", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_list_and_get() {
        let (app, state) = test_app().await;
        let token = token_for(&state);

        let created = create(&app, &token, "Great service", 5).await;
        assert_eq!(created["message"], "Feedback created successfully!");
        assert_eq!(created["feedback"]["rating"], 5);
        assert_eq!(created["feedback"]["created_by"], "U_TEST01");
        let id = created["feedback"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("F_"));

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/feedback", None))
            .await
            .unwrap();
        let list = json_body(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/feedback/{}", id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["title"], "Great service");

        let response = app
            .oneshot(empty_request("GET", "/api/feedback/F_NOPE00", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_body() {
        let (app, state) = test_app().await;
        let token = token_for(&state);

        for body in [
            json!({ "title": "t", "description": "d" }),
            json!({ "title": "t", "description": "d", "rating": 9 }),
            json!({ "title": "", "description": "d", "rating": 3 }),
            json!({ "title": "t", "description": "d", "rating": "five" }),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/feedback", body.clone(), Some(&token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        }
    }

    #[tokio::test]
    async fn test_update_feedback() {
        let (app, state) = test_app().await;
        let token = token_for(&state);
        let created = create(&app, &token, "Okay", 3).await;
        let id = created["feedback"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/feedback/{}", id),
                json!({ "title": "Better", "description": "Improved", "rating": 4 }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["feedback"]["title"], "Better");
        assert_eq!(body["feedback"]["rating"], 4);
        assert!(body["feedback"]["updated_at"].is_string());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/feedback/{}", id),
                json!({ "title": "Better" }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/feedback/F_NOPE00",
                json!({ "title": "t", "description": "d", "rating": 1 }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_feedback() {
        let (app, state) = test_app().await;
        let token = token_for(&state);
        let created = create(&app, &token, "Temporary", 2).await;
        let id = created["feedback"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/feedback/{}", id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/feedback/{}", id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Feedback deleted successfully!");

        let response = app
            .oneshot(empty_request("DELETE", &format!("/api/feedback/{}", id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
