//! Request extractors for `/api` handlers.
//!
//! Thin wrappers over axum's `Json`, `Path` and `Query` whose rejections
//! render as `{"error": message}` like every other API error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
        routing::{get, post},
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct NewItem {
        name: String,
    }

    #[derive(Deserialize)]
    struct Paging {
        page: u32,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/items",
                post(|ApiJson(body): ApiJson<NewItem>| async move { body.name }),
            )
            .route(
                "/items/{id}",
                get(|ApiPath(id): ApiPath<i32>| async move { id.to_string() }),
            )
            .route(
                "/list",
                get(|ApiQuery(q): ApiQuery<Paging>| async move { q.page.to_string() }),
            )
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_error() {
        let response = send(
            Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(error_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_field_is_json_error() {
        let response = send(
            Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"other": 1}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = error_body(response).await["error"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(message.contains("name"), "{message}");
    }

    #[tokio::test]
    async fn test_bad_path_and_query_are_json_errors() {
        let response = send(Request::get("/items/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_body(response).await["error"].is_string());

        let response = send(Request::get("/list?page=-1").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_valid_requests_pass_through() {
        let response = send(
            Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Luna"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(Request::get("/list?page=2").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
