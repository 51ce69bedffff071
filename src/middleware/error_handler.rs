use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

/// Log the body of any 5xx response together with the request that caused
/// it, then rebuild the response unchanged for the client.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if response.status().is_server_error() {
        let (mut parts, body) = response.into_parts();
        let bytes = match to_bytes(body, 1024).await {
            Ok(b) => b,
            Err(e) => {
                error!("failed to read error response body: {}", e);
                parts.headers.remove(axum::http::header::CONTENT_LENGTH);
                return Response::from_parts(parts, Body::empty());
            }
        };

        error!(
            "server error on {} {} - status: {}, body: {}",
            method,
            path,
            parts.status,
            String::from_utf8_lossy(&bytes)
        );

        parts.headers.remove(axum::http::header::CONTENT_LENGTH);
        Response::from_parts(parts, Body::from(bytes))
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        http::{StatusCode, header},
        routing::get,
    };
    use tower::ServiceExt;

    fn app(body: &'static str) -> Router {
        Router::new()
            .route(
                "/boom",
                get(move || async move { (StatusCode::INTERNAL_SERVER_ERROR, body) }),
            )
            .layer(axum::middleware::from_fn(log_errors))
    }

    #[tokio::test]
    async fn server_error_bodies_pass_through() {
        let res = app("boom")
            .oneshot(
                Request::builder()
                    .uri("/boom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"boom");
    }

    #[tokio::test]
    async fn oversized_error_body_is_dropped_with_its_length_header() {
        let body: &'static str = "x".repeat(2048).leak();
        let res = app(body)
            .oneshot(
                Request::builder()
                    .uri("/boom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().get(header::CONTENT_LENGTH).is_none());
        let bytes = to_bytes(res.into_body(), 4096).await.unwrap();
        assert!(bytes.is_empty());
    }
}

