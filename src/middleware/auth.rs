use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    AppState,
    utils::{SESSION_COOKIE, verify_session_token},
};

// Escape everything that could confuse the login query string; slashes stay
// readable.
const NEXT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC.remove(b'/');

/// Session gate for every protected route. A valid session cookie attaches
/// the claims as a request extension; anything else is bounced to the login
/// page with the original target preserved in `next`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match verify_session_token(cookie.value(), &state.config) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                return next.run(req).await;
            }
            Err(e) => {
                tracing::debug!("rejected session token: {}", e);
            }
        }
    }

    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = utf8_percent_encode(target, &NEXT_ENCODE_SET);
    Redirect::to(&format!("/login?next={}", target)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{self, StatusCode, header},
        routing::get,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::utils::generate_session_token;

    fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/lifedrop_test")
            .unwrap();
        AppState {
            pool,
            config: Config {
                database_url: String::new(),
                session_secret: "gate-test-secret".into(),
                session_expiration_secs: 3600,
                remember_expiration_secs: 7200,
                server_host: String::new(),
                server_port: 0,
            },
        }
    }

    fn gated_router(state: AppState) -> Router {
        Router::new()
            .route("/export/csv/{campaign_id}", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
    }

    fn location(res: &Response) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
    }

    #[tokio::test]
    async fn unauthenticated_requests_redirect_to_login_with_next() {
        let app = gated_router(test_state());
        let req = http::Request::builder()
            .uri("/export/csv/3")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/login?next=/export/csv/3");
    }

    #[tokio::test]
    async fn query_strings_survive_the_redirect_encoded() {
        let app = gated_router(test_state());
        let req = http::Request::builder()
            .uri("/export/csv/3?a=1&b=2")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&res),
            "/login?next=/export/csv/3%3Fa%3D1%26b%3D2"
        );
    }

    #[tokio::test]
    async fn valid_session_cookie_passes_the_gate() {
        let state = test_state();
        let token = generate_session_token(7, false, &state.config).unwrap();
        let app = gated_router(state);

        let req = http::Request::builder()
            .uri("/export/csv/3")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn garbage_session_cookie_is_redirected() {
        let app = gated_router(test_state());
        let req = http::Request::builder()
            .uri("/export/csv/3")
            .header(header::COOKIE, format!("{}=not-a-token", SESSION_COOKIE))
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/login?next=/export/csv/3");
    }
}
