use axum::{
    Json,
    extract::{Extension, Form, Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::{
    AppState,
    error::AppError,
    utils::{Claims, SESSION_COOKIE, generate_session_token, verify_password, verify_session_token},
};

use super::model::{LoginRequest, NextTarget, User};

/// Login page data. An already authenticated caller is sent home.
#[axum::debug_handler]
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NextTarget>,
) -> impl IntoResponse {
    let authenticated = jar
        .get(SESSION_COOKIE)
        .map(|c| verify_session_token(c.value(), &state.config).is_ok())
        .unwrap_or(false);

    if authenticated {
        return Redirect::to("/").into_response();
    }

    Json(json!({ "authenticated": false, "next": query.next })).into_response()
}

/// Verify credentials and establish the session cookie. Every failure mode
/// reports the same generic message, never which part was wrong.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NextTarget>,
    Form(req): Form<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::find_by_username(&state.pool, &req.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !user.is_active {
        return Err(AppError::InvalidCredentials);
    }

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = generate_session_token(user.id, req.remember, &state.config)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("user {} logged in", user.username);

    let target = query.next.unwrap_or_else(|| "/".to_string());
    Ok((jar.add(cookie), Redirect::to(&target)))
}

#[axum::debug_handler]
pub async fn logout(Extension(claims): Extension<Claims>, jar: CookieJar) -> impl IntoResponse {
    tracing::info!("user {} logged out", claims.sub);
    (
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Redirect::to("/login"),
    )
}
