//! 인증 라우트.
//!
//! 회원가입, 로그인, 로그아웃, 현재 사용자 조회를 제공합니다.
//!
//! 로그인 실패 시 사용자 존재 여부를 노출하지 않도록 항상 동일한
//! 메시지를 반환합니다.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use secdash_core::domain::User;

use crate::auth::{
    delete_cookie_value, hash_password, set_cookie_value, validate_username, verify_password,
    AuthContext,
};
use crate::error::{db_error, ApiErrorResponse, ApiResult};
use crate::repository::UserRepository;
use crate::state::AppState;

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 31, message = "사용자명은 3자 이상 31자 이하여야 합니다"))]
    pub username: String,
    #[validate(length(min = 6, max = 255, message = "비밀번호는 6자 이상 255자 이하여야 합니다"))]
    pub password: String,
    #[serde(default)]
    pub age: Option<i32>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn invalid_input(message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_INPUT", message)),
    )
}

fn with_session_cookie(mut response: Response, cookie: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// 회원가입.
///
/// POST /auth/register
///
/// 성공 시 바로 세션을 생성하고 쿠키를 발급합니다.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Response> {
    if let Err(errors) = payload.validate() {
        return Err(invalid_input(errors.to_string()));
    }
    if let Err(message) = validate_username(&payload.username) {
        return Err(invalid_input(message));
    }

    if UserRepository::username_exists(&state.db_pool, &payload.username)
        .await
        .map_err(db_error)?
    {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiErrorResponse::new(
                "USERNAME_TAKEN",
                "이미 사용 중인 사용자명입니다",
            )),
        ));
    }

    let password_hash = hash_password(&payload.password).map_err(|err| {
        warn!(error = %err, "Password hashing failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("HASH_ERROR", "비밀번호 처리 실패")),
        )
    })?;

    let user = UserRepository::create(&state.db_pool, &payload.username, &password_hash, payload.age)
        .await
        .map_err(db_error)?;

    let (token, session) = state.sessions.create(&user.id).await.map_err(|err| {
        warn!(error = %err, "Session creation failed after registration");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("SESSION_ERROR", "세션 생성 실패")),
        )
    })?;

    info!(username = %user.username, "Registered new user");

    let cookie = set_cookie_value(&state.config.auth.cookie_name, &token, session.expires_at);
    let response = (StatusCode::CREATED, Json(user)).into_response();
    Ok(with_session_cookie(response, &cookie))
}

/// 로그인.
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Response> {
    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new(
                "INVALID_CREDENTIALS",
                "사용자명 또는 비밀번호가 올바르지 않습니다",
            )),
        )
    };

    let user = UserRepository::find_by_username(&state.db_pool, &payload.username)
        .await
        .map_err(db_error)?
        .ok_or_else(unauthorized)?;

    if verify_password(&payload.password, &user.password_hash).is_err() {
        warn!(username = %payload.username, "Login failed");
        return Err(unauthorized());
    }

    let (token, session) = state.sessions.create(&user.id).await.map_err(|err| {
        warn!(error = %err, "Session creation failed at login");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("SESSION_ERROR", "세션 생성 실패")),
        )
    })?;

    info!(username = %user.username, "User logged in");

    let cookie = set_cookie_value(&state.config.auth.cookie_name, &token, session.expires_at);
    let response = (StatusCode::OK, Json(user)).into_response();
    Ok(with_session_cookie(response, &cookie))
}

/// 로그아웃.
///
/// POST /auth/logout
///
/// 세션을 무효화하고 삭제 쿠키와 함께 302로 로그인 페이지로
/// 돌려보냅니다.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Response> {
    if let Some(session) = &ctx.session {
        state
            .sessions
            .invalidate(&session.id)
            .await
            .map_err(|err| {
                warn!(error = %err, "Session invalidation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse::new("SESSION_ERROR", "세션 무효화 실패")),
                )
            })?;
        info!(session_id = %session.id, "User logged out");
    }

    let mut response = StatusCode::FOUND.into_response();
    if let Ok(value) = HeaderValue::from_str(&state.config.auth.login_path) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    let delete = delete_cookie_value(&state.config.auth.cookie_name);
    Ok(with_session_cookie(response, &delete))
}

/// 현재 사용자 조회.
///
/// GET /auth/me
pub async fn me(Extension(ctx): Extension<AuthContext>) -> ApiResult<Json<User>> {
    ctx.user.map(Json).ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorResponse::new("UNAUTHORIZED", "로그인이 필요합니다")),
    ))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
