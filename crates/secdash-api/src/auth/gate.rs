//! 인증 게이트 미들웨어.
//!
//! 모든 요청이 이 게이트를 통과합니다. 쿠키의 세션 토큰을 검증해
//! 요청 확장에 [`AuthContext`]를 심고, 보호 경로에 대한 비인증 접근은
//! 302로 로그인 페이지로 돌려보냅니다.
//!
//! 판정 순서:
//! 1. 쿠키 없음 + 공개 경로 → 익명 통과
//! 2. 쿠키 없음 + 보호 경로 → 302 로그인
//! 3. 유효 세션 + 로그인 페이지 → 302 앱 홈
//! 4. 유효 세션 → 컨텍스트 부착, 쿠키 재발급 후 통과
//! 5. 무효 세션 → 삭제 쿠키 발급, 보호 경로면 302 로그인
//! 6. 저장소 장애 → 500 (무효 세션으로 취급하지 않음)

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use secdash_core::config::AuthConfig;
use secdash_core::domain::{Session, User};

use crate::auth::cookie::{delete_cookie_value, read_cookie, set_cookie_value};
use crate::auth::session::SessionAuthority;
use crate::error::ApiErrorResponse;

/// 인증 없이 접근 가능한 경로.
///
/// 각 항목은 정확히 일치하거나 `{경로}/` 접두사로 일치합니다.
/// 루트 `/`는 정확히 일치할 때만 공개입니다.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/auth/login",
    "/auth/register",
    "/terms",
    "/privacy",
    "/health",
];

/// 경로가 공개 경로인지 판정합니다.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        if *public == "/" {
            path == "/"
        } else {
            path == *public || path.starts_with(&format!("{public}/"))
        }
    })
}

/// 게이트 미들웨어 상태.
///
/// 세션 저장소는 트레이트 객체로 주입됩니다 - 테스트에서 인메모리
/// 구현으로 교체 가능합니다.
#[derive(Clone)]
pub struct AuthGateState {
    pub sessions: Arc<dyn SessionAuthority>,
    pub auth: AuthConfig,
}

/// 요청별 인증 컨텍스트.
///
/// 게이트가 요청 확장에 삽입하며, 핸들러는 `Extension<AuthContext>`로
/// 꺼내 씁니다. 익명 요청은 두 필드 모두 `None`입니다.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user: Option<User>,
    pub session: Option<Session>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// 302 리다이렉트 응답을 만듭니다.
///
/// `axum::response::Redirect::to`는 303을 쓰므로 직접 조립합니다.
fn found_redirect(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

fn append_set_cookie(response: &mut Response, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// 인증 게이트.
pub async fn auth_gate(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let Some(token) = read_cookie(req.headers(), &state.auth.cookie_name) else {
        // 쿠키 없음: 공개 경로는 익명 통과, 보호 경로는 로그인으로
        if !is_public_path(&path) {
            return found_redirect(&state.auth.login_path);
        }
        req.extensions_mut().insert(AuthContext::anonymous());
        return next.run(req).await;
    };

    match state.sessions.validate(&token).await {
        Ok(Some((session, user))) => {
            // 이미 로그인한 사용자가 로그인 페이지에 오면 앱 홈으로
            if path == state.auth.login_path {
                return found_redirect(&state.auth.app_path);
            }

            // 갱신 윈도우에서 연장됐을 수 있으므로 매 요청 쿠키 재발급
            let cookie = set_cookie_value(&state.auth.cookie_name, &token, session.expires_at);
            req.extensions_mut().insert(AuthContext {
                user: Some(user),
                session: Some(session),
            });

            let mut response = next.run(req).await;
            append_set_cookie(&mut response, &cookie);
            response
        }
        Ok(None) => {
            warn!(path, "Rejected request with invalid session");
            let delete = delete_cookie_value(&state.auth.cookie_name);

            if !is_public_path(&path) {
                let mut response = found_redirect(&state.auth.login_path);
                append_set_cookie(&mut response, &delete);
                return response;
            }

            req.extensions_mut().insert(AuthContext::anonymous());
            let mut response = next.run(req).await;
            append_set_cookie(&mut response, &delete);
            response
        }
        Err(err) => {
            // 저장소 장애는 무효 세션과 다르다 - 로그아웃시키지 않고 5xx
            error!(error = %err, "Session store failure in auth gate");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("SESSION_STORE_ERROR", "세션 저장소 에러")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{middleware, routing::get, Extension, Router};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use secdash_core::domain::SessionValidity;
    use secdash_core::{CoreError, CoreResult};

    /// 토큰 → (세션, 사용자) 인메모리 저장소.
    ///
    /// 프로덕션 저장소와 같은 갱신 의미론을 따릅니다: 만료 세션은
    /// 삭제, 갱신 윈도우(15일) 내 세션은 30일로 연장.
    #[derive(Default)]
    struct MemoryAuthority {
        sessions: Mutex<HashMap<String, (Session, User)>>,
        fail: bool,
    }

    impl MemoryAuthority {
        fn with_session(token: &str, expires_in_days: i64) -> Self {
            let store = Self::default();
            let session = Session {
                id: crate::auth::session_id_from_token(token),
                user_id: "u1".to_string(),
                expires_at: Utc::now() + Duration::days(expires_in_days),
            };
            let user = User {
                id: "u1".to_string(),
                username: "alice".to_string(),
                password_hash: "$argon2id$fake".to_string(),
                age: None,
            };
            store
                .sessions
                .lock()
                .unwrap()
                .insert(token.to_string(), (session, user));
            store
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SessionAuthority for MemoryAuthority {
        async fn validate(&self, token: &str) -> CoreResult<Option<(Session, User)>> {
            if self.fail {
                return Err(CoreError::Database("connection refused".to_string()));
            }

            let mut sessions = self.sessions.lock().unwrap();
            let Some((session, _)) = sessions.get(token) else {
                return Ok(None);
            };

            match session.validity_at(Utc::now(), Duration::days(15)) {
                SessionValidity::Expired => {
                    sessions.remove(token);
                    Ok(None)
                }
                SessionValidity::NeedsRenewal => {
                    let entry = sessions.get_mut(token).ok_or_else(|| {
                        CoreError::Internal("session vanished mid-validate".to_string())
                    })?;
                    entry.0.expires_at = Utc::now() + Duration::days(30);
                    Ok(Some(entry.clone()))
                }
                SessionValidity::Fresh => Ok(sessions.get(token).cloned()),
            }
        }

        async fn create(&self, _user_id: &str) -> CoreResult<(String, Session)> {
            unimplemented!("not used by gate tests")
        }

        async fn invalidate(&self, _session_id: &str) -> CoreResult<()> {
            Ok(())
        }
    }

    fn test_app(authority: MemoryAuthority) -> Router {
        let state = AuthGateState {
            sessions: Arc::new(authority),
            auth: AuthConfig::default(),
        };

        Router::new()
            .route("/", get(|| async { "home" }))
            .route("/auth/login", get(|| async { "login" }))
            .route(
                "/app",
                get(|Extension(ctx): Extension<AuthContext>| async move {
                    if ctx.is_authenticated() {
                        StatusCode::OK
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(state, auth_gate))
    }

    fn request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_public_path_classification() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/auth/register"));
        assert!(is_public_path("/health"));
        assert!(is_public_path("/terms/2024"));

        // 루트는 정확히 일치할 때만
        assert!(!is_public_path("/app"));
        assert!(!is_public_path("/api/market/crypto"));
        // 접두사 유사 경로는 보호 경로
        assert!(!is_public_path("/healthcheck"));
        assert!(!is_public_path("/termsandconditions"));
    }

    #[tokio::test]
    async fn test_no_cookie_on_protected_path_redirects_to_login() {
        let app = test_app(MemoryAuthority::default());
        let response = app.oneshot(request("/app", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login"
        );
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_no_cookie_on_public_path_passes_anonymous() {
        let app = test_app(MemoryAuthority::default());
        let response = app.oneshot(request("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valid_session_attaches_context_and_reissues_cookie() {
        let app = test_app(MemoryAuthority::with_session("tok-1", 30));
        let response = app
            .oneshot(request("/app", Some("auth-session=tok-1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("auth-session=tok-1"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Expires="));
    }

    #[tokio::test]
    async fn test_session_in_renewal_window_reissues_extended_cookie() {
        // 만료까지 10일 남음 (갱신 윈도우 15일 안) → 30일로 연장되고
        // 재발급 쿠키의 Expires가 새 만료를 반영해야 한다
        let app = test_app(MemoryAuthority::with_session("tok-1", 10));
        let response = app
            .oneshot(request("/app", Some("auth-session=tok-1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();

        let expires_raw = set_cookie
            .split("Expires=")
            .nth(1)
            .expect("cookie must carry Expires");
        let expires = chrono::NaiveDateTime::parse_from_str(
            expires_raw,
            "%a, %d %b %Y %H:%M:%S GMT",
        )
        .unwrap()
        .and_utc();

        // 원래 만료(10일 뒤)가 아니라 연장된 만료(30일 뒤)여야 한다
        assert!(expires > Utc::now() + Duration::days(29));
    }

    #[tokio::test]
    async fn test_logged_in_user_on_login_page_redirects_to_app() {
        let app = test_app(MemoryAuthority::with_session("tok-1", 30));
        let response = app
            .oneshot(request("/auth/login", Some("auth-session=tok-1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/app");
    }

    #[tokio::test]
    async fn test_invalid_session_on_protected_path_clears_cookie_and_redirects() {
        let app = test_app(MemoryAuthority::default());
        let response = app
            .oneshot(request("/app", Some("auth-session=bogus")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login"
        );
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_invalid_session_on_public_path_passes_with_delete_cookie() {
        let app = test_app(MemoryAuthority::default());
        let response = app
            .oneshot(request("/", Some("auth-session=bogus")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_store_failure_returns_500_not_redirect() {
        let app = test_app(MemoryAuthority::failing());
        let response = app
            .oneshot(request("/app", Some("auth-session=tok-1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
