//! 인증.
//!
//! 쿠키 세션 기반 인증을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`auth_gate`]: 모든 요청을 통과시키는 인증 게이트 미들웨어
//! - [`SessionAuthority`]: 세션 저장소 인터페이스 (검증/연장/무효화)
//! - [`PgSessionStore`]: PostgreSQL 세션 저장소 구현
//! - 쿠키 헬퍼 및 Argon2 비밀번호 처리
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 보호된 라우트에서 요청 컨텍스트 추출
//! async fn protected_handler(
//!     Extension(ctx): Extension<AuthContext>,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", ctx.user.unwrap().username)
//! }
//! ```

mod cookie;
mod gate;
mod password;
mod session;

pub use cookie::{delete_cookie_value, read_cookie, set_cookie_value};
pub use gate::{auth_gate, is_public_path, AuthContext, AuthGateState, PUBLIC_PATHS};
pub use password::{
    hash_password, validate_password_strength, validate_username, verify_password, PasswordError,
};
pub use session::{generate_token, session_id_from_token, PgSessionStore, SessionAuthority};
