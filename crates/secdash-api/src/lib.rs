//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 모든 요청을 통과시키는 세션 인증 게이트
//! - sqlx 기반 저장소 (사용자, 세션, 증권 마스터)
//! - 시장 데이터 조회 엔드포인트
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`auth`]: 세션 인증 게이트, 세션 저장소, 쿠키/비밀번호 처리
//! - [`routes`]: REST API 엔드포인트
//! - [`repository`]: 데이터베이스 저장소
//! - [`tasks`]: 증권 마스터 CSV 동기화

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;
pub mod tasks;

pub use auth::{
    auth_gate, hash_password, verify_password, AuthContext, AuthGateState, PasswordError,
    PgSessionStore, SessionAuthority,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;
