//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness / readiness)
//! - `/auth` - 회원가입, 로그인, 로그아웃, 현재 사용자
//! - `/api/market` - 암호화폐 시세, 주식 현재가, 일봉/OHLC 시계열
//! - `/api/ticker` - 티커 검색 (로컬 우선, 외부 폴백)
//! - `/api/securities` - 증권 마스터 조회/동기화

pub mod auth;
pub mod health;
pub mod market;
pub mod securities;
pub mod ticker;

pub use auth::{auth_router, LoginRequest, RegisterRequest};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use market::{market_router, CryptoQuery, OhlcQuery};
pub use securities::{securities_router, PageQuery, SyncRequest, SyncResponse};
pub use ticker::{ticker_router, LoadQuery, SearchQuery, TickerSearchResult};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
/// 인증 게이트 미들웨어는 호출자(main)에서 바깥에 씌웁니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 인증 엔드포인트
        .nest("/auth", auth_router())
        // API 엔드포인트
        .nest("/api/market", market_router())
        .nest("/api/ticker", ticker_router())
        .nest("/api/securities", securities_router())
}
