//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//!
//! 전역 싱글턴이나 지연 초기화는 없습니다 - 모든 의존성은 부팅 시
//! 명시적으로 생성되어 주입됩니다.

use std::sync::Arc;

use secdash_core::config::AppConfig;
use secdash_market::MarketDataService;

use crate::auth::SessionAuthority;

/// 애플리케이션 공유 상태.
///
/// 이 구조체는 모든 API 핸들러에서 접근할 수 있는 공유 리소스를 포함합니다.
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: sqlx::PgPool,

    /// 시장 데이터 서비스 - 업스트림 제공자 조회 및 정규 변환
    pub market: Arc<MarketDataService>,

    /// 세션 저장소 - 로그인/로그아웃 라우트에서 사용
    pub sessions: Arc<dyn SessionAuthority>,

    /// 애플리케이션 설정
    pub config: AppConfig,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(
        db_pool: sqlx::PgPool,
        market: MarketDataService,
        sessions: Arc<dyn SessionAuthority>,
        config: AppConfig,
    ) -> Self {
        Self {
            db_pool,
            market: Arc::new(market),
            sessions,
            config,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
