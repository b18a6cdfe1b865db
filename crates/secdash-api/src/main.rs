//! REST API 서버 진입점.
//!
//! 부팅 순서:
//! 1. .env 로드 및 로깅 초기화
//! 2. 설정 로드 (파일 + 환경 변수)
//! 3. PostgreSQL 연결 풀 생성 및 연결 확인
//! 4. 시장 데이터 서비스, 세션 저장소 생성 (명시적 주입)
//! 5. 라우터 조립 (인증 게이트 + CORS + 트레이싱 + 타임아웃)
//! 6. 서버 시작

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use secdash_api::auth::{auth_gate, AuthGateState, PgSessionStore};
use secdash_api::routes::create_api_router;
use secdash_api::state::AppState;
use secdash_core::config::AppConfig;
use secdash_core::init_logging_from_env;
use secdash_market::MarketDataService;

/// CORS 레이어 생성.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            // 개발: 모든 origin 허용
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(std::env::var("CORS_ORIGINS").is_ok())
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
///
/// 인증 게이트는 모든 라우트 바깥에 씌워 요청 하나도 빠짐없이
/// 통과하게 합니다.
fn create_router(state: Arc<AppState>, gate_state: AuthGateState, timeout_secs: u64) -> Router {
    create_api_router()
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate_state, auth_gate))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_logging_from_env()?;

    let config = AppConfig::from_env();
    info!(addr = %config.socket_addr(), "Starting secdash API server");

    // DB 연결
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(&config.database.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Connected to PostgreSQL successfully");

    // 시장 데이터 서비스
    let market = MarketDataService::new(&config.providers)?;
    if config.providers.finnhub_api_key.is_none() {
        warn!("FINNHUB_API_KEY not set, stock quotes will be unavailable");
    }
    if config.providers.alpha_vantage_api_key.is_none() {
        warn!("ALPHA_VANTAGE_API_KEY not set, daily series will be unavailable");
    }

    // 세션 저장소
    let sessions = Arc::new(PgSessionStore::new(pool.clone(), &config.auth));

    let gate_state = AuthGateState {
        sessions: sessions.clone(),
        auth: config.auth.clone(),
    };

    let timeout_secs = config.server.request_timeout_secs;
    let addr = config.socket_addr();
    let state = Arc::new(AppState::new(pool, market, sessions, config));

    let app = create_router(state, gate_state, timeout_secs);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C 또는 SIGTERM 수신 시 종료.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => warn!("Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
