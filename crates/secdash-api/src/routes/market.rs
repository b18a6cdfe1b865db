//! 시장 데이터 라우트.
//!
//! 업스트림 제공자 데이터를 정규 형식으로 제공합니다. 업스트림 장애는
//! 5xx가 아니라 빈 목록/`null`로 응답합니다 - 프론트엔드는 이를
//! "이용 불가"로 렌더링합니다.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use secdash_core::{MarketData, OhlcInterval, TimeSeriesData};

use crate::state::AppState;

/// 암호화폐 시세 쿼리.
#[derive(Debug, Deserialize)]
pub struct CryptoQuery {
    /// 쉼표로 구분된 CoinGecko ID 목록
    #[serde(default = "default_crypto_ids")]
    pub ids: String,
}

fn default_crypto_ids() -> String {
    "bitcoin,ethereum".to_string()
}

/// OHLC 쿼리.
#[derive(Debug, Deserialize)]
pub struct OhlcQuery {
    /// 분 단위 간격 (기본 1440 = 1일)
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// 이 시각(Unix 초) 이후 데이터만
    #[serde(default)]
    pub since: Option<i64>,
}

fn default_interval() -> u32 {
    1440
}

/// 암호화폐 현물 시세 일괄 조회.
///
/// GET /api/market/spot?ids=bitcoin,ethereum
pub async fn crypto_spot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CryptoQuery>,
) -> Json<Vec<MarketData>> {
    let ids: Vec<String> = query
        .ids
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Json(state.market.crypto_spot(&ids).await)
}

/// 주식 현재가 조회.
///
/// GET /api/market/quote/{symbol}
///
/// API 키 미설정 또는 업스트림 장애 시 `null`.
pub async fn stock_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Json<Option<MarketData>> {
    Json(state.market.stock_quote(&symbol).await)
}

/// 티커의 정규화된 일봉 시계열 조회.
///
/// GET /api/market/daily/{ticker}
///
/// 업스트림 장애 또는 레이트 리밋 시 `null` (빈 상태로 렌더링).
pub async fn daily_series(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Json<Option<TimeSeriesData>> {
    Json(state.market.daily_series(&ticker).await)
}

/// 거래소 페어의 정규화된 OHLC 시계열 조회.
///
/// GET /api/market/ohlc/{pair}?interval=60&since=1704067200
///
/// 알 수 없는 간격 값은 일봉으로 처리합니다.
pub async fn pair_ohlc(
    State(state): State<Arc<AppState>>,
    Path(pair): Path<String>,
    Query(query): Query<OhlcQuery>,
) -> Json<Option<TimeSeriesData>> {
    let interval = OhlcInterval::from_minutes(query.interval).unwrap_or(OhlcInterval::D1);
    Json(state.market.pair_series(&pair, interval, query.since).await)
}

/// 시장 데이터 라우터 생성.
pub fn market_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spot", get(crypto_spot))
        .route("/quote/{symbol}", get(stock_quote))
        .route("/daily/{ticker}", get(daily_series))
        .route("/ohlc/{pair}", get(pair_ohlc))
}
