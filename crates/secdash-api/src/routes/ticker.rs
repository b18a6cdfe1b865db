//! 티커 검색 라우트.
//!
//! 로컬 증권 마스터 검색과 외부 심볼 검색 폴백을 제공합니다.
//!
//! 검색 계약: 로컬 결과가 하나라도 있으면 로컬이 우선하고, 로컬이
//! 비어 있을 때만 `use_api`가 켜진 경우에 한해 외부 검색으로
//! 폴백합니다. 두 소스를 병합하지 않습니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{db_error, ApiResult};
use crate::repository::SecurityRepository;
use crate::state::AppState;

/// 검색 쿼리.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    /// 로컬 결과가 없을 때 외부 검색 허용 여부
    #[serde(default)]
    pub use_api: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// 로컬 전용 검색 쿼리.
#[derive(Debug, Deserialize)]
pub struct LoadQuery {
    pub q: String,
}

/// 통합 검색 결과 항목.
///
/// 로컬 마스터와 외부 검색 결과를 하나의 형식으로 합칩니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSearchResult {
    pub symbol: String,
    pub name: String,
    /// "local" | "external"
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// 외부 검색으로 폴백할지 판정합니다.
///
/// 로컬 결과가 비어 있고 호출자가 명시적으로 허용했을 때만
/// 폴백합니다.
fn should_use_remote(local_empty: bool, use_api: bool) -> bool {
    local_empty && use_api
}

/// 티커 검색 (로컬 우선, 선택적 외부 폴백).
///
/// GET /api/ticker/search?q=appl&use_api=true
pub async fn ticker_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<TickerSearchResult>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let limit = query.limit.clamp(1, 50);

    // 1차: 로컬 증권 마스터
    let local = SecurityRepository::search(&state.db_pool, q, limit)
        .await
        .map_err(db_error)?;

    if !should_use_remote(local.is_empty(), query.use_api) {
        let results = local
            .into_iter()
            .map(|sec| TickerSearchResult {
                symbol: sec.symbol,
                name: sec.name,
                source: "local".to_string(),
                region: sec.country,
                sector: sec.sector,
            })
            .collect();
        return Ok(Json(results));
    }

    // 2차: 외부 심볼 검색 (실패 시 빈 목록)
    debug!(query = q, "Local search empty, falling back to external");
    let external = state.market.search_symbols(q).await;
    let results = external
        .into_iter()
        .take(limit as usize)
        .map(|m| TickerSearchResult {
            symbol: m.symbol,
            name: m.name,
            source: "external".to_string(),
            region: if m.region.is_empty() {
                None
            } else {
                Some(m.region)
            },
            sector: None,
        })
        .collect();

    Ok(Json(results))
}

/// 로컬 전용 퍼지 검색 (최대 100건).
///
/// GET /api/ticker/load?q=tech
pub async fn ticker_load(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoadQuery>,
) -> ApiResult<Json<Vec<TickerSearchResult>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let local = SecurityRepository::search(&state.db_pool, q, 100)
        .await
        .map_err(db_error)?;

    let results = local
        .into_iter()
        .map(|sec| TickerSearchResult {
            symbol: sec.symbol,
            name: sec.name,
            source: "local".to_string(),
            region: sec.country,
            sector: sec.sector,
        })
        .collect();

    Ok(Json(results))
}

/// 티커 라우터 생성.
pub fn ticker_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(ticker_search))
        .route("/load", get(ticker_load))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_fallback_only_when_local_empty_and_allowed() {
        // 로컬 결과 있음 → 항상 로컬
        assert!(!should_use_remote(false, true));
        assert!(!should_use_remote(false, false));

        // 로컬 비어 있음 → use_api가 켜진 경우에만 외부
        assert!(should_use_remote(true, true));
        assert!(!should_use_remote(true, false));
    }

    #[test]
    fn test_search_result_serialization() {
        let result = TickerSearchResult {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            source: "local".to_string(),
            region: None,
            sector: Some("Technology".to_string()),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""source":"local""#));
        assert!(!json.contains("region"));
        assert!(json.contains(r#""sector":"Technology""#));
    }
}
