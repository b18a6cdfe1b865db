//! 증권 마스터 라우트.
//!
//! 증권 참조 데이터 조회와 CSV 동기화 트리거를 제공합니다.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use secdash_core::domain::Security;

use crate::error::{db_error, ApiErrorResponse, ApiResult};
use crate::repository::{SecurityPage, SecurityRepository};
use crate::state::AppState;
use crate::tasks::sync_securities_from_csv;

/// 페이지 쿼리.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    /// 페이지당 최대 건수
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    50
}

/// CSV 동기화 요청.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    /// 서버 파일시스템 상의 CSV 경로
    pub path: String,
}

/// CSV 동기화 결과.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub total_processed: usize,
    pub upserted: u64,
    pub failed: usize,
    pub skipped: usize,
}

/// 증권 목록 조회 (페이지 단위).
///
/// GET /api/securities?page=1&limit=50
pub async fn list_securities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<SecurityPage>> {
    let page = query.page.max(1);
    let page_size = query.limit.clamp(1, 500);

    let result = SecurityRepository::list(&state.db_pool, page, page_size)
        .await
        .map_err(db_error)?;
    Ok(Json(result))
}

/// 증권 단건 조회.
///
/// GET /api/securities/{symbol}
pub async fn get_security(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Security>> {
    let security = SecurityRepository::get_by_symbol(&state.db_pool, &symbol)
        .await
        .map_err(db_error)?;

    security.map(Json).ok_or((
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new(
            "NOT_FOUND",
            format!("증권을 찾을 수 없습니다: {symbol}"),
        )),
    ))
}

/// CSV 파일에서 증권 마스터 동기화.
///
/// POST /api/securities/sync
pub async fn sync_securities(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SyncRequest>,
) -> ApiResult<Json<SyncResponse>> {
    let report = sync_securities_from_csv(&state.db_pool, &payload.path)
        .await
        .map_err(|err| {
            if err.is_store_failure() {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse::new("DB_ERROR", err.to_string())),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiErrorResponse::new("CSV_ERROR", err.to_string())),
                )
            }
        })?;

    info!(
        total = report.total_processed,
        skipped = report.skipped,
        upserted = report.upserted,
        "Completed securities CSV sync"
    );

    Ok(Json(SyncResponse {
        total_processed: report.total_processed,
        upserted: report.upserted,
        failed: report.failed,
        skipped: report.skipped,
    }))
}

/// 증권 마스터 라우터 생성.
pub fn securities_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_securities))
        .route("/sync", post(sync_securities))
        .route("/{symbol}", get(get_security))
}
