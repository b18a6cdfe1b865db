//! 정규화된 시계열 데이터 타입.
//!
//! 모든 업스트림 제공자의 응답은 이 모듈의 `TimeSeriesData` 형태로
//! 수렴합니다. 차트, API 라우트 등 모든 소비자는 제공자별 원본 형태가
//! 아닌 이 형태에만 의존합니다.

use serde::{Deserialize, Serialize};

/// OHLCV 캔들 하나.
///
/// 가격과 거래량은 모두 부동소수점입니다. 잘 구성된 업스트림 데이터는
/// `low <= open, close <= high`를 만족하지만 별도로 강제하지 않습니다
/// (업스트림 신뢰).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleData {
    /// Unix 타임스탬프 (밀리초)
    pub timestamp: i64,
    /// ISO 날짜 문자열 (YYYY-MM-DD)
    pub date: String,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}

/// 정규화된 캔들 시계열.
///
/// `candles`는 항상 타임스탬프 내림차순(최신 먼저)으로 정렬됩니다.
/// 이 정렬은 모든 다운스트림 소비자(차트, 최신가 조회)가 의존하는
/// 계약입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesData {
    /// 거래 심볼/페어
    pub symbol: String,
    /// 시간 간격 태그 (예: "1d", "1h", "15m")
    pub interval: String,
    /// 타임스탬프 내림차순 정렬된 캔들 배열
    pub candles: Vec<CandleData>,
    /// 변환 시점의 벽시계 시간 (Unix 밀리초)
    pub last_updated: i64,
}

impl TimeSeriesData {
    /// 새 시계열을 생성합니다. 캔들은 타임스탬프 내림차순으로 정렬됩니다.
    pub fn new(
        symbol: impl Into<String>,
        interval: impl Into<String>,
        mut candles: Vec<CandleData>,
    ) -> Self {
        candles.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            candles,
            last_updated: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// 가장 최근 캔들을 반환합니다.
    pub fn latest(&self) -> Option<&CandleData> {
        self.candles.first()
    }

    /// 캔들 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// 캔들이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
