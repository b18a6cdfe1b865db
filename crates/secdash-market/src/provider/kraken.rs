//! Kraken 페어별 OHLC 클라이언트.
//!
//! 응답 봉투는 `{error: [...], result: {<페어 키>: 행 배열, last: ...}}`
//! 형태입니다. 봉투의 에러 목록이 비어있지 않으면 전송 실패와 동일하게
//! 실패로 취급합니다 - 부분 성공이 아닙니다.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use secdash_core::config::ProviderConfig;
use secdash_core::OhlcInterval;

use crate::error::ProviderError;
use crate::outcome::FetchOutcome;
use crate::provider::build_http_client;

/// 제공자 원본 OHLC 행.
///
/// JSON 배열 `[time, open, high, low, close, vwap, volume, count]`에서
/// 역직렬화됩니다. 가격 필드는 제공자 원본 문자열이므로 사용 전에
/// [`crate::convert`]로 변환해야 합니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawOhlcRow")]
pub struct OhlcRow {
    /// Unix 타임스탬프 (초)
    pub time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub vwap: String,
    pub volume: String,
    /// 체결 건수
    pub count: i64,
}

type RawOhlcRow = (i64, String, String, String, String, String, String, i64);

impl From<RawOhlcRow> for OhlcRow {
    fn from(raw: RawOhlcRow) -> Self {
        let (time, open, high, low, close, vwap, volume, count) = raw;
        Self {
            time,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OhlcEnvelope {
    #[serde(default)]
    error: Vec<String>,
    result: Option<Value>,
}

/// Kraken OHLC 클라이언트.
#[derive(Debug, Clone)]
pub struct KrakenClient {
    client: reqwest::Client,
    base_url: String,
}

impl KrakenClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(config.request_timeout_secs)?,
            base_url: config.kraken_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 페어 OHLC 조회.
    ///
    /// # 인자
    ///
    /// * `pair` - 거래 페어 (예: "XBTUSD")
    /// * `interval` - 허용 집합 내의 분 단위 간격
    /// * `since` - 선택적 시작 타임스탬프 (초)
    pub async fn fetch_ohlc(
        &self,
        pair: &str,
        interval: OhlcInterval,
        since: Option<i64>,
    ) -> FetchOutcome<Vec<OhlcRow>> {
        let mut url = format!(
            "{}/OHLC?pair={}&interval={}",
            self.base_url,
            pair,
            interval.as_minutes()
        );
        if let Some(since) = since {
            url.push_str(&format!("&since={}", since));
        }

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(pair, error = %e, "Kraken OHLC request failed");
                return FetchOutcome::Failed(e.into());
            }
        };

        if !response.status().is_success() {
            warn!(pair, status = %response.status(), "Kraken OHLC returned non-success status");
            return FetchOutcome::Failed(ProviderError::Http(format!(
                "Kraken 응답 상태: {}",
                response.status()
            )));
        }

        let envelope: OhlcEnvelope = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(pair, error = %e, "Kraken OHLC response parse failed");
                return FetchOutcome::Failed(ProviderError::Parse(e.to_string()));
            }
        };

        // 봉투의 에러 목록도 실패로 취급 (예: 알 수 없는 페어)
        if !envelope.error.is_empty() {
            let message = envelope.error.join("; ");
            warn!(pair, error = %message, "Kraken OHLC reported provider error");
            return FetchOutcome::Failed(ProviderError::Api(message));
        }

        let Some(Value::Object(result)) = envelope.result else {
            return FetchOutcome::Missing;
        };

        // result는 페어 키 하나와 "last" 커서를 포함한다
        let rows_value = result
            .iter()
            .find(|(key, _)| key.as_str() != "last")
            .map(|(_, value)| value.clone());

        let Some(rows_value) = rows_value else {
            return FetchOutcome::Missing;
        };

        match serde_json::from_value::<Vec<OhlcRow>>(rows_value) {
            Ok(rows) if rows.is_empty() => FetchOutcome::Missing,
            Ok(rows) => FetchOutcome::Hit(rows),
            Err(e) => {
                warn!(pair, error = %e, "Kraken OHLC rows parse failed");
                FetchOutcome::Failed(ProviderError::Parse(e.to_string()))
            }
        }
    }
}
