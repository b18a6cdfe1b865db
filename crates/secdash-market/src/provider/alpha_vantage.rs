//! Alpha Vantage 일봉/심볼 검색 클라이언트.
//!
//! Alpha Vantage 응답은 필드 키가 번호 매긴 설명 문자열입니다
//! (예: `"1. open"`). 이 형태는 HTTP 경계에서 serde rename으로 한 번만
//! 타입화된 레코드로 파싱되며 비즈니스 로직으로 흘러가지 않습니다.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use secdash_core::config::ProviderConfig;

use crate::error::ProviderError;
use crate::outcome::FetchOutcome;
use crate::provider::build_http_client;

/// 일봉 레코드 (제공자 원본 - 필드는 문자열).
///
/// 일반 소비자가 사용하기 전에 반드시 [`crate::convert`]로 변환해야
/// 합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

/// 심볼 검색 매치.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(rename = "3. type", default)]
    pub asset_type: String,
    #[serde(rename = "4. region", default)]
    pub region: String,
    #[serde(rename = "8. currency", default)]
    pub currency: String,
    #[serde(rename = "9. matchScore", default)]
    pub match_score: String,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SymbolMatch>,
}

/// Alpha Vantage 클라이언트.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl AlphaVantageClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(config.request_timeout_secs)?,
            base_url: config
                .alpha_vantage_base_url
                .trim_end_matches('/')
                .to_string(),
            api_key: config.alpha_vantage_api_key.clone(),
        })
    }

    /// API 키 설정 여부.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 일봉 데이터 조회.
    ///
    /// ISO 날짜 문자열 → 일봉 레코드 매핑을 반환합니다. 키 미설정이면
    /// 호출 없이 `Missing`, 실패 시 로깅 후 `Failed`.
    pub async fn fetch_daily_bars(
        &self,
        ticker: &str,
    ) -> FetchOutcome<BTreeMap<String, DailyBar>> {
        let Some(api_key) = &self.api_key else {
            debug!("Alpha Vantage API key not configured, skipping daily bars");
            return FetchOutcome::Missing;
        };

        let url = format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
            self.base_url,
            ticker,
            api_key.expose_secret()
        );

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(ticker, error = %e, "Alpha Vantage daily bars request failed");
                return FetchOutcome::Failed(e.into());
            }
        };

        if !response.status().is_success() {
            warn!(ticker, status = %response.status(), "Alpha Vantage daily bars returned non-success status");
            return FetchOutcome::Failed(ProviderError::Http(format!(
                "Alpha Vantage 응답 상태: {}",
                response.status()
            )));
        }

        let body: DailyResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(ticker, error = %e, "Alpha Vantage daily bars parse failed");
                return FetchOutcome::Failed(ProviderError::Parse(e.to_string()));
            }
        };

        match body.time_series {
            Some(bars) if !bars.is_empty() => FetchOutcome::Hit(bars),
            // 시계열 키가 없는 본문은 rate limit 안내 또는 미존재 심볼
            _ => FetchOutcome::Missing,
        }
    }

    /// 심볼 검색.
    ///
    /// 외부 검색 API의 매치를 그대로 반환합니다. 로컬 저장소 우선
    /// 규칙은 호출자(티커 검색 라우트)의 책임입니다.
    pub async fn search_symbols(&self, query: &str) -> FetchOutcome<Vec<SymbolMatch>> {
        let Some(api_key) = &self.api_key else {
            debug!("Alpha Vantage API key not configured, skipping symbol search");
            return FetchOutcome::Missing;
        };

        let url = format!(
            "{}/query?function=SYMBOL_SEARCH&keywords={}&apikey={}",
            self.base_url,
            query,
            api_key.expose_secret()
        );

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(query, error = %e, "Alpha Vantage symbol search request failed");
                return FetchOutcome::Failed(e.into());
            }
        };

        if !response.status().is_success() {
            warn!(query, status = %response.status(), "Alpha Vantage symbol search returned non-success status");
            return FetchOutcome::Failed(ProviderError::Http(format!(
                "Alpha Vantage 응답 상태: {}",
                response.status()
            )));
        }

        match response.json::<SearchResponse>().await {
            Ok(body) => FetchOutcome::Hit(body.best_matches),
            Err(e) => {
                warn!(query, error = %e, "Alpha Vantage symbol search parse failed");
                FetchOutcome::Failed(ProviderError::Parse(e.to_string()))
            }
        }
    }
}
