//! Finnhub 주식 현재가 클라이언트.
//!
//! API 키가 필요합니다. 키가 설정되지 않은 경우 호출을 시도하지 않고
//! 즉시 `Missing`을 반환합니다 - 문서화된 성능 저하 모드이며 에러가
//! 아닙니다.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use secdash_core::config::ProviderConfig;
use secdash_core::{AssetType, MarketData};

use crate::error::ProviderError;
use crate::outcome::FetchOutcome;
use crate::provider::build_http_client;

/// Finnhub quote 응답.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// 현재가
    c: f64,
    /// 전일 종가
    pc: f64,
}

/// Finnhub 주식 현재가 클라이언트.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl FinnhubClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(config.request_timeout_secs)?,
            base_url: config.finnhub_base_url.trim_end_matches('/').to_string(),
            api_key: config.finnhub_api_key.clone(),
        })
    }

    /// API 키 설정 여부.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 주식 현재가 조회.
    ///
    /// `change_24h = (current - previous_close) / previous_close * 100`.
    /// 키 미설정 → 호출 없이 `Missing`, 실패 → 로깅 후 `Failed`.
    pub async fn fetch_quote(&self, symbol: &str) -> FetchOutcome<MarketData> {
        let Some(api_key) = &self.api_key else {
            debug!("Finnhub API key not configured, skipping stock quote");
            return FetchOutcome::Missing;
        };

        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url,
            symbol,
            api_key.expose_secret()
        );

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(symbol, error = %e, "Finnhub quote request failed");
                return FetchOutcome::Failed(e.into());
            }
        };

        if !response.status().is_success() {
            warn!(symbol, status = %response.status(), "Finnhub quote returned non-success status");
            return FetchOutcome::Failed(ProviderError::Http(format!(
                "Finnhub 응답 상태: {}",
                response.status()
            )));
        }

        let quote: QuoteResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(symbol, error = %e, "Finnhub quote response parse failed");
                return FetchOutcome::Failed(ProviderError::Parse(e.to_string()));
            }
        };

        let change_24h = if quote.pc != 0.0 {
            Some((quote.c - quote.pc) / quote.pc * 100.0)
        } else {
            None
        };

        FetchOutcome::Hit(MarketData {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price: quote.c,
            change_24h,
            asset_type: AssetType::Stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(server: &mockito::ServerGuard, key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            finnhub_base_url: server.url(),
            finnhub_api_key: key.map(SecretString::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_returns_missing_without_call() {
        let mut server = mockito::Server::new_async().await;
        // 키가 없으면 이 mock은 절대 호출되지 않아야 한다
        let m = server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = FinnhubClient::new(&config_for(&server, None)).unwrap();
        let outcome = client.fetch_quote("AAPL").await;

        assert!(!outcome.is_hit());
        assert!(!outcome.is_failed());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_quote_computes_change() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"c":110.0,"pc":100.0,"h":112.0,"l":99.0,"o":101.0}"#)
            .create_async()
            .await;

        let client = FinnhubClient::new(&config_for(&server, Some("test-key"))).unwrap();
        let quote = client.fetch_quote("AAPL").await.into_option().unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 110.0);
        assert_eq!(quote.asset_type, AssetType::Stock);
        assert!((quote.change_24h.unwrap() - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_quote_failure_collapses_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = FinnhubClient::new(&config_for(&server, Some("test-key"))).unwrap();
        let outcome = client.fetch_quote("AAPL").await;

        assert!(outcome.is_failed());
        assert!(outcome.into_option().is_none());
    }

    #[tokio::test]
    async fn test_zero_previous_close_omits_change() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"c":5.0,"pc":0.0}"#)
            .create_async()
            .await;

        let client = FinnhubClient::new(&config_for(&server, Some("test-key"))).unwrap();
        let quote = client.fetch_quote("IPOX").await.into_option().unwrap();
        assert_eq!(quote.change_24h, None);
    }
}
