//! CoinGecko 암호화폐 현물 시세 클라이언트.
//!
//! 요청한 식별자 목록을 하나의 배치 호출로 조회합니다. API 키가 필요
//! 없습니다.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use secdash_core::config::ProviderConfig;
use secdash_core::{AssetType, MarketData};

use crate::error::ProviderError;
use crate::outcome::FetchOutcome;
use crate::provider::build_http_client;

/// 식별자별 시세 항목.
#[derive(Debug, Deserialize)]
struct SpotEntry {
    usd: f64,
    usd_24h_change: Option<f64>,
}

/// CoinGecko 현물 시세 클라이언트.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(config.request_timeout_secs)?,
            base_url: config.coingecko_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 암호화폐 현물 시세 일괄 조회.
    ///
    /// 요청한 식별자당 하나의 `MarketData`를 반환합니다 (`type=crypto`,
    /// 심볼은 대문자). 응답에 없는 식별자는 건너뜁니다.
    ///
    /// HTTP 실패나 네트워크 에러는 로깅 후 `Failed`로 반환되며, 호출자는
    /// 빈 결과를 "이용 불가"로 취급해야 합니다.
    pub async fn fetch_spot(&self, ids: &[String]) -> FetchOutcome<Vec<MarketData>> {
        if ids.is_empty() {
            return FetchOutcome::Missing;
        }

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url,
            ids.join(",")
        );

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "CoinGecko spot request failed");
                return FetchOutcome::Failed(e.into());
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "CoinGecko spot returned non-success status");
            return FetchOutcome::Failed(ProviderError::Http(format!(
                "CoinGecko 응답 상태: {}",
                response.status()
            )));
        }

        let prices: HashMap<String, SpotEntry> = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "CoinGecko spot response parse failed");
                return FetchOutcome::Failed(ProviderError::Parse(e.to_string()));
            }
        };

        let data = ids
            .iter()
            .filter_map(|id| {
                prices.get(id).map(|entry| MarketData {
                    symbol: id.to_uppercase(),
                    name: id.clone(),
                    price: entry.usd,
                    change_24h: entry.usd_24h_change,
                    asset_type: AssetType::Crypto,
                })
            })
            .collect();

        FetchOutcome::Hit(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(server: &mockito::ServerGuard) -> ProviderConfig {
        ProviderConfig {
            coingecko_base_url: server.url(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_spot_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"bitcoin":{"usd":42000.5,"usd_24h_change":2.5},"ethereum":{"usd":2200.0,"usd_24h_change":-1.2}}"#,
            )
            .create_async()
            .await;

        let client = CoinGeckoClient::new(&config_for(&server)).unwrap();
        let outcome = client
            .fetch_spot(&["bitcoin".to_string(), "ethereum".to_string()])
            .await;

        let data = outcome.into_option().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].symbol, "BITCOIN");
        assert_eq!(data[0].name, "bitcoin");
        assert_eq!(data[0].price, 42000.5);
        assert_eq!(data[0].change_24h, Some(2.5));
        assert_eq!(data[0].asset_type, AssetType::Crypto);
    }

    #[tokio::test]
    async fn test_fetch_spot_server_error_collapses_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = CoinGeckoClient::new(&config_for(&server)).unwrap();
        let outcome = client.fetch_spot(&["bitcoin".to_string()]).await;

        // 장애는 Failed로 기록되고 빈 목록으로 수렴한다 - 예외가 아님
        assert!(outcome.is_failed());
        assert!(outcome.data_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_spot_skips_ids_absent_from_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"bitcoin":{"usd":42000.5,"usd_24h_change":null}}"#)
            .create_async()
            .await;

        let client = CoinGeckoClient::new(&config_for(&server)).unwrap();
        let data = client
            .fetch_spot(&["bitcoin".to_string(), "unknown-coin".to_string()])
            .await
            .data_or_default();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].symbol, "BITCOIN");
        assert_eq!(data[0].change_24h, None);
    }

    #[tokio::test]
    async fn test_fetch_spot_empty_ids_is_missing() {
        let server = mockito::Server::new_async().await;
        let client = CoinGeckoClient::new(&config_for(&server)).unwrap();
        let outcome = client.fetch_spot(&[]).await;
        assert!(!outcome.is_hit());
        assert!(!outcome.is_failed());
    }
}
