//! 업스트림 제공자 클라이언트.
//!
//! 제공자별 HTTP 클라이언트를 정의합니다. 각 클라이언트는 응답 본문을
//! HTTP 경계에서 한 번만 타입화된 레코드로 파싱하며, 제공자 원본
//! 형태(번호 매긴 키, 위치 기반 배열 등)는 이 모듈 밖으로 나가지
//! 않습니다.

pub mod alpha_vantage;
pub mod coingecko;
pub mod finnhub;
pub mod kraken;

pub use alpha_vantage::{AlphaVantageClient, DailyBar, SymbolMatch};
pub use coingecko::CoinGeckoClient;
pub use finnhub::FinnhubClient;
pub use kraken::{KrakenClient, OhlcRow};

use crate::error::ProviderError;
use std::time::Duration;

/// 제공자 공용 reqwest 클라이언트 생성.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::Http(format!("HTTP 클라이언트 생성 실패: {}", e)))
}
