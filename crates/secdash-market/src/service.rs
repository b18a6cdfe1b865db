//! 시장 데이터 파사드.
//!
//! 제공자 조회와 정규 변환을 조합합니다. 파사드 메서드는 업스트림
//! 장애 시 `None`/빈 값을 반환하며 호출자에게 절대 에러를 던지지
//! 않습니다.

use tracing::debug;

use secdash_core::config::ProviderConfig;
use secdash_core::{MarketData, OhlcInterval, TimeSeriesData};

use crate::convert;
use crate::error::ProviderError;
use crate::outcome::FetchOutcome;
use crate::provider::{AlphaVantageClient, CoinGeckoClient, FinnhubClient, KrakenClient, SymbolMatch};

/// 시장 데이터 서비스.
///
/// 생성 시점에 명시적으로 주입되는 의존성(설정, HTTP 클라이언트)만
/// 사용합니다 - 전역 싱글턴 없음.
#[derive(Debug, Clone)]
pub struct MarketDataService {
    coingecko: CoinGeckoClient,
    finnhub: FinnhubClient,
    alpha_vantage: AlphaVantageClient,
    kraken: KrakenClient,
}

impl MarketDataService {
    /// 설정에서 서비스를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            coingecko: CoinGeckoClient::new(config)?,
            finnhub: FinnhubClient::new(config)?,
            alpha_vantage: AlphaVantageClient::new(config)?,
            kraken: KrakenClient::new(config)?,
        })
    }

    /// 암호화폐 현물 시세 일괄 조회.
    ///
    /// 실패 시 빈 목록을 반환합니다. 호출자는 빈 결과를 "이용 불가"로
    /// 렌더링해야 합니다.
    pub async fn crypto_spot(&self, ids: &[String]) -> Vec<MarketData> {
        self.coingecko.fetch_spot(ids).await.data_or_default()
    }

    /// 주식 현재가 조회. 키 미설정 또는 실패 시 `None`.
    pub async fn stock_quote(&self, symbol: &str) -> Option<MarketData> {
        self.finnhub.fetch_quote(symbol).await.into_option()
    }

    /// 외부 심볼 검색. 실패 시 빈 목록.
    pub async fn search_symbols(&self, query: &str) -> Vec<SymbolMatch> {
        self.alpha_vantage
            .search_symbols(query)
            .await
            .data_or_default()
    }

    /// 티커의 정규화된 일봉 시계열 조회.
    ///
    /// 일봉 조회 → `null` 확인 → 정규 변환. 업스트림 실패 시 `None`.
    pub async fn daily_series(&self, ticker: &str) -> Option<TimeSeriesData> {
        let bars = self.alpha_vantage.fetch_daily_bars(ticker).await;
        match bars {
            FetchOutcome::Hit(bars) => {
                let series = convert::daily_series(ticker, &bars);
                debug!(ticker, candles = series.len(), "Converted daily series");
                Some(series)
            }
            FetchOutcome::Missing | FetchOutcome::Failed(_) => None,
        }
    }

    /// 페어의 정규화된 OHLC 시계열 조회.
    ///
    /// OHLC 조회 → 에러 봉투 확인 → 정규 변환. 업스트림 실패 시 `None`.
    pub async fn pair_series(
        &self,
        pair: &str,
        interval: OhlcInterval,
        since: Option<i64>,
    ) -> Option<TimeSeriesData> {
        let rows = self.kraken.fetch_ohlc(pair, interval, since).await;
        match rows {
            FetchOutcome::Hit(rows) => {
                let series = convert::ohlc_series(pair, interval.as_minutes(), &rows);
                debug!(pair, candles = series.len(), "Converted pair series");
                Some(series)
            }
            FetchOutcome::Missing | FetchOutcome::Failed(_) => None,
        }
    }
}
