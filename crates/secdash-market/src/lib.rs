//! # Secdash Market
//!
//! 시장 데이터 정규화 계층.
//!
//! 서로 다른 형태의 업스트림 응답(날짜 문자열 키의 일봉 제공자,
//! 숫자 타임스탬프와 거래 페어 키의 거래소 OHLC 제공자, 암호화폐
//! 현물 시세 제공자)을 하나의 정규 시계열 표현으로 변환합니다.
//!
//! # 구성 요소
//!
//! - [`provider`]: 제공자별 HTTP 클라이언트. 응답은 HTTP 경계에서
//!   한 번만 타입으로 파싱되며 비즈니스 로직에 원본 형태가 흘러
//!   들어가지 않습니다.
//! - [`convert`]: 제공자 원본 형태 → `TimeSeriesData` 변환기
//! - [`FetchOutcome`]: Hit/Missing/Failed를 구분하는 조회 결과 타입
//! - [`MarketDataService`]: 조회 + 변환을 조합하는 파사드
//!
//! # 실패 의미론
//!
//! 모든 외부 호출 실패는 경계에서 잡혀 로깅되고 빈/`None` 센티널로
//! 수렴합니다. 이 계층은 전송/파싱 에러를 호출자에게 절대
//! 전파하지 않습니다 (UI 읽기 경로의 "비어있게 저하, 크래시 금지"
//! 정책).

pub mod convert;
pub mod error;
pub mod outcome;
pub mod provider;
pub mod service;

pub use convert::{candles_from_daily_bars, candles_from_ohlc_rows, daily_series, ohlc_series};
pub use error::ProviderError;
pub use outcome::FetchOutcome;
pub use provider::{
    AlphaVantageClient, CoinGeckoClient, DailyBar, FinnhubClient, KrakenClient, OhlcRow,
    SymbolMatch,
};
pub use service::MarketDataService;
