//! 도메인 모델.
//!
//! 이 모듈은 대시보드의 핵심 엔티티를 정의합니다:
//! - `CandleData` / `TimeSeriesData` - 정규화된 시계열 데이터
//! - `MarketData` - 현물 시세 스냅샷
//! - `Security` - 증권 마스터 레코드
//! - `User` / `Session` - 인증 엔티티

pub mod candle;
pub mod security;
pub mod session;
pub mod spot;

pub use candle::{CandleData, TimeSeriesData};
pub use security::{NewSecurity, Security};
pub use session::{Session, SessionValidity, User};
pub use spot::{AssetType, MarketData};
