//! # Secdash Core
//!
//! 마켓 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 캔들 및 시계열 데이터 구조체
//! - 현물 시세 스냅샷
//! - 증권 마스터 레코드
//! - 사용자 및 세션 모델
//! - 간격(interval) 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
