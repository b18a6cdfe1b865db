//! 증권 마스터 레코드.
//!
//! 거래소 상장 종목의 참조 데이터입니다. 심볼 단위로 대량 upsert되며
//! 비키 컬럼은 last-write-wins 의미론을 따릅니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 증권 마스터 레코드.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: i32,
    /// 심볼 (unique)
    pub symbol: String,
    pub name: String,
    pub last_sale: Option<Decimal>,
    pub net_change: Option<Decimal>,
    pub percent_change: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub country: Option<String>,
    pub ipo_year: Option<i32>,
    pub volume: Option<i64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// 신규 삽입/upsert용 증권 레코드.
#[derive(Debug, Clone, Default)]
pub struct NewSecurity {
    pub symbol: String,
    pub name: String,
    pub last_sale: Option<Decimal>,
    pub net_change: Option<Decimal>,
    pub percent_change: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub country: Option<String>,
    pub ipo_year: Option<i32>,
    pub volume: Option<i64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl NewSecurity {
    /// 심볼과 이름만으로 레코드를 생성합니다.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}
