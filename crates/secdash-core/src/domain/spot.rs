//! 현물 시세 스냅샷 타입.

use serde::{Deserialize, Serialize};

/// 자산 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// 암호화폐
    Crypto,
    /// 주식
    Stock,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crypto => write!(f, "crypto"),
            Self::Stock => write!(f, "stock"),
        }
    }
}

/// 현물 시세 스냅샷.
///
/// 조회한 종목당 하나의 인스턴스이며 시계열이 아닙니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    /// 심볼 (대문자)
    pub symbol: String,
    /// 이름
    pub name: String,
    /// 현재가
    pub price: f64,
    /// 24시간 변화율 (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
    /// 자산 유형
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_type_field() {
        let data = MarketData {
            symbol: "BITCOIN".to_string(),
            name: "bitcoin".to_string(),
            price: 42000.5,
            change_24h: Some(2.5),
            asset_type: AssetType::Crypto,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""type":"crypto""#));
        assert!(json.contains(r#""change24h":2.5"#));
    }

    #[test]
    fn test_change_24h_omitted_when_none() {
        let data = MarketData {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            price: 190.0,
            change_24h: None,
            asset_type: AssetType::Stock,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("change24h"));
    }
}
