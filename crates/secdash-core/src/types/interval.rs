//! 캔들 데이터를 위한 간격(interval) 정의.
//!
//! 페어별 OHLC 제공자는 분 단위 간격의 고정 집합만 허용합니다.
//! 사람이 읽는 간격 태그는 고정 테이블에서 조회하며, 테이블에 없는
//! 값은 `"{N}m"` 형식으로 표기합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 페어별 OHLC 제공자가 허용하는 분 단위 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OhlcInterval {
    /// 1분봉
    M1,
    /// 5분봉
    M5,
    /// 15분봉
    M15,
    /// 30분봉
    M30,
    /// 1시간봉
    H1,
    /// 4시간봉
    H4,
    /// 일봉
    D1,
    /// 주봉
    W1,
    /// 15일봉
    D15,
}

impl OhlcInterval {
    /// 분 단위 값을 반환합니다.
    pub fn as_minutes(&self) -> u32 {
        match self {
            OhlcInterval::M1 => 1,
            OhlcInterval::M5 => 5,
            OhlcInterval::M15 => 15,
            OhlcInterval::M30 => 30,
            OhlcInterval::H1 => 60,
            OhlcInterval::H4 => 240,
            OhlcInterval::D1 => 1440,
            OhlcInterval::W1 => 10080,
            OhlcInterval::D15 => 21600,
        }
    }

    /// 사람이 읽는 간격 태그를 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            OhlcInterval::M1 => "1m",
            OhlcInterval::M5 => "5m",
            OhlcInterval::M15 => "15m",
            OhlcInterval::M30 => "30m",
            OhlcInterval::H1 => "1h",
            OhlcInterval::H4 => "4h",
            OhlcInterval::D1 => "1d",
            OhlcInterval::W1 => "1w",
            OhlcInterval::D15 => "15d",
        }
    }

    /// 분 단위 값에서 간격을 생성합니다. 허용 집합 밖이면 None.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            1 => Some(OhlcInterval::M1),
            5 => Some(OhlcInterval::M5),
            15 => Some(OhlcInterval::M15),
            30 => Some(OhlcInterval::M30),
            60 => Some(OhlcInterval::H1),
            240 => Some(OhlcInterval::H4),
            1440 => Some(OhlcInterval::D1),
            10080 => Some(OhlcInterval::W1),
            21600 => Some(OhlcInterval::D15),
            _ => None,
        }
    }

    /// 허용되는 모든 간격.
    pub fn all() -> [OhlcInterval; 9] {
        [
            OhlcInterval::M1,
            OhlcInterval::M5,
            OhlcInterval::M15,
            OhlcInterval::M30,
            OhlcInterval::H1,
            OhlcInterval::H4,
            OhlcInterval::D1,
            OhlcInterval::W1,
            OhlcInterval::D15,
        ]
    }
}

impl fmt::Display for OhlcInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OhlcInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 분 단위 숫자 또는 태그 문자열 모두 허용
        if let Ok(minutes) = s.parse::<u32>() {
            return OhlcInterval::from_minutes(minutes)
                .ok_or_else(|| format!("Unsupported interval minutes: {}", minutes));
        }
        match s {
            "1m" => Ok(OhlcInterval::M1),
            "5m" => Ok(OhlcInterval::M5),
            "15m" => Ok(OhlcInterval::M15),
            "30m" => Ok(OhlcInterval::M30),
            "1h" => Ok(OhlcInterval::H1),
            "4h" => Ok(OhlcInterval::H4),
            "1d" => Ok(OhlcInterval::D1),
            "1w" => Ok(OhlcInterval::W1),
            "15d" => Ok(OhlcInterval::D15),
            _ => Err(format!("Unknown interval: {}", s)),
        }
    }
}

/// 분 단위 값에 대한 간격 태그를 반환합니다.
///
/// 고정 테이블에 있는 9개 값은 해당 태그를, 그 외의 값은 `"{N}m"`을
/// 반환합니다 (예: 7 → "7m").
pub fn interval_label(minutes: u32) -> String {
    match OhlcInterval::from_minutes(minutes) {
        Some(interval) => interval.label().to_string(),
        None => format!("{}m", minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table_complete() {
        let expected = [
            (1, "1m"),
            (5, "5m"),
            (15, "15m"),
            (30, "30m"),
            (60, "1h"),
            (240, "4h"),
            (1440, "1d"),
            (10080, "1w"),
            (21600, "15d"),
        ];
        for (minutes, label) in expected {
            assert_eq!(interval_label(minutes), label);
        }
    }

    #[test]
    fn test_unlisted_minutes_fallback() {
        assert_eq!(interval_label(7), "7m");
        assert_eq!(interval_label(90), "90m");
    }

    #[test]
    fn test_roundtrip_minutes() {
        for interval in OhlcInterval::all() {
            assert_eq!(
                OhlcInterval::from_minutes(interval.as_minutes()),
                Some(interval)
            );
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1440".parse::<OhlcInterval>().unwrap(), OhlcInterval::D1);
        assert_eq!("1h".parse::<OhlcInterval>().unwrap(), OhlcInterval::H1);
        assert!("7".parse::<OhlcInterval>().is_err());
        assert!("2d".parse::<OhlcInterval>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 테이블에 없는 분 값은 전부 "{N}m" 형식으로 떨어진다.
            #[test]
            fn unlisted_minutes_use_generic_label(minutes in 0u32..1_000_000) {
                prop_assume!(OhlcInterval::from_minutes(minutes).is_none());
                prop_assert_eq!(interval_label(minutes), format!("{}m", minutes));
            }

            /// 허용 집합의 간격은 분 값과 태그 문자열 양쪽으로 왕복한다.
            #[test]
            fn listed_intervals_roundtrip(
                interval in prop::sample::select(OhlcInterval::all().to_vec())
            ) {
                prop_assert_eq!(
                    OhlcInterval::from_minutes(interval.as_minutes()),
                    Some(interval)
                );
                prop_assert_eq!(
                    interval.label().parse::<OhlcInterval>().ok(),
                    Some(interval)
                );
            }
        }
    }
}
