//! 제공자 원본 형태 → 정규 캔들 변환기.
//!
//! 두 변환기 모두 반환 전에 캔들을 타임스탬프 내림차순(최신 먼저)으로
//! 정렬합니다. 이 정렬은 모든 다운스트림 소비자가 의존하는 계약입니다.
//!
//! 날짜나 숫자 필드를 파싱할 수 없는 행은 경고 로깅 후 건너뜁니다.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use tracing::warn;

use secdash_core::{interval_label, CandleData, TimeSeriesData};

use crate::provider::{DailyBar, OhlcRow};

/// 일봉 제공자의 날짜 키 매핑을 캔들 배열로 변환합니다.
///
/// 날짜 키마다 하나의 캔들을 생성합니다. 타임스탬프는 날짜 문자열을
/// UTC 자정으로 파싱한 값이며, 문자열 필드는 부동소수점으로 파싱됩니다.
/// 결과는 타임스탬프 내림차순으로 정렬됩니다.
pub fn candles_from_daily_bars(bars: &BTreeMap<String, DailyBar>) -> Vec<CandleData> {
    let mut candles: Vec<CandleData> = bars
        .iter()
        .filter_map(|(date, bar)| {
            let midnight = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(d) => d.and_hms_opt(0, 0, 0)?.and_utc(),
                Err(e) => {
                    warn!(date, error = %e, "Skipping daily bar with unparseable date");
                    return None;
                }
            };

            let parsed = (
                bar.open.parse::<f64>(),
                bar.high.parse::<f64>(),
                bar.low.parse::<f64>(),
                bar.close.parse::<f64>(),
                bar.volume.parse::<f64>(),
            );
            let (Ok(open), Ok(high), Ok(low), Ok(close), Ok(volume)) = parsed else {
                warn!(date, "Skipping daily bar with unparseable numeric field");
                return None;
            };

            Some(CandleData {
                timestamp: midnight.timestamp_millis(),
                date: date.clone(),
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect();

    candles.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    candles
}

/// 거래소 OHLC 행 배열을 캔들 배열로 변환합니다.
///
/// `timestamp_millis = time_seconds * 1000`이며, ISO 날짜는 일 단위로
/// 절단하여 유도합니다. 결과는 타임스탬프 내림차순으로 정렬됩니다.
pub fn candles_from_ohlc_rows(rows: &[OhlcRow]) -> Vec<CandleData> {
    let mut candles: Vec<CandleData> = rows
        .iter()
        .filter_map(|row| {
            let Some(datetime) = DateTime::from_timestamp(row.time, 0) else {
                warn!(time = row.time, "Skipping OHLC row with out-of-range timestamp");
                return None;
            };

            let parsed = (
                row.open.parse::<f64>(),
                row.high.parse::<f64>(),
                row.low.parse::<f64>(),
                row.close.parse::<f64>(),
                row.volume.parse::<f64>(),
            );
            let (Ok(open), Ok(high), Ok(low), Ok(close), Ok(volume)) = parsed else {
                warn!(time = row.time, "Skipping OHLC row with unparseable numeric field");
                return None;
            };

            Some(CandleData {
                timestamp: row.time * 1000,
                date: datetime.format("%Y-%m-%d").to_string(),
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect();

    candles.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    candles
}

/// 일봉 매핑에서 정규 시계열을 구성합니다. 간격 태그는 `"1d"` 고정.
pub fn daily_series(symbol: &str, bars: &BTreeMap<String, DailyBar>) -> TimeSeriesData {
    TimeSeriesData::new(symbol, "1d", candles_from_daily_bars(bars))
}

/// OHLC 행에서 정규 시계열을 구성합니다.
///
/// 간격 태그는 분 단위 값으로 고정 테이블에서 조회하며, 테이블 밖의
/// 값은 `"{N}m"`으로 표기됩니다.
pub fn ohlc_series(pair: &str, interval_minutes: u32, rows: &[OhlcRow]) -> TimeSeriesData {
    TimeSeriesData::new(
        pair,
        interval_label(interval_minutes),
        candles_from_ohlc_rows(rows),
    )
}
