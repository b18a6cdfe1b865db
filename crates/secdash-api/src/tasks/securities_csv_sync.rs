//! 스크리너 CSV 기반 증권 마스터 동기화 모듈.
//!
//! 거래소 스크리너에서 내려받은 CSV 파일을 읽어 security_master
//! 테이블을 업데이트합니다.
//!
//! ## CSV 파일 형식
//!
//! ```csv
//! Symbol,Name,Last Sale,Net Change,% Change,Market Cap,Country,IPO Year,Volume,Sector,Industry
//! AAPL,Apple Inc. Common Stock,$190.25,1.33,0.704%,2958585000000.00,United States,1980,48087681,Technology,Computer Manufacturing
//! ```
//!
//! 가격 컬럼의 `$` 접두사와 변동률 컬럼의 `%` 접미사는 제거 후
//! 파싱합니다. 파싱할 수 없는 숫자 컬럼은 `NULL`로 두고, 심볼이나
//! 이름이 비어 있는 행은 스킵합니다.

use std::path::Path;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};

use secdash_core::domain::NewSecurity;
use secdash_core::{CoreError, CoreResult};

use crate::repository::SecurityRepository;

/// CSV 동기화 결과.
#[derive(Debug, Clone, Default)]
pub struct CsvSyncReport {
    /// 처리된 총 레코드 수 (파싱 성공분)
    pub total_processed: usize,
    /// upsert된 행 수
    pub upserted: u64,
    /// 실패한 수
    pub failed: usize,
    /// 스킵된 행 수 (유효하지 않은 레코드)
    pub skipped: usize,
}

/// CSV 라인 파싱 (따옴표 처리).
fn parse_csv_line(line: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            let field = &line[field_start..byte_index(line, i)];
            result.push(field.trim_matches('"'));
            field_start = byte_index(line, i + 1);
        }

        i += 1;
    }

    // 마지막 필드
    if field_start < line.len() {
        let field = &line[field_start..];
        result.push(field.trim_matches('"'));
    }

    result
}

/// 문자 인덱스를 바이트 인덱스로 변환.
fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// `$`/`%`/쉼표를 제거하고 Decimal로 파싱. 실패 시 `None`.
fn parse_decimal_column(raw: &str) -> Option<Decimal> {
    let cleaned = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn parse_i32_column(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn parse_i64_column(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// CSV 내용에서 증권 레코드 파싱.
///
/// 첫 번째 줄은 헤더로 가정합니다. (파싱 성공 목록, 스킵 수)를
/// 반환합니다.
fn parse_securities_csv(content: &str) -> (Vec<NewSecurity>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (line_num, line) in content.lines().enumerate() {
        // 헤더 스킵
        if line_num == 0 {
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts = parse_csv_line(line);
        if parts.len() < 2 {
            warn!(line = line_num + 1, "Skipping malformed CSV row");
            skipped += 1;
            continue;
        }

        let symbol = parts[0].trim().to_string();
        let name = parts[1].trim().to_string();
        if symbol.is_empty() || name.is_empty() {
            skipped += 1;
            continue;
        }

        let get = |idx: usize| parts.get(idx).copied().unwrap_or("");

        records.push(NewSecurity {
            symbol,
            name,
            last_sale: parse_decimal_column(get(2)),
            net_change: parse_decimal_column(get(3)),
            percent_change: parse_decimal_column(get(4)),
            market_cap: parse_decimal_column(get(5)),
            country: optional_text(get(6)),
            ipo_year: parse_i32_column(get(7)),
            volume: parse_i64_column(get(8)),
            sector: optional_text(get(9)),
            industry: optional_text(get(10)),
        });
    }

    (records, skipped)
}

/// CSV 파일에서 증권 마스터를 읽어 DB에 동기화.
///
/// # Arguments
/// * `pool` - PostgreSQL 연결 풀
/// * `csv_path` - CSV 파일 경로
pub async fn sync_securities_from_csv<P: AsRef<Path>>(
    pool: &PgPool,
    csv_path: P,
) -> CoreResult<CsvSyncReport> {
    let csv_path = csv_path.as_ref();
    info!(path = %csv_path.display(), "Loading securities CSV");

    let content = tokio::fs::read_to_string(csv_path)
        .await
        .map_err(|err| CoreError::Data(format!("CSV 파일을 읽을 수 없습니다: {err}")))?;

    let (records, skipped) = parse_securities_csv(&content);

    if records.is_empty() {
        warn!("No valid records found in securities CSV");
        return Ok(CsvSyncReport {
            skipped,
            ..Default::default()
        });
    }

    info!(count = records.len(), skipped, "Parsed securities CSV");

    let upserted = SecurityRepository::upsert_batch(pool, &records)
        .await
        .map_err(|err| CoreError::Database(err.to_string()))?;

    let report = CsvSyncReport {
        total_processed: records.len(),
        upserted,
        failed: 0,
        skipped,
    };

    info!(
        total = report.total_processed,
        upserted = report.upserted,
        skipped = report.skipped,
        "Securities CSV sync complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "Symbol,Name,Last Sale,Net Change,% Change,Market Cap,Country,IPO Year,Volume,Sector,Industry";

    #[test]
    fn test_parse_full_row() {
        let csv = format!(
            "{HEADER}\nAAPL,Apple Inc. Common Stock,$190.25,1.33,0.704%,2958585000000.00,United States,1980,48087681,Technology,Computer Manufacturing"
        );

        let (records, skipped) = parse_securities_csv(&csv);

        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.symbol, "AAPL");
        assert_eq!(rec.last_sale, Some(dec!(190.25)));
        assert_eq!(rec.percent_change, Some(dec!(0.704)));
        assert_eq!(rec.ipo_year, Some(1980));
        assert_eq!(rec.volume, Some(48_087_681));
        assert_eq!(rec.sector.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_parse_quoted_name_with_comma() {
        let csv = format!("{HEADER}\nBRK.A,\"Berkshire Hathaway Inc., Class A\",$600000,,,,,,,,");

        let (records, _) = parse_securities_csv(&csv);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Berkshire Hathaway Inc., Class A");
        assert_eq!(records[0].last_sale, Some(dec!(600000)));
    }

    #[test]
    fn test_skip_rows_without_symbol_or_name() {
        let csv = format!("{HEADER}\n,No Symbol,$1,,,,,,,,\nXYZ,,,,,,,,,,\nOK,Valid Co,,,,,,,,,");

        let (records, skipped) = parse_securities_csv(&csv);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "OK");
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_unparseable_numbers_become_null() {
        let csv = format!("{HEADER}\nXYZ,Xyz Corp,N/A,--,n/a%,,United States,notayear,,,");

        let (records, skipped) = parse_securities_csv(&csv);

        assert_eq!(skipped, 0);
        let rec = &records[0];
        assert!(rec.last_sale.is_none());
        assert!(rec.net_change.is_none());
        assert!(rec.percent_change.is_none());
        assert!(rec.ipo_year.is_none());
        assert!(rec.volume.is_none());
    }

    #[test]
    fn test_short_row_tolerated() {
        // 뒤쪽 컬럼이 없는 행도 심볼/이름만 있으면 허용
        let csv = format!("{HEADER}\nABC,Abc Inc.");

        let (records, skipped) = parse_securities_csv(&csv);

        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 1);
        assert!(records[0].last_sale.is_none());
    }

    #[test]
    fn test_market_cap_with_thousand_separators() {
        assert_eq!(
            parse_decimal_column("2,958,585,000,000.00"),
            Some(dec!(2958585000000.00))
        );
        assert_eq!(parse_decimal_column("$0.05"), Some(dec!(0.05)));
        assert_eq!(parse_decimal_column("-1.2%"), Some(dec!(-1.2)));
        assert_eq!(parse_decimal_column(""), None);
    }
}
