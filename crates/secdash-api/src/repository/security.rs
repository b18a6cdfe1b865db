//! Security Repository
//!
//! 증권 마스터 관련 데이터베이스 연산을 담당합니다.

use serde::Serialize;
use sqlx::PgPool;

use secdash_core::domain::{NewSecurity, Security};

/// 페이지 단위 조회 결과.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPage {
    pub items: Vec<Security>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Security Repository
pub struct SecurityRepository;

impl SecurityRepository {
    /// 페이지 단위 전체 조회 (심볼 오름차순).
    pub async fn list(pool: &PgPool, page: i64, page_size: i64) -> Result<SecurityPage, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM security_master")
            .fetch_one(pool)
            .await?;

        let items = sqlx::query_as::<_, Security>(
            r#"
            SELECT * FROM security_master
            ORDER BY symbol
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind((page - 1).max(0) * page_size)
        .fetch_all(pool)
        .await?;

        Ok(SecurityPage {
            items,
            total,
            page,
            page_size,
        })
    }

    /// 심볼 정확 일치 조회.
    pub async fn get_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Security>, sqlx::Error> {
        sqlx::query_as::<_, Security>("SELECT * FROM security_master WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await
    }

    /// 심볼/이름 부분 일치 검색.
    ///
    /// 심볼 접두사 일치를 이름 일치보다 먼저 정렬합니다.
    pub async fn search(
        pool: &PgPool,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Security>, sqlx::Error> {
        let prefix = format!("{query}%");
        let contains = format!("%{query}%");

        sqlx::query_as::<_, Security>(
            r#"
            SELECT * FROM security_master
            WHERE symbol ILIKE $1 OR name ILIKE $2
            ORDER BY
                CASE WHEN UPPER(symbol) = UPPER($3) THEN 0
                     WHEN symbol ILIKE $1 THEN 1
                     ELSE 2 END,
                symbol
            LIMIT $4
            "#,
        )
        .bind(&prefix)
        .bind(&contains)
        .bind(query)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// 섹터별 조회.
    pub async fn list_by_sector(pool: &PgPool, sector: &str) -> Result<Vec<Security>, sqlx::Error> {
        sqlx::query_as::<_, Security>(
            "SELECT * FROM security_master WHERE sector = $1 ORDER BY symbol",
        )
        .bind(sector)
        .fetch_all(pool)
        .await
    }

    /// 단건 upsert. 심볼 충돌 시 비키 컬럼은 last-write-wins.
    pub async fn upsert(pool: &PgPool, input: &NewSecurity) -> Result<Security, sqlx::Error> {
        sqlx::query_as::<_, Security>(
            r#"
            INSERT INTO security_master
                (symbol, name, last_sale, net_change, percent_change, market_cap,
                 country, ipo_year, volume, sector, industry, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            ON CONFLICT (symbol) DO UPDATE
            SET
                name = EXCLUDED.name,
                last_sale = EXCLUDED.last_sale,
                net_change = EXCLUDED.net_change,
                percent_change = EXCLUDED.percent_change,
                market_cap = EXCLUDED.market_cap,
                country = EXCLUDED.country,
                ipo_year = EXCLUDED.ipo_year,
                volume = EXCLUDED.volume,
                sector = EXCLUDED.sector,
                industry = EXCLUDED.industry,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&input.symbol)
        .bind(&input.name)
        .bind(input.last_sale)
        .bind(input.net_change)
        .bind(input.percent_change)
        .bind(input.market_cap)
        .bind(&input.country)
        .bind(input.ipo_year)
        .bind(input.volume)
        .bind(&input.sector)
        .bind(&input.industry)
        .fetch_one(pool)
        .await
    }

    /// 여러 레코드 일괄 upsert. upsert된 행 수를 반환합니다.
    ///
    /// 100건 단위 트랜잭션으로 나누어 처리합니다. 청크 중간 실패 시
    /// 해당 청크만 롤백됩니다.
    pub async fn upsert_batch(
        pool: &PgPool,
        items: &[NewSecurity],
    ) -> Result<u64, sqlx::Error> {
        let mut upserted = 0u64;

        for chunk in items.chunks(100) {
            let mut tx = pool.begin().await?;

            for item in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO security_master
                        (symbol, name, last_sale, net_change, percent_change, market_cap,
                         country, ipo_year, volume, sector, industry, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
                    ON CONFLICT (symbol) DO UPDATE
                    SET
                        name = EXCLUDED.name,
                        last_sale = EXCLUDED.last_sale,
                        net_change = EXCLUDED.net_change,
                        percent_change = EXCLUDED.percent_change,
                        market_cap = EXCLUDED.market_cap,
                        country = EXCLUDED.country,
                        ipo_year = EXCLUDED.ipo_year,
                        volume = EXCLUDED.volume,
                        sector = EXCLUDED.sector,
                        industry = EXCLUDED.industry,
                        updated_at = NOW()
                    "#,
                )
                .bind(&item.symbol)
                .bind(&item.name)
                .bind(item.last_sale)
                .bind(item.net_change)
                .bind(item.percent_change)
                .bind(item.market_cap)
                .bind(&item.country)
                .bind(item.ipo_year)
                .bind(item.volume)
                .bind(&item.sector)
                .bind(&item.industry)
                .execute(&mut *tx)
                .await?;

                upserted += result.rows_affected();
            }

            tx.commit().await?;
        }

        Ok(upserted)
    }

    /// 전체 레코드 수.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM security_master")
            .fetch_one(pool)
            .await
    }
}
