//! User Repository
//!
//! 사용자 관련 데이터베이스 연산을 담당합니다.
//!
//! `user`는 PostgreSQL 예약어이므로 쿼리에서 항상 따옴표로 감쌉니다.

use sqlx::PgPool;
use uuid::Uuid;

use secdash_core::domain::User;

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 사용자 생성. 생성된 레코드를 반환합니다.
    ///
    /// 사용자명 중복은 unique 제약 위반으로 `sqlx::Error`가 됩니다.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        age: Option<i32>,
    ) -> Result<User, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (id, username, password_hash, age)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(age)
        .fetch_one(pool)
        .await
    }

    /// 사용자명으로 조회.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE username = $1"#)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// ID로 조회.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 사용자명 존재 여부 확인.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user" WHERE username = $1"#)
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }
}
