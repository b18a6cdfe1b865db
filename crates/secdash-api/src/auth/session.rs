//! 세션 토큰 생성과 세션 저장소.
//!
//! 세션 토큰은 32바이트 난수를 base64url(패딩 없음)로 인코딩한
//! 문자열입니다. 서버는 토큰 원문을 저장하지 않고 SHA-256 해시(hex)를
//! 세션 ID로 사용합니다. 쿠키가 유출돼도 DB 스냅샷만으로는 세션을
//! 재구성할 수 없습니다.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::debug;

use secdash_core::config::AuthConfig;
use secdash_core::domain::{Session, SessionValidity, User};
use secdash_core::{CoreError, CoreResult};

/// 새 세션 토큰을 생성합니다.
///
/// 32바이트 난수 → base64url (패딩 없음). 이 값이 쿠키에 실립니다.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 토큰에서 세션 ID를 유도합니다 (SHA-256, hex 소문자).
pub fn session_id_from_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

/// 세션 저장소 인터페이스.
///
/// 게이트와 라우트는 이 트레이트에만 의존합니다. 테스트에서는
/// 인메모리 구현을 주입합니다.
#[async_trait]
pub trait SessionAuthority: Send + Sync {
    /// 토큰을 검증하고 세션과 사용자를 반환합니다.
    ///
    /// - 세션 없음 또는 만료: `Ok(None)` (만료 세션은 삭제됨)
    /// - 갱신 윈도우 내: 만료 시각을 연장한 뒤 반환
    /// - 저장소 장애: `Err` (빈 결과로 수렴하지 않음)
    async fn validate(&self, token: &str) -> CoreResult<Option<(Session, User)>>;

    /// 새 세션을 생성하고 (토큰, 세션)을 반환합니다.
    async fn create(&self, user_id: &str) -> CoreResult<(String, Session)>;

    /// 세션을 무효화합니다 (로그아웃).
    async fn invalidate(&self, session_id: &str) -> CoreResult<()>;
}

/// PostgreSQL 세션 저장소.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
    lifetime: Duration,
    renewal_window: Duration,
}

impl PgSessionStore {
    pub fn new(pool: PgPool, config: &AuthConfig) -> Self {
        Self {
            pool,
            lifetime: Duration::days(config.lifetime_days),
            renewal_window: Duration::days(config.renewal_window_days),
        }
    }

    fn db_err(err: sqlx::Error) -> CoreError {
        CoreError::Database(err.to_string())
    }
}

#[async_trait]
impl SessionAuthority for PgSessionStore {
    async fn validate(&self, token: &str) -> CoreResult<Option<(Session, User)>> {
        let session_id = session_id_from_token(token);

        let row: Option<(String, String, DateTime<Utc>, String, String, Option<i32>)> =
            sqlx::query_as(
                r#"
                SELECT s.id, s.user_id, s.expires_at, u.username, u.password_hash, u.age
                FROM session s
                JOIN "user" u ON u.id = s.user_id
                WHERE s.id = $1
                "#,
            )
            .bind(&session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_err)?;

        let Some((id, user_id, expires_at, username, password_hash, age)) = row else {
            return Ok(None);
        };

        let mut session = Session {
            id,
            user_id: user_id.clone(),
            expires_at,
        };
        let user = User {
            id: user_id,
            username,
            password_hash,
            age,
        };

        match session.validity_at(Utc::now(), self.renewal_window) {
            SessionValidity::Expired => {
                sqlx::query("DELETE FROM session WHERE id = $1")
                    .bind(&session.id)
                    .execute(&self.pool)
                    .await
                    .map_err(Self::db_err)?;
                debug!(session_id = %session.id, "Deleted expired session");
                Ok(None)
            }
            SessionValidity::NeedsRenewal => {
                let new_expiry = Utc::now() + self.lifetime;
                sqlx::query("UPDATE session SET expires_at = $1 WHERE id = $2")
                    .bind(new_expiry)
                    .bind(&session.id)
                    .execute(&self.pool)
                    .await
                    .map_err(Self::db_err)?;
                session.expires_at = new_expiry;
                debug!(session_id = %session.id, "Extended session expiry");
                Ok(Some((session, user)))
            }
            SessionValidity::Fresh => Ok(Some((session, user))),
        }
    }

    async fn create(&self, user_id: &str) -> CoreResult<(String, Session)> {
        let token = generate_token();
        let session = Session {
            id: session_id_from_token(&token),
            user_id: user_id.to_string(),
            expires_at: Utc::now() + self.lifetime,
        };

        sqlx::query("INSERT INTO session (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&session.id)
            .bind(&session.user_id)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(Self::db_err)?;

        debug!(user_id, "Created session");
        Ok((token, session))
    }

    async fn invalidate(&self, session_id: &str) -> CoreResult<()> {
        sqlx::query("DELETE FROM session WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(Self::db_err)?;
        debug!(session_id, "Invalidated session");
        Ok(())
    }
}
