//! 사용자 및 세션 모델.
//!
//! 세션은 로그인 시 생성되고, 인증된 요청마다 조회/갱신되며,
//! 로그아웃 또는 만료 시 무효화됩니다.
//!
//! 불변식: 세션은 `now < expires_at`인 동안에만 유효합니다. 만료가
//! 임박한(갱신 윈도우 내) 세션은 사용 시 만료 시간이 연장되고 쿠키가
//! 재발급되어야 합니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 레코드.
///
/// Auth Gate 관점에서는 세션 연결을 제외하면 불변입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Argon2 해시. 직렬화에서 제외됩니다.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: Option<i32>,
}

/// 세션 레코드.
///
/// `id`는 세션 토큰의 SHA-256 해시(hex)입니다. 토큰 원문은 서버에
/// 저장되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// 세션 유효성 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionValidity {
    /// 유효하며 갱신이 필요 없음
    Fresh,
    /// 유효하지만 갱신 윈도우 내에 있음 - 만료 연장 필요
    NeedsRenewal,
    /// 만료됨
    Expired,
}

impl Session {
    /// 세션이 유효한지 확인합니다 (`now < expires_at`).
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// 주어진 갱신 윈도우 기준으로 세션 상태를 판정합니다.
    ///
    /// # 인자
    ///
    /// * `renewal_window` - 만료 전 이 기간 내에 들어오면 갱신 대상
    pub fn validity(&self, renewal_window: Duration) -> SessionValidity {
        self.validity_at(Utc::now(), renewal_window)
    }

    /// 기준 시각을 명시한 판정. 테스트에서 시간을 고정할 때 사용합니다.
    pub fn validity_at(&self, now: DateTime<Utc>, renewal_window: Duration) -> SessionValidity {
        if now >= self.expires_at {
            SessionValidity::Expired
        } else if now >= self.expires_at - renewal_window {
            SessionValidity::NeedsRenewal
        } else {
            SessionValidity::Fresh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_expiring_in(days: i64) -> Session {
        Session {
            id: "abc".to_string(),
            user_id: "user1".to_string(),
            expires_at: Utc::now() + Duration::days(days),
        }
    }

    #[test]
    fn test_fresh_session() {
        let session = session_expiring_in(30);
        assert!(session.is_valid());
        assert_eq!(session.validity(Duration::days(15)), SessionValidity::Fresh);
    }

    #[test]
    fn test_session_in_renewal_window() {
        let session = session_expiring_in(10);
        assert!(session.is_valid());
        assert_eq!(
            session.validity(Duration::days(15)),
            SessionValidity::NeedsRenewal
        );
    }

    #[test]
    fn test_expired_session() {
        let session = session_expiring_in(-1);
        assert!(!session.is_valid());
        assert_eq!(
            session.validity(Duration::days(15)),
            SessionValidity::Expired
        );
    }

    #[test]
    fn test_validity_at_boundary() {
        let now = Utc::now();
        let session = Session {
            id: "abc".to_string(),
            user_id: "user1".to_string(),
            expires_at: now,
        };
        // 정확히 만료 시각이면 만료로 판정
        assert_eq!(
            session.validity_at(now, Duration::days(15)),
            SessionValidity::Expired
        );
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            age: Some(30),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains(r#""username":"alice""#));
    }
}
