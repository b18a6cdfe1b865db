//! 세션 쿠키 헬퍼.
//!
//! 쿠키 크레이트 없이 `Cookie` 헤더 파싱과 `Set-Cookie` 값 조립을
//! 직접 처리합니다. 세션 쿠키는 항상 `HttpOnly; SameSite=Lax; Path=/`
//! 속성을 가집니다.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};

/// 요청 헤더에서 이름이 일치하는 쿠키 값을 찾습니다.
///
/// `Cookie` 헤더가 여러 개이거나 한 헤더에 여러 쿠키가 있어도
/// 동작합니다. 없으면 `None`.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let key = parts.next()?.trim();
            if key == name {
                return parts.next().map(|v| v.trim().to_string());
            }
        }
    }
    None
}

/// 세션 쿠키의 `Set-Cookie` 값을 만듭니다.
///
/// 만료 시각은 RFC 7231 HTTP-date 형식으로 직렬화됩니다.
pub fn set_cookie_value(name: &str, token: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        name,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// 세션 쿠키를 즉시 삭제하는 `Set-Cookie` 값을 만듭니다.
pub fn delete_cookie_value(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    #[test]
    fn test_read_cookie_single() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("auth-session=abc123"),
        );
        assert_eq!(
            read_cookie(&headers, "auth-session"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_read_cookie_among_multiple() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth-session=tok-1; lang=ko"),
        );
        assert_eq!(
            read_cookie(&headers, "auth-session"),
            Some("tok-1".to_string())
        );
    }

    #[test]
    fn test_read_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(read_cookie(&headers, "auth-session"), None);

        // 접두사가 같은 다른 쿠키와 혼동하지 않음
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("auth-session-old=zzz"),
        );
        assert_eq!(read_cookie(&headers, "auth-session"), None);
    }

    #[test]
    fn test_set_cookie_value_format() {
        let expires = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = set_cookie_value("auth-session", "tok", expires);
        assert_eq!(
            value,
            "auth-session=tok; Path=/; HttpOnly; SameSite=Lax; Expires=Fri, 01 Mar 2024 12:00:00 GMT"
        );
    }

    #[test]
    fn test_delete_cookie_value_format() {
        let value = delete_cookie_value("auth-session");
        assert!(value.starts_with("auth-session=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
