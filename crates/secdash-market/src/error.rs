//! 시장 데이터 제공자 에러 타입.

use thiserror::Error;

/// 업스트림 제공자 호출 에러.
///
/// `Http`(전송/비 2xx)와 `Api`(제공자가 보고한 에러 봉투)는 의도적으로
/// 구분됩니다. 파사드에서는 둘 다 `None`으로 수렴하지만, 호출자가
/// "잘못된 페어"와 "서비스 장애"를 나중에 구분할 수 있도록 변형은
/// 유지합니다.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP 요청 실패 (네트워크 에러 또는 비 2xx 응답)
    #[error("HTTP 요청 실패: {0}")]
    Http(String),

    /// 제공자가 보고한 에러 (응답 봉투의 에러 목록 등)
    #[error("제공자 에러: {0}")]
    Api(String),

    /// 응답 본문 파싱 실패
    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    /// API 키 미설정 - 해당 제공자 기능 비활성화
    #[error("API 키가 설정되지 않았습니다: {0}")]
    MissingApiKey(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}
