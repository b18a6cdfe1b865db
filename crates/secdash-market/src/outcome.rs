//! 업스트림 조회 결과 타입.
//!
//! 기존 구현은 모든 실패를 catch-and-log 후 빈 값으로 강제 변환해
//! "데이터가 없음"과 "제공자 장애"를 구분할 수 없었습니다. 이 타입은
//! 세 경우를 명시적으로 구분하되, 기본 수렴 동작(빈/`None` 센티널)은
//! 변환 메서드로 유지합니다.

use crate::error::ProviderError;

/// 업스트림 조회의 세 가지 결과.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// 데이터 조회 성공
    Hit(T),
    /// 데이터 없음 - 정상 제어 흐름 (미설정 API 키, 빈 결과 등)
    Missing,
    /// 업스트림 장애 - 로깅 대상, 호출자에게는 빈 값으로 수렴
    Failed(ProviderError),
}

impl<T> FetchOutcome<T> {
    /// 성공 데이터를 Option으로 수렴합니다. Missing/Failed는 None.
    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Hit(data) => Some(data),
            FetchOutcome::Missing | FetchOutcome::Failed(_) => None,
        }
    }

    /// 성공 여부를 확인합니다.
    pub fn is_hit(&self) -> bool {
        matches!(self, FetchOutcome::Hit(_))
    }

    /// 업스트림 장애 여부를 확인합니다.
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// 성공 데이터를 변환합니다.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Hit(data) => FetchOutcome::Hit(f(data)),
            FetchOutcome::Missing => FetchOutcome::Missing,
            FetchOutcome::Failed(e) => FetchOutcome::Failed(e),
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    /// 성공 데이터 또는 기본값(빈 값)으로 수렴합니다.
    ///
    /// 호출자는 빈 결과를 "이용 불가"로 취급해야 하며 "0건의 가격이
    /// 존재"로 해석해서는 안 됩니다.
    pub fn data_or_default(self) -> T {
        match self {
            FetchOutcome::Hit(data) => data,
            FetchOutcome::Missing | FetchOutcome::Failed(_) => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option() {
        assert_eq!(FetchOutcome::Hit(1).into_option(), Some(1));
        assert_eq!(FetchOutcome::<i32>::Missing.into_option(), None);
        assert_eq!(
            FetchOutcome::<i32>::Failed(ProviderError::Http("down".to_string())).into_option(),
            None
        );
    }

    #[test]
    fn test_data_or_default_collapses_failure() {
        let failed: FetchOutcome<Vec<i32>> =
            FetchOutcome::Failed(ProviderError::Http("down".to_string()));
        assert!(failed.data_or_default().is_empty());
    }

    #[test]
    fn test_map_preserves_variant() {
        let hit = FetchOutcome::Hit(2).map(|n| n * 10);
        assert_eq!(hit.into_option(), Some(20));

        let missing = FetchOutcome::<i32>::Missing.map(|n| n * 10);
        assert!(!missing.is_hit());
        assert!(!missing.is_failed());
    }
}
