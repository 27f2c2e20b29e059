//! BLOCKSIGHT 핵심 에러 타입.
//!
//! 어댑터 레이어는 외부 실패를 `CoreError`로 래핑하여 전파한다.
//! 캡처 실패는 에러가 아니라 `Option` 반환으로 표현한다 — [`crate::ports::capture`] 참조.

use thiserror::Error;

/// 코어 레이어 에러.
/// 설정, 직렬화, 실행기 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 캡처 장치 오류 (일시적 실패가 아닌 구조적 오류)
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 중지된 실행기에 작업 제출 시도
    #[error("실행기 중지됨 — 작업 제출 거부")]
    ExecutorStopped,

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
