//! 프레임 캡처 포트.
//!
//! 구현: 플랫폼별 스크린 캡처 어댑터 (파이프라인 외부).

use crate::models::frame::Frame;

/// 원시 프레임 소스 — 플랫폼 캡처 프리미티브의 경계.
///
/// `None`은 일시적 캡처 실패를 뜻한다. 파이프라인은 실패를 전파하지 않고
/// 직전 프레임을 재사용한다. 캡처 호출이 무한정 블로킹하면 tick 전체가
/// 멈춘다 — 타임아웃은 강제하지 않는다 (문서화된 제약).
pub trait FrameSource: Send {
    /// 새 프레임 캡처. 일시적 실패 시 `None`.
    fn capture_frame(&mut self) -> Option<Frame>;
}
