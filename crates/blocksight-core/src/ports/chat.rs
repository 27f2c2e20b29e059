//! 채팅 처리 포트.
//!
//! 구현: 외부 채팅 텍스트 파서 (파이프라인 외부).

use image::RgbaImage;

/// 채팅 처리 협력자.
///
/// 매 캡처마다 채팅 영역 서브 이미지를 전달받는다.
pub trait ChatHandler: Send {
    /// 채팅 영역 이미지 처리 (OCR/파싱은 구현체 몫)
    fn process_chat_region(&mut self, sub: &RgbaImage);

    /// 직전 처리에서 봇이 멘션되었는지
    fn was_mentioned(&self) -> bool;
}
