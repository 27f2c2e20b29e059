//! ROI 계획.
//!
//! 프레임 크기에서 고정 비례 규칙으로 세 관심 영역을 계산한다.
//! 비싼 비전 연산을 부분 영역으로 제한해 tick당 비용을 유계로 만든다.

use blocksight_core::models::region::{Region, RegionSet};

/// 채팅 영역 최대 너비 (픽셀)
const CHAT_MAX_WIDTH: u32 = 400;

/// 채팅 영역 최대 높이 (픽셀)
const CHAT_MAX_HEIGHT: u32 = 200;

/// 프레임 크기에 대한 ROI 묶음 계산.
///
/// - mining: 중앙 절반 박스 `[w/4, w/4 + w/2) × [h/4, h/4 + h/2)`
/// - player_detection: 전체 프레임
/// - chat: 좌측 상단 `min(400, w/3) × min(200, h/4)`
///
/// 모든 영역은 무조건 클램프를 거친다 — 이미 유효해 보여도 예외 없이
/// 적용해 1×1 같은 극단적 프레임에서도 불변식을 보장한다.
pub fn plan_regions(frame_w: u32, frame_h: u32) -> RegionSet {
    let mining = Region::new(frame_w / 4, frame_h / 4, frame_w / 2, frame_h / 2);
    let player_detection = Region::new(0, 0, frame_w, frame_h);
    let chat = Region::new(
        0,
        0,
        CHAT_MAX_WIDTH.min(frame_w / 3),
        CHAT_MAX_HEIGHT.min(frame_h / 4),
    );

    RegionSet {
        mining: mining.clamped(frame_w, frame_h),
        player_detection: player_detection.clamped(frame_w, frame_h),
        chat: chat.clamped(frame_w, frame_h),
    }
}
