//! 월드 상태 스냅샷 모델.

use std::sync::Arc;

use crate::models::block::DetectedBlock;
use crate::models::entity::Entity;
use crate::models::frame::Frame;

/// 파이프라인의 출력 단위 — 한 tick의 지각 결과.
///
/// 매 처리 사이클마다 통째로 교체되며 부분 수정은 없다.
/// 프레임은 `Arc`로 공유되어 스냅샷 복제가 픽셀 복사를 유발하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct GameStateSnapshot {
    /// 현재 프레임 (캡처 실패가 누적되면 None)
    pub frame: Option<Arc<Frame>>,
    /// 중심 거리 오름차순으로 정렬된 감지 블록
    pub blocks: Vec<DetectedBlock>,
    /// 외부 협력자가 보고한 주변 엔티티
    pub nearby_players: Vec<Entity>,
    /// 주의 필요 플래그 (채팅 멘션 ∨ 근접 엔티티)
    pub attention_required: bool,
}

impl GameStateSnapshot {
    /// 빈 스냅샷 — 프레임 없음, 감지 없음
    pub fn empty() -> Self {
        Self::default()
    }
}
