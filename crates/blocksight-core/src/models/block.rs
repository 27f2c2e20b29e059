//! 감지된 블록 모델.

use serde::{Deserialize, Serialize};

use crate::models::region::Region;

/// 블록 감지 결과 — 바운딩 박스 + 프레임 중심으로부터의 거리.
///
/// `center_distance`가 정렬 키다 (가까운 것이 먼저).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectedBlock {
    /// 전체 프레임 좌표계의 바운딩 박스
    pub region: Region,
    /// 박스 중심 ↔ 프레임 중심 유클리드 거리 (픽셀)
    pub center_distance: f32,
}

impl DetectedBlock {
    /// 프레임 중심 기준으로 새 감지 블록 생성
    pub fn new(region: Region, frame_center: (f32, f32)) -> Self {
        let (cx, cy) = region.center();
        let dx = cx - frame_center.0;
        let dy = cy - frame_center.1;
        Self {
            region,
            center_distance: (dx * dx + dy * dy).sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_from_frame_center() {
        // 박스 중심 (30, 40), 프레임 중심 (0, 0) → 거리 50
        let block = DetectedBlock::new(Region::new(10, 20, 40, 40), (0.0, 0.0));
        assert!((block.center_distance - 50.0).abs() < 1e-4);
    }

    #[test]
    fn centered_block_has_zero_distance() {
        let block = DetectedBlock::new(Region::new(80, 80, 40, 40), (100.0, 100.0));
        assert!(block.center_distance < 1e-4);
    }
}
