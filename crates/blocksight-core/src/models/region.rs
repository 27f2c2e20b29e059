//! 관심 영역(ROI) 모델.
//!
//! 프레임 좌표계의 축 정렬 직사각형. 불변식:
//! `x + w <= frame_w`, `y + h <= frame_h`, `w >= 1`, `h >= 1`.
//! 불변식은 [`Region::clamped`]가 보장한다.

use serde::{Deserialize, Serialize};

/// 축 정렬 직사각형 영역 (프레임 좌표)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    /// 새 영역 생성
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// 영역 중심 좌표
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// 영역 넓이 (픽셀 수)
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// `[0, frame_w) × [0, frame_h)` 안으로 강제 클램프.
    ///
    /// 이미 유효한 직사각형에도 무조건 적용한다. 1×1 같은 극단적인
    /// 프레임 크기에서도 `w >= 1`, `h >= 1`을 유지한다.
    pub fn clamped(&self, frame_w: u32, frame_h: u32) -> Self {
        let frame_w = frame_w.max(1);
        let frame_h = frame_h.max(1);

        let x = self.x.min(frame_w - 1);
        let y = self.y.min(frame_h - 1);
        let w = self.w.clamp(1, frame_w - x);
        let h = self.h.clamp(1, frame_h - y);

        Self { x, y, w, h }
    }

    /// 이 영역이 `frame_w × frame_h` 프레임 안에 완전히 포함되는지
    pub fn fits_within(&self, frame_w: u32, frame_h: u32) -> bool {
        self.w >= 1
            && self.h >= 1
            && self.x as u64 + self.w as u64 <= frame_w as u64
            && self.y as u64 + self.h as u64 <= frame_h as u64
    }
}

/// 한 프레임에서 파생된 이름 있는 영역 묶음.
///
/// 프레임 크기가 바뀔 때마다 재계산된다 (현재 설계에서는 매 캡처마다).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionSet {
    /// 블록 감지 대상 중앙 영역
    pub mining: Region,
    /// 플레이어 감지 영역 (전체 프레임)
    pub player_detection: Region,
    /// 채팅 텍스트 영역 (좌측 상단)
    pub chat: Region,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_region() {
        let r = Region::new(10, 20, 40, 60);
        assert_eq!(r.center(), (30.0, 50.0));
    }

    #[test]
    fn clamp_keeps_valid_region() {
        let r = Region::new(10, 10, 100, 100).clamped(640, 480);
        assert_eq!(r, Region::new(10, 10, 100, 100));
    }

    #[test]
    fn clamp_shrinks_overflowing_region() {
        let r = Region::new(600, 400, 100, 100).clamped(640, 480);
        assert!(r.fits_within(640, 480));
        assert_eq!(r.x, 600);
        assert_eq!(r.w, 40);
        assert_eq!(r.h, 80);
    }

    #[test]
    fn clamp_moves_out_of_bounds_origin() {
        let r = Region::new(1000, 1000, 10, 10).clamped(640, 480);
        assert!(r.fits_within(640, 480));
        assert_eq!(r.x, 639);
        assert_eq!(r.y, 479);
        assert_eq!(r.w, 1);
        assert_eq!(r.h, 1);
    }

    #[test]
    fn clamp_floors_degenerate_size_at_one() {
        let r = Region::new(0, 0, 0, 0).clamped(1, 1);
        assert_eq!(r, Region::new(0, 0, 1, 1));
    }

    #[test]
    fn region_serde_roundtrip() {
        let r = Region::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
