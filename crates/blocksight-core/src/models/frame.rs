//! 캡처 프레임 모델.

use chrono::{DateTime, Utc};
use image::RgbaImage;

/// 캡처된 한 프레임 — 픽셀 버퍼 + 캡처 시각.
///
/// 생성 이후 불변. 다음 캡처가 통째로 대체하며, 제자리 수정은 없다.
#[derive(Debug, Clone)]
pub struct Frame {
    /// 원본 픽셀 버퍼 (RGBA)
    pub image: RgbaImage,
    /// 캡처 시각 (wall-clock)
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    /// 새 프레임 생성 (캡처 시각 = 지금)
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            captured_at: Utc::now(),
        }
    }

    /// 프레임 너비 (픽셀)
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// 프레임 높이 (픽셀)
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 픽셀이 하나도 없는 프레임인지
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }
}
