//! 주변 엔티티 모델.
//!
//! 플레이어 감지 협력자가 생산한다 — [`crate::ports::player`] 참조.

use serde::{Deserialize, Serialize};

/// 감지된 주변 엔티티 (플레이어 등)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 엔티티 이름
    pub name: String,
    /// 추정 거리 (게임 단위)
    pub distance: f32,
}

impl Entity {
    /// 새 엔티티 생성
    pub fn new(name: impl Into<String>, distance: f32) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}
