//! 플레이어 감지 포트.
//!
//! 구현: 외부 플레이어 분류 감지기 (모델 내부는 블랙박스).

use image::RgbaImage;

use crate::models::entity::Entity;

/// 플레이어 감지 협력자.
///
/// 매 캡처마다 플레이어 감지 영역의 1/2 다운샘플 이미지를 전달받는다.
/// 자체 쓰로틀링이 필요하면 구현체 책임이다.
pub trait PlayerDetector: Send {
    /// 다운샘플된 감지 영역으로 내부 상태 갱신
    fn update_detection(&mut self, sub: &RgbaImage);

    /// 현재 주변에 있는 엔티티 목록
    fn currently_nearby(&self) -> Vec<Entity>;

    /// 이름이 `name`인 엔티티가 `radius` 안에 있는지.
    /// 빈 이름은 "아무 엔티티나"로 해석한다.
    fn is_entity_within(&self, name: &str, radius: f32) -> bool;
}
