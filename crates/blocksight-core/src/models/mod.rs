//! BLOCKSIGHT 도메인 모델.
//!
//! 지각 파이프라인의 입출력 데이터 구조체를 정의한다.
//! 경계를 넘는 모델(영역, 블록, 엔티티)은 `serde` Serialize/Deserialize를 구현한다.

pub mod block;
pub mod entity;
pub mod frame;
pub mod region;
pub mod snapshot;
