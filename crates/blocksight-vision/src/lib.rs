//! # blocksight-vision
//!
//! 실시간 지각 파이프라인 크레이트.
//! 화면 프레임 스트림을 캡처 쓰로틀 → ROI 분할 → 블록 감지 → 스냅샷 조립의
//! 비용이 유계인 처리 사이클로 변환한다.

pub mod detect;
pub mod frame_timer;
pub mod pipeline;
pub mod region_planner;
pub mod transform_cache;
