//! 포트 인터페이스 (trait).
//!
//! 파이프라인이 의존하는 외부 협력자 경계.
//! 플랫폼별 캡처, 플레이어 분류 모델, 채팅 파서는 모두 이 trait 뒤의
//! 블랙박스이며, 파이프라인은 `Box<dyn T>`로 주입받는다.
//!
//! tick 루프는 단일 스레드 동기 실행이므로 모든 포트는 동기 trait이다.

pub mod capture;
pub mod chat;
pub mod player;
