//! # blocksight-core
//!
//! BLOCKSIGHT 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 지각 파이프라인과 실행기 크레이트가 공유하는 핵심 타입을 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (프레임, 영역, 스냅샷)
//! - [`ports`] — 외부 협력자 포트 인터페이스 (캡처, 플레이어 감지, 채팅)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
