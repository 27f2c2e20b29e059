//! # blocksight-exec
//!
//! 백그라운드 작업 실행기 크레이트.
//! 고정 크기 워커 풀이 FIFO 큐의 fire-and-forget 작업을 소비한다.

pub mod pool;

pub use pool::TaskPool;
