//! 애플리케이션 설정 구조체.
//!
//! 캡처 주기, 감지 갱신 주기, 캐시 TTL, 실행기 워커 수 등
//! 런타임 설정을 정의한다. JSON 파일에서 로드 — [`crate::config_manager`] 참조.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 지각 파이프라인 설정
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// 변환 캐시 설정
    #[serde(default)]
    pub cache: CacheConfig,
    /// 백그라운드 실행기 설정
    #[serde(default)]
    pub executor: ExecutorConfig,
}

/// 지각 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 캡처 쓰로틀 간격 (밀리초)
    #[serde(default = "default_capture_interval_ms")]
    pub capture_interval_ms: u64,
    /// 블록 감지 갱신 간격 (밀리초)
    #[serde(default = "default_detection_refresh_ms")]
    pub detection_refresh_ms: u64,
    /// 프레임 타이머 히스토리 크기 (샘플 수)
    #[serde(default = "default_frame_history_size")]
    pub frame_history_size: usize,
    /// 근접 엔티티 주의 반경 (게임 단위)
    #[serde(default = "default_proximity_radius")]
    pub proximity_radius: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capture_interval_ms: default_capture_interval_ms(),
            detection_refresh_ms: default_detection_refresh_ms(),
            frame_history_size: default_frame_history_size(),
            proximity_radius: default_proximity_radius(),
        }
    }
}

/// 변환 캐시 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 캐시 엔트리 TTL (밀리초)
    #[serde(default = "default_cache_ttl_ms")]
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_cache_ttl_ms(),
        }
    }
}

/// 백그라운드 실행기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// 워커 스레드 수 (최소 1)
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
        }
    }
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 캡처 쓰로틀 간격을 Duration으로 반환
    pub fn capture_interval(&self) -> Duration {
        Duration::from_millis(self.pipeline.capture_interval_ms)
    }

    /// 블록 감지 갱신 간격을 Duration으로 반환
    pub fn detection_refresh(&self) -> Duration {
        Duration::from_millis(self.pipeline.detection_refresh_ms)
    }

    /// 캐시 TTL을 Duration으로 반환
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache.ttl_ms)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_capture_interval_ms() -> u64 {
    50
}
fn default_detection_refresh_ms() -> u64 {
    200
}
fn default_frame_history_size() -> usize {
    60
}
fn default_proximity_radius() -> f32 {
    5.0
}
fn default_cache_ttl_ms() -> u64 {
    1_000
}
fn default_worker_count() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = AppConfig::default_config();
        assert_eq!(config.pipeline.capture_interval_ms, 50);
        assert_eq!(config.pipeline.detection_refresh_ms, 200);
        assert_eq!(config.pipeline.frame_history_size, 60);
        assert_eq!(config.cache.ttl_ms, 1_000);
        assert_eq!(config.executor.worker_count, 4);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "pipeline": { "capture_interval_ms": 100 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.pipeline.capture_interval_ms, 100);
        assert_eq!(config.pipeline.detection_refresh_ms, 200);
        assert_eq!(config.executor.worker_count, 4);
    }

    #[test]
    fn duration_helpers() {
        let config = AppConfig::default_config();
        assert_eq!(config.capture_interval(), Duration::from_millis(50));
        assert_eq!(config.detection_refresh(), Duration::from_millis(200));
        assert_eq!(config.cache_ttl(), Duration::from_millis(1_000));
    }
}
