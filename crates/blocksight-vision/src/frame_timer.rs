//! 프레임 타이머.
//!
//! 고정 크기 링 버퍼에 프레임 간격을 기록하고 이동 평균 프레임 시간과
//! FPS를 제공한다. 순수 계측용 — 자기 상태 외 부수효과 없음.

use std::time::Instant;

/// 기본 히스토리 크기 (샘플 수)
pub const DEFAULT_HISTORY_SIZE: usize = 60;

/// 프레임 간격 이동 평균 타이머.
///
/// 링 버퍼 길이는 생성 후 불변이고, 채워진 샘플 수만 N까지 증가한다.
#[derive(Debug)]
pub struct FrameTimer {
    /// 간격 샘플 링 (밀리초)
    samples: Vec<f64>,
    /// 다음 기록 위치 = `index % N`, 누적 호출 수로도 사용
    index: usize,
    /// 직전 `on_frame_start` 시각 (첫 호출 전에는 생성 시각)
    last_frame_at: Instant,
}

impl FrameTimer {
    /// 히스토리 크기 N의 새 타이머 생성 (최소 1)
    pub fn new(history_size: usize) -> Self {
        Self {
            samples: vec![0.0; history_size.max(1)],
            index: 0,
            last_frame_at: Instant::now(),
        }
    }

    /// 프레임 시작 기록 — 직전 호출 이후 경과 시간을 링에 저장
    pub fn on_frame_start(&mut self) {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last_frame_at).as_secs_f64() * 1000.0;
        self.record(elapsed_ms);
        self.last_frame_at = now;
    }

    fn record(&mut self, interval_ms: f64) {
        let n = self.samples.len();
        self.samples[self.index % n] = interval_ms;
        self.index += 1;
    }

    /// 최근 `min(호출 수, N)`개 샘플의 산술 평균 (밀리초), 샘플 없으면 0
    pub fn average_frame_time(&self) -> f64 {
        let count = self.index.min(self.samples.len());
        if count == 0 {
            return 0.0;
        }
        self.samples[..count].iter().sum::<f64>() / count as f64
    }

    /// 평균 프레임 시간 기반 FPS, 평균이 0이면 0 (0 나눗셈 방지)
    pub fn frames_per_second(&self) -> f64 {
        let avg = self.average_frame_time();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
