//! 지각 파이프라인 오케스트레이터.
//!
//! tick마다 캡처 쓰로틀 → 캡처 → ROI 계획 → 영역 한정 감지 → 스냅샷
//! 조립을 수행한다. 단일 스레드 동기 실행이며 내부 병렬성과 중단 지점이
//! 없다 — 외부 캡처 호출이 블로킹하면 tick 전체가 멈춘다(문서화된 제약).
//!
//! "마지막 프레임 / 마지막 블록" 캐시는 이 인스턴스가 배타 소유하는
//! 명시적 필드다. 전역 싱글턴 없음. 둘 다 통째로 교체되고 제자리 수정은
//! 없다.

use std::sync::Arc;
use std::time::Instant;

use blocksight_core::config::AppConfig;
use blocksight_core::models::block::DetectedBlock;
use blocksight_core::models::frame::Frame;
use blocksight_core::models::region::{Region, RegionSet};
use blocksight_core::models::snapshot::GameStateSnapshot;
use blocksight_core::ports::capture::FrameSource;
use blocksight_core::ports::chat::ChatHandler;
use blocksight_core::ports::player::PlayerDetector;
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};
use std::time::Duration;
use tracing::{debug, warn};

use crate::detect;
use crate::frame_timer::FrameTimer;
use crate::region_planner;
use crate::transform_cache::TransformCache;

/// 실시간 지각 파이프라인.
///
/// 세 외부 협력자(캡처, 플레이어 감지, 채팅)를 포트 trait으로 주입받아
/// 소유한다. tick은 외부 프레임 사이클마다 한 번 호출되는 협조적 루프다.
pub struct PerceptionPipeline {
    source: Box<dyn FrameSource>,
    players: Box<dyn PlayerDetector>,
    chat: Box<dyn ChatHandler>,

    capture_interval: Duration,
    detection_refresh: Duration,
    proximity_radius: f32,

    /// 계측용 프레임 타이머 (부수효과 없음)
    timer: FrameTimer,
    /// mining 영역 전처리(그레이스케일+블러) 메모이제이션
    preprocess_cache: TransformCache<GrayImage>,

    last_frame: Option<Arc<Frame>>,
    last_capture_at: Option<Instant>,
    last_detection_at: Option<Instant>,
    cached_blocks: Vec<DetectedBlock>,
    regions: Option<RegionSet>,
    snapshot: GameStateSnapshot,
}

impl PerceptionPipeline {
    /// 새 파이프라인 생성 — 협력자 주입 + 설정 적용
    pub fn new(
        source: Box<dyn FrameSource>,
        players: Box<dyn PlayerDetector>,
        chat: Box<dyn ChatHandler>,
        config: &AppConfig,
    ) -> Self {
        Self {
            source,
            players,
            chat,
            capture_interval: config.capture_interval(),
            detection_refresh: config.detection_refresh(),
            proximity_radius: config.pipeline.proximity_radius,
            timer: FrameTimer::new(config.pipeline.frame_history_size),
            preprocess_cache: TransformCache::new(config.cache_ttl()),
            last_frame: None,
            last_capture_at: None,
            last_detection_at: None,
            cached_blocks: Vec::new(),
            regions: None,
            snapshot: GameStateSnapshot::empty(),
        }
    }

    /// 한 사이클 실행 — 상태 머신 한 바퀴를 돌고 스냅샷을 반환한다.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.timer.on_frame_start();

        // 캡처 쓰로틀: 주기 미만 + 직전 프레임 존재 → 스냅샷 그대로 재사용
        // (크기가 안 바뀌었으므로 ROI 재계획도 불필요)
        if let (Some(at), Some(_)) = (self.last_capture_at, &self.last_frame) {
            if at.elapsed() < self.capture_interval {
                debug!("캡처 쓰로틀: 직전 스냅샷 재사용");
                return self.snapshot.clone();
            }
        }

        match self.source.capture_frame() {
            Some(frame) if !frame.is_empty() => {
                self.last_frame = Some(Arc::new(frame));
                self.last_capture_at = Some(Instant::now());
            }
            _ => {
                // 일시적 캡처 실패 (빈 프레임 포함) — 직전 프레임으로 폴백
                warn!("캡처 실패, 직전 프레임 유지");
                if self.last_frame.is_none() {
                    self.snapshot = GameStateSnapshot::empty();
                }
                return self.snapshot.clone();
            }
        }

        let Some(frame) = self.last_frame.clone() else {
            // capture_frame이 Some이면 도달 불가하지만 panic 대신 빈 스냅샷
            return GameStateSnapshot::empty();
        };

        // 새 캡처마다 ROI 재계산 (크기 변화 대응은 단순화를 위해 무조건)
        let regions = region_planner::plan_regions(frame.width(), frame.height());
        self.regions = Some(regions);

        // 감지 쓰로틀: 갱신 주기 경과 시에만 전체 감지 실행
        let detect_due = self
            .last_detection_at
            .map_or(true, |at| at.elapsed() >= self.detection_refresh);
        if detect_due {
            self.cached_blocks = self.run_block_detection(&frame, regions.mining);
            self.last_detection_at = Some(Instant::now());
        } else {
            debug!("감지 쓰로틀: 캐시된 블록 {}개 재사용", self.cached_blocks.len());
        }

        // 플레이어/채팅 영역은 매 캡처마다 협력자에 전달
        // (협력자 자체 쓰로틀링은 협력자 책임)
        let player_sub = crop(&frame.image, regions.player_detection);
        let downsampled = downsample_half(&player_sub);
        self.players.update_detection(&downsampled);

        let chat_sub = crop(&frame.image, regions.chat);
        self.chat.process_chat_region(&chat_sub);

        // 스냅샷 조립 — 통째로 교체
        let attention_required =
            self.chat.was_mentioned() || self.players.is_entity_within("", self.proximity_radius);
        self.snapshot = GameStateSnapshot {
            frame: Some(frame),
            blocks: self.cached_blocks.clone(),
            nearby_players: self.players.currently_nearby(),
            attention_required,
        };

        self.snapshot.clone()
    }

    /// mining 영역 블록 감지 실행
    fn run_block_detection(&mut self, frame: &Frame, mining: Region) -> Vec<DetectedBlock> {
        let sub = crop(&frame.image, mining);
        let gray = self.preprocess_cache.get_or_compute(&sub, detect::preprocess);
        let frame_center = (frame.width() as f32 / 2.0, frame.height() as f32 / 2.0);
        detect::detect_blocks(&gray, (mining.x, mining.y), frame_center)
    }

    /// 마지막으로 계획된 ROI 묶음
    pub fn regions(&self) -> Option<RegionSet> {
        self.regions
    }

    /// 이동 평균 프레임 시간 (밀리초)
    pub fn average_frame_time(&self) -> f64 {
        self.timer.average_frame_time()
    }

    /// 이동 평균 FPS
    pub fn frames_per_second(&self) -> f64 {
        self.timer.frames_per_second()
    }
}

/// 영역 서브 이미지 추출 (영역은 이미 클램프되어 있음)
fn crop(image: &RgbaImage, region: Region) -> RgbaImage {
    imageops::crop_imm(image, region.x, region.y, region.w, region.h).to_image()
}

/// 1/2 해상도 다운샘플 — 플레이어 감지 비용 절감용
fn downsample_half(image: &RgbaImage) -> RgbaImage {
    let w = (image.width() / 2).max(1);
    let h = (image.height() / 2).max(1);
    imageops::resize(image, w, h, FilterType::Triangle)
}
