//! 메모이즈 변환 캐시.
//!
//! 이미지 핑거프린트 → 변환 결과 매핑 + TTL 기반 퇴출.
//! 핑거프린트는 기하 정보와 소수의 샘플 픽셀만 쓰는 의도적으로 손실 있는
//! 해시다 — 충돌은 허용하며, TTL 안에서 시각적으로 비슷한 결과를 돌려주는
//! 것이 전체 이미지 해시보다 싸다는 트레이드오프.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use image::RgbaImage;
use parking_lot::Mutex;
use tracing::debug;

/// 빈 이미지의 핑거프린트 센티널
pub const EMPTY_FINGERPRINT: u64 = 0;

/// 캐시 엔트리 — 값 + 삽입 시각
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

/// 내용 주소화 변환 캐시.
///
/// 잠금 규율: get-or-compute-and-sweep 전체가 하나의 뮤텍스 아래에서
/// 실행된다. 미스 시 `transform` 호출 동안에도 잠금을 유지하므로 서로 다른
/// 핑거프린트의 호출자까지 직렬화된다 — 알려진 경합 지점이며, 같은
/// 핑거프린트에 저장된 값이 항상 최대 하나임을 보장한다.
pub struct TransformCache<T> {
    entries: Mutex<HashMap<u64, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> TransformCache<T> {
    /// 지정 TTL의 새 캐시 생성
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// 핑거프린트가 TTL 내에 있으면 저장된 값을, 아니면 `transform`을
    /// 호출해 저장 후 반환한다. 미스마다 만료 엔트리 전체 스윕을 수행한다
    /// (엔트리 수가 작고 유계라는 전제의 O(entries) 비용).
    pub fn get_or_compute<F>(&self, image: &RgbaImage, transform: F) -> T
    where
        F: FnOnce(&RgbaImage) -> T,
    {
        let fp = fingerprint(image);
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(&fp) {
            if entry.inserted_at.elapsed() < self.ttl {
                debug!("변환 캐시 히트: fp={fp:#018x}");
                return entry.value.clone();
            }
        }

        // 미스 — 잠금을 쥔 채 변환 실행 (핑거프린트당 단일 저장값 보장)
        let value = transform(image);
        entries.insert(
            fp,
            CacheEntry {
                value: value.clone(),
                inserted_at: Instant::now(),
            },
        );

        // 만료 엔트리 스윕
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() <= ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!("변환 캐시 퇴출: {evicted}개 만료");
        }

        value
    }

    /// 현재 저장된 엔트리 수
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// 캐시가 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// 모든 엔트리 제거
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// 이미지의 근사 핑거프린트 계산.
///
/// 기하(너비, 높이)와 대각선 1/4, 1/2, 3/4 지점 샘플 픽셀의 RGB 합을
/// 해시한다. O(1) 비용, 충돌 허용. 빈 이미지는 센티널 0.
pub fn fingerprint(image: &RgbaImage) -> u64 {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return EMPTY_FINGERPRINT;
    }

    let mut hasher = DefaultHasher::new();
    w.hash(&mut hasher);
    h.hash(&mut hasher);

    for (sx, sy) in [(w / 4, h / 4), (w / 2, h / 2), (3 * w / 4, 3 * h / 4)] {
        let px = image.get_pixel(sx.min(w - 1), sy.min(h - 1));
        let rgb_sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
        rgb_sum.hash(&mut hasher);
    }

    hasher.finish()
}
