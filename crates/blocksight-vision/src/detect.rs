//! 블록 감지.
//!
//! 그레이스케일 → 블러 → 그래디언트 에지(이중 임계값) → 모폴로지 닫힘 →
//! 외곽 성분 추출 → 형태 휴리스틱 → 중심 거리 랭킹.
//!
//! 임계값은 렌더링된 텍스처 격자 게임 화면에 맞춰 조정된 값이다 — 실제
//! 물체 경계의 에지가 강하고 규칙적이며, 블록은 일반적인 카메라 각도에서
//! 거의 정사각형 타일로 투영된다는 사실을 이용한다.

use blocksight_core::models::block::DetectedBlock;
use blocksight_core::models::region::Region;
use image::{GrayImage, RgbaImage};
use tracing::debug;

/// 그래디언트 하한 임계값 (약한 에지, 8-bit 스케일)
const EDGE_LOW: u32 = 30;

/// 그래디언트 상한 임계값 (강한 에지)
const EDGE_HIGH: u32 = 90;

/// 블록 한 변 최소 크기 (픽셀)
const MIN_SIDE: u32 = 15;

/// 블록 한 변 최대 크기 (픽셀)
const MAX_SIDE: u32 = 80;

/// 종횡비(h/w) 허용 구간 — 거의 정사각형만 통과
const ASPECT_MIN: f32 = 0.7;
const ASPECT_MAX: f32 = 1.4;

/// 채움 비율 하한 — 가늘거나 성긴 윤곽 거부
const MIN_FILL_RATIO: f32 = 0.4;

/// 출력 블록 최대 개수
const MAX_BLOCKS: usize = 10;

/// 감지 전처리 — 단일 채널 변환 + 3×3 가우시안 블러.
///
/// 에지 검출 전에 픽셀 노이즈를 억제한다. 변환 캐시에 넣기 좋은 형태의
/// 순수 함수다.
pub fn preprocess(sub: &RgbaImage) -> GrayImage {
    let gray = image::imageops::grayscale(sub);
    gaussian_blur_3x3(&gray)
}

/// 전처리된 영역에서 블록 감지.
///
/// `offset`은 이 영역의 전체 프레임 내 위치, `frame_center`는 전체 프레임
/// 중심이다. 반환값은 중심 거리 오름차순으로 정렬되고 최대 10개로
/// 잘린다.
pub fn detect_blocks(
    gray: &GrayImage,
    offset: (u32, u32),
    frame_center: (f32, f32),
) -> Vec<DetectedBlock> {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return Vec::new();
    }

    let edges = edge_map(gray);
    let closed = close_3x3(&edges, w, h);
    let shapes = outer_shapes(&closed, w, h);

    let mut blocks: Vec<DetectedBlock> = shapes
        .into_iter()
        .filter(|shape| admit(shape))
        .map(|shape| {
            let translated = Region::new(
                shape.bbox.x + offset.0,
                shape.bbox.y + offset.1,
                shape.bbox.w,
                shape.bbox.h,
            );
            DetectedBlock::new(translated, frame_center)
        })
        .collect();

    blocks.sort_by(|a, b| a.center_distance.total_cmp(&b.center_distance));
    blocks.truncate(MAX_BLOCKS);

    debug!("블록 감지: {}개 통과", blocks.len());
    blocks
}

/// 연결 성분 하나의 기하 요약
struct Shape {
    /// 영역 좌표계 바운딩 박스
    bbox: Region,
    /// 행별 스팬으로 근사한 둘러싸인 넓이 (픽셀)
    area: u64,
}

/// 형태 허용 필터 — 크기, 종횡비, 채움 비율을 모두 만족해야 통과
fn admit(shape: &Shape) -> bool {
    let (bw, bh) = (shape.bbox.w, shape.bbox.h);
    if !(MIN_SIDE..=MAX_SIDE).contains(&bw) || !(MIN_SIDE..=MAX_SIDE).contains(&bh) {
        return false;
    }

    let aspect = bh as f32 / bw as f32;
    if aspect <= ASPECT_MIN || aspect >= ASPECT_MAX {
        return false;
    }

    let fill = shape.area as f32 / shape.bbox.area() as f32;
    fill > MIN_FILL_RATIO
}

/// 3×3 가우시안 블러 (커널 1-2-1 / 2-4-2 / 1-2-1, 합 16).
///
/// 경계 픽셀은 원본 그대로 유지한다.
fn gaussian_blur_3x3(src: &GrayImage) -> GrayImage {
    let (w, h) = src.dimensions();
    if w < 3 || h < 3 {
        return src.clone();
    }

    let raw = src.as_raw();
    let wi = w as usize;
    let mut out = raw.clone();

    for y in 1..(h as usize - 1) {
        for x in 1..(w as usize - 1) {
            let i = y * wi + x;
            let sum = raw[i - wi - 1] as u32
                + 2 * raw[i - wi] as u32
                + raw[i - wi + 1] as u32
                + 2 * raw[i - 1] as u32
                + 4 * raw[i] as u32
                + 2 * raw[i + 1] as u32
                + raw[i + wi - 1] as u32
                + 2 * raw[i + wi] as u32
                + raw[i + wi + 1] as u32;
            out[i] = (sum / 16) as u8;
        }
    }

    GrayImage::from_raw(w, h, out).unwrap_or_else(|| src.clone())
}

/// Sobel L1 그래디언트 + 이중 임계값 히스테리시스로 이진 에지 맵 생성.
///
/// 상한 이상인 픽셀이 시드가 되고, 하한 이상이면서 시드와 8-연결된 약한
/// 픽셀이 에지로 승격된다.
fn edge_map(gray: &GrayImage) -> Vec<bool> {
    let (w, h) = gray.dimensions();
    let (wi, hi) = (w as usize, h as usize);
    let raw = gray.as_raw();

    let mut mag = vec![0u32; wi * hi];
    for y in 1..hi - 1 {
        for x in 1..wi - 1 {
            let i = y * wi + x;
            let gx = raw[i - wi + 1] as i32 + 2 * raw[i + 1] as i32 + raw[i + wi + 1] as i32
                - raw[i - wi - 1] as i32
                - 2 * raw[i - 1] as i32
                - raw[i + wi - 1] as i32;
            let gy = raw[i + wi - 1] as i32 + 2 * raw[i + wi] as i32 + raw[i + wi + 1] as i32
                - raw[i - wi - 1] as i32
                - 2 * raw[i - wi] as i32
                - raw[i - wi + 1] as i32;
            mag[i] = gx.unsigned_abs() + gy.unsigned_abs();
        }
    }

    let mut edges = vec![false; wi * hi];
    let mut stack = Vec::new();
    for (i, &m) in mag.iter().enumerate() {
        if m >= EDGE_HIGH {
            edges[i] = true;
            stack.push(i);
        }
    }

    // 약한 에지 승격 (8-연결)
    while let Some(i) = stack.pop() {
        let x = (i % wi) as i64;
        let y = (i / wi) as i64;
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= wi as i64 || ny >= hi as i64 {
                    continue;
                }
                let n = ny as usize * wi + nx as usize;
                if !edges[n] && mag[n] >= EDGE_LOW {
                    edges[n] = true;
                    stack.push(n);
                }
            }
        }
    }

    edges
}

/// 3×3 정사각 구조 요소 모폴로지 닫힘 (팽창 후 침식).
///
/// 같은 물체 경계에 속한 에지 조각 사이의 작은 틈을 메운다.
fn close_3x3(mask: &[bool], w: u32, h: u32) -> Vec<bool> {
    let dilated = morph_3x3(mask, w, h, true);
    morph_3x3(&dilated, w, h, false)
}

/// 3×3 팽창(`dilate=true`) 또는 침식(`dilate=false`), 경계 복제
fn morph_3x3(mask: &[bool], w: u32, h: u32, dilate: bool) -> Vec<bool> {
    let (wi, hi) = (w as usize, h as usize);
    let mut out = vec![false; wi * hi];

    for y in 0..hi {
        for x in 0..wi {
            let mut acc = !dilate;
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    let nx = (x as i64 + dx).clamp(0, wi as i64 - 1) as usize;
                    let ny = (y as i64 + dy).clamp(0, hi as i64 - 1) as usize;
                    let v = mask[ny * wi + nx];
                    if dilate {
                        acc |= v;
                    } else {
                        acc &= v;
                    }
                }
            }
            out[y * wi + x] = acc;
        }
    }

    out
}

/// 에지 맵의 8-연결 성분을 추출하고 외곽 형태만 남긴다.
///
/// 다른 성분의 바운딩 박스에 완전히 포함된 성분(구멍의 내부 경계)은
/// 버린다 — 재귀하지 않는 외곽 윤곽 추출에 해당.
fn outer_shapes(mask: &[bool], w: u32, h: u32) -> Vec<Shape> {
    let (wi, hi) = (w as usize, h as usize);
    let mut visited = vec![false; wi * hi];
    let mut shapes = Vec::new();

    for seed in 0..wi * hi {
        if !mask[seed] || visited[seed] {
            continue;
        }

        // BFS로 성분 픽셀 수집
        visited[seed] = true;
        let mut queue = vec![seed];
        let mut pixels = Vec::new();
        while let Some(i) = queue.pop() {
            pixels.push(i);
            let x = (i % wi) as i64;
            let y = (i / wi) as i64;
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= wi as i64 || ny >= hi as i64 {
                        continue;
                    }
                    let n = ny as usize * wi + nx as usize;
                    if mask[n] && !visited[n] {
                        visited[n] = true;
                        queue.push(n);
                    }
                }
            }
        }

        shapes.push(summarize(&pixels, wi));
    }

    // 외곽 형태만 유지
    let keep: Vec<bool> = shapes
        .iter()
        .map(|s| !shapes.iter().any(|other| contains(&other.bbox, &s.bbox)))
        .collect();
    shapes
        .into_iter()
        .zip(keep)
        .filter_map(|(s, k)| k.then_some(s))
        .collect()
}

/// `outer`가 `inner`를 진부분집합으로 포함하는지
fn contains(outer: &Region, inner: &Region) -> bool {
    let strictly_larger = outer.area() > inner.area();
    strictly_larger
        && outer.x <= inner.x
        && outer.y <= inner.y
        && outer.x + outer.w >= inner.x + inner.w
        && outer.y + outer.h >= inner.y + inner.h
}

/// 성분 픽셀 목록 → 바운딩 박스 + 행 스팬 넓이 근사.
///
/// 넓이는 행마다 가장 왼쪽과 오른쪽 에지 픽셀 사이 구간을 합산해
/// 윤곽이 둘러싼 넓이를 근사한다.
fn summarize(pixels: &[usize], wi: usize) -> Shape {
    let mut min_x = usize::MAX;
    let mut min_y = usize::MAX;
    let mut max_x = 0usize;
    let mut max_y = 0usize;

    for &i in pixels {
        let (x, y) = (i % wi, i / wi);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    // 행별 좌우 스팬
    let rows = max_y - min_y + 1;
    let mut spans: Vec<Option<(usize, usize)>> = vec![None; rows];
    for &i in pixels {
        let (x, y) = (i % wi, i / wi);
        let row = y - min_y;
        spans[row] = Some(match spans[row] {
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
            None => (x, x),
        });
    }

    let area: u64 = spans
        .iter()
        .flatten()
        .map(|&(lo, hi)| (hi - lo + 1) as u64)
        .sum();

    Shape {
        bbox: Region::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ),
        area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 어두운 배경에 밝은 직사각형들을 채운 테스트 이미지
    fn synthetic(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(w, h, Rgba([40, 40, 40, 255]));
        for &(rx, ry, rw, rh) in rects {
            for y in ry..(ry + rh).min(h) {
                for x in rx..(rx + rw).min(w) {
                    img.put_pixel(x, y, Rgba([200, 200, 200, 255]));
                }
            }
        }
        img
    }

    fn detect(img: &RgbaImage) -> Vec<DetectedBlock> {
        let gray = preprocess(img);
        let center = (img.width() as f32 / 2.0, img.height() as f32 / 2.0);
        detect_blocks(&gray, (0, 0), center)
    }

    #[test]
    fn single_square_detected_near_its_true_bounds() {
        // 40×40 정사각형 + 구석의 작은 노이즈 점들
        let img = synthetic(
            200,
            200,
            &[(80, 80, 40, 40), (10, 10, 3, 3), (180, 15, 3, 3), (15, 182, 3, 3)],
        );
        let blocks = detect(&img);

        assert_eq!(blocks.len(), 1, "노이즈는 걸러지고 정사각형 하나만 남아야 함");
        let r = blocks[0].region;
        // 에지 밴드 두께만큼의 오차 허용
        assert!((r.x as i64 - 80).unsigned_abs() <= 5, "x={}", r.x);
        assert!((r.y as i64 - 80).unsigned_abs() <= 5, "y={}", r.y);
        assert!((r.w as i64 - 40).unsigned_abs() <= 8, "w={}", r.w);
        assert!((r.h as i64 - 40).unsigned_abs() <= 8, "h={}", r.h);
    }

    #[test]
    fn offset_translates_to_frame_coordinates() {
        let img = synthetic(120, 120, &[(40, 40, 30, 30)]);
        let gray = preprocess(&img);
        let blocks = detect_blocks(&gray, (480, 270), (960.0, 540.0));

        assert_eq!(blocks.len(), 1);
        let r = blocks[0].region;
        assert!(r.x >= 480 + 35 && r.x <= 480 + 45);
        assert!(r.y >= 270 + 35 && r.y <= 270 + 45);
    }

    #[test]
    fn too_small_shape_rejected() {
        let img = synthetic(100, 100, &[(45, 45, 8, 8)]);
        assert!(detect(&img).is_empty());
    }

    #[test]
    fn too_large_shape_rejected() {
        let img = synthetic(200, 200, &[(50, 50, 90, 90)]);
        assert!(detect(&img).is_empty());
    }

    #[test]
    fn elongated_shape_rejected() {
        // 종횡비 ~0.33 — 정사각형 구간 밖
        let img = synthetic(200, 200, &[(60, 80, 60, 20)]);
        assert!(detect(&img).is_empty());
    }

    #[test]
    fn sparse_diagonal_stroke_rejected() {
        // 바운딩 박스는 정사각형이지만 채움 비율이 낮은 대각선 획
        let mut img = RgbaImage::from_pixel(120, 120, Rgba([40, 40, 40, 255]));
        for t in 0..40u32 {
            for d in 0..3u32 {
                img.put_pixel(40 + t, 40 + t.saturating_add(d).min(119), Rgba([200, 200, 200, 255]));
            }
        }
        assert!(detect(&img).is_empty());
    }

    #[test]
    fn output_capped_at_ten_and_sorted_by_center_distance() {
        // 4×4 격자의 24×24 정사각형 16개
        let mut rects = Vec::new();
        for gy in 0..4u32 {
            for gx in 0..4u32 {
                rects.push((60 + gx * 120, 60 + gy * 120, 24, 24));
            }
        }
        let img = synthetic(520, 520, &rects);
        let blocks = detect(&img);

        assert_eq!(blocks.len(), MAX_BLOCKS);
        for pair in blocks.windows(2) {
            assert!(
                pair[0].center_distance <= pair[1].center_distance,
                "중심 거리 오름차순 위반"
            );
        }
    }

    #[test]
    fn tiny_region_returns_nothing() {
        let img = synthetic(2, 2, &[]);
        assert!(detect(&img).is_empty());
    }

    #[test]
    fn flat_region_has_no_edges() {
        let img = synthetic(100, 100, &[]);
        assert!(detect(&img).is_empty());
    }
}
