//! 워드 클라우드 배치
//!
//! 빈도가 높은 단어부터 큰 글씨로, 캔버스 중앙에서 나선을 따라 겹치지 않는 자리를 찾습니다.
//! 글자 폭은 폰트 없이 추정하므로 배치는 렌더링 백엔드와 무관한 순수 함수입니다.

/// 한 번에 배치할 최대 단어 수
pub const MAX_WORDS: usize = 200;

const MIN_FONT_SIZE: f64 = 8.0;
const FONT_STEP: f64 = 2.0;
/// 글자 폭 / 글자 크기 추정 비율
const CHAR_WIDTH_RATIO: f64 = 0.6;
const RELATIVE_SCALING: f64 = 0.5;
const SPIRAL_STEP: f64 = 0.1;

/// 캔버스에 배치된 단어
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    /// 왼쪽 위 모서리
    pub x: i32,
    pub y: i32,
    pub font_size: f64,
}

impl PlacedWord {
    pub fn width(&self) -> i32 {
        estimate_width(&self.text, self.font_size)
    }

    pub fn height(&self) -> i32 {
        self.font_size.ceil() as i32
    }

    fn overlaps(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        x < self.x + self.width() && self.x < x + w && y < self.y + self.height() && self.y < y + h
    }
}

fn estimate_width(text: &str, font_size: f64) -> i32 {
    (text.chars().count() as f64 * font_size * CHAR_WIDTH_RATIO).ceil() as i32
}

/// 단어 빈도(내림차순)를 받아 캔버스 위 위치를 정합니다.
/// 어디에도 들어가지 않는 단어는 빠집니다.
pub fn layout_words(counts: &[(String, usize)], width: u32, height: u32) -> Vec<PlacedWord> {
    let (width, height) = (width as i32, height as i32);
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_count == 0 {
        return Vec::new();
    }

    let max_font_size = (height as f64 * 0.3).max(MIN_FONT_SIZE);
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let max_radius = (cx * cx + cy * cy).sqrt();

    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut last_size = max_font_size;

    for (text, count) in counts.iter().take(MAX_WORDS) {
        if *count == 0 || text.is_empty() {
            continue;
        }

        let ratio = *count as f64 / max_count as f64;
        let mut font_size = (max_font_size * (RELATIVE_SCALING * ratio + 1.0 - RELATIVE_SCALING))
            .min(last_size)
            .round();

        while font_size >= MIN_FONT_SIZE {
            let w = estimate_width(text, font_size);
            let h = font_size.ceil() as i32;

            if let Some((x, y)) = find_position(&placed, w, h, width, height, cx, cy, max_radius) {
                placed.push(PlacedWord {
                    text: text.clone(),
                    x,
                    y,
                    font_size,
                });
                last_size = font_size;
                break;
            }
            font_size -= FONT_STEP;
        }
    }

    placed
}

/// 중앙에서 시작하는 아르키메데스 나선을 따라 빈 자리를 찾습니다.
#[allow(clippy::too_many_arguments)]
fn find_position(
    placed: &[PlacedWord],
    w: i32,
    h: i32,
    width: i32,
    height: i32,
    cx: f64,
    cy: f64,
    max_radius: f64,
) -> Option<(i32, i32)> {
    if w > width || h > height {
        return None;
    }

    let mut t: f64 = 0.0;
    loop {
        let radius = 2.0 * t;
        if radius > max_radius {
            return None;
        }

        let x = (cx + radius * t.cos() - w as f64 / 2.0).round() as i32;
        let y = (cy + radius * t.sin() - h as f64 / 2.0).round() as i32;

        let inside = x >= 0 && y >= 0 && x + w <= width && y + h <= height;
        if inside && !placed.iter().any(|p| p.overlaps(x, y, w, h)) {
            return Some((x, y));
        }

        t += SPIRAL_STEP;
    }
}
