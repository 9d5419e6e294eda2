use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::data::timeline::FrequencyEntry;
use crate::error::{AnalysisError, AnalysisResult};
use crate::plot::word_cloud::layout_words;
use crate::plot::{ChartRenderer, WORD_CLOUD_SIZE};

/// 빈도 그래프 크기
const FREQUENCY_PLOT_SIZE: (u32, u32) = (640, 480);

const FONT_FAMILY: &str = "sans-serif";

/// 폰트를 지정하지 않았을 때 쓰는 내장 폰트 (DejaVu Sans)
const DEFAULT_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// 워드 클라우드 색상
const PALETTE: [RGBColor; 8] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
    RGBColor(72, 40, 120),
    RGBColor(42, 120, 142),
    RGBColor(34, 168, 132),
];

/// 한 프로세스에서 한 번만 등록된 폰트 경로 (`None`이면 내장 폰트)
static REGISTERED_FONT: OnceCell<Option<PathBuf>> = OnceCell::new();

/// plotters 비트맵 백엔드로 PNG를 그립니다.
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    font_path: Option<PathBuf>,
}

impl PlottersRenderer {
    pub fn new(font_path: Option<PathBuf>) -> Self {
        Self { font_path }
    }

    fn ensure_font(&self, target: &Path) -> AnalysisResult<()> {
        REGISTERED_FONT
            .get_or_try_init(|| {
                let bytes: &'static [u8] = match &self.font_path {
                    Some(font_path) => {
                        let bytes = fs::read(font_path).map_err(|e| {
                            AnalysisError::io(format!("Failed to read font {:?}", font_path), e)
                        })?;
                        // plotters는 'static 폰트 데이터를 요구
                        Box::leak(bytes.into_boxed_slice())
                    }
                    None => DEFAULT_FONT,
                };

                register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
                    AnalysisError::Plot {
                        path: target.to_path_buf(),
                        reason: format!("invalid font file {:?}", self.font_path),
                    }
                })?;

                Ok(self.font_path.clone())
            })
            .map(|_| ())
    }
}

fn plot_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> AnalysisError + '_ {
    move |e| AnalysisError::Plot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_message_frequency(
        &self,
        series: &[FrequencyEntry],
        path: &Path,
    ) -> AnalysisResult<()> {
        self.ensure_font(path)?;

        let root = BitMapBackend::new(path, FREQUENCY_PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error(path))?;

        let start = series.first().map(|e| e.minute).unwrap_or_default();
        let x_max = (series.len() as f64 - 0.5).max(0.5);
        let y_max = series.iter().map(|e| e.count).max().unwrap_or(0) as f64 * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption("Frequency of Messages Over Time", (FONT_FAMILY, 20.0))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max.max(1.0))
            .map_err(plot_error(path))?;

        let format_minute =
            |x: &f64| (start + Duration::minutes(x.round() as i64)).format("%H:%M").to_string();
        chart
            .configure_mesh()
            .x_desc("Timestamp")
            .y_desc("Number of Messages")
            .x_label_formatter(&format_minute)
            .draw()
            .map_err(plot_error(path))?;

        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, e)| (i as f64, e.count as f64))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), &BLUE))
            .map_err(plot_error(path))?;
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
            .map_err(plot_error(path))?;

        root.present().map_err(plot_error(path))?;
        Ok(())
    }

    fn render_word_frequencies(
        &self,
        counts: &[(String, usize)],
        path: &Path,
    ) -> AnalysisResult<()> {
        self.ensure_font(path)?;

        let (width, height) = WORD_CLOUD_SIZE;
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error(path))?;

        for (i, word) in layout_words(counts, width, height).iter().enumerate() {
            let style = (FONT_FAMILY, word.font_size)
                .into_font()
                .color(&PALETTE[i % PALETTE.len()]);
            root.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))
                .map_err(plot_error(path))?;
        }

        root.present().map_err(plot_error(path))?;
        Ok(())
    }
}
