pub mod backend;
pub mod word_cloud;

use std::path::Path;

use crate::data::timeline::FrequencyEntry;
use crate::error::AnalysisResult;

pub use backend::PlottersRenderer;

/// 메시지 빈도 그래프 파일 종류
pub const MESSAGE_FREQUENCY_PLOT: &str = "message_frequency";
/// 워드 클라우드 파일 종류
pub const WORD_PLOT: &str = "word_plot";

/// 워드 클라우드 크기
pub const WORD_CLOUD_SIZE: (u32, u32) = (800, 400);

/// 분석 결과를 이미지 파일로 그리는 백엔드
pub trait ChartRenderer {
    /// 1분 단위 메시지 빈도를 선 그래프로 그립니다.
    fn render_message_frequency(&self, series: &[FrequencyEntry], path: &Path)
        -> AnalysisResult<()>;

    /// 단어 빈도로 워드 클라우드를 그립니다.
    fn render_word_frequencies(&self, counts: &[(String, usize)], path: &Path)
        -> AnalysisResult<()>;
}
