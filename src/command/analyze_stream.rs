use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{Context, Result};
use rand::Rng;

use crate::data::analysis::{self, count_words};
use crate::data::archive;
use crate::data::loader::load_chat_log;
use crate::data::models::{ChatRow, SummaryStatistics, UserProfile, CHAT_LOG_HEADERS};
use crate::data::sentiment::SentimentScorer;
use crate::data::stop_words::StopWordSet;
use crate::data::timeline::message_frequency;
use crate::error::AnalysisError;
use crate::plot::{ChartRenderer, MESSAGE_FREQUENCY_PLOT, WORD_PLOT};
use crate::utils;

/// 기본 작업 로그 경로
pub const DEFAULT_CHAT_LOG_PATH: &str = "./chat-log.csv";

/// 분석 실행에 필요한 경로 설정
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// 사용자 정의 불용어 YAML
    pub filter_words_path: PathBuf,
    /// 누적 마스터 로그
    pub master_log_path: PathBuf,
    /// 그래프와 보관용 복사본을 쓸 디렉토리
    pub output_dir: PathBuf,
    /// PNG 렌더링에 쓸 TTF 폰트 (없으면 내장 폰트)
    pub font_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter_words_path: PathBuf::from("./filter_words.yaml"),
            master_log_path: PathBuf::from("master-log.csv"),
            output_dir: PathBuf::from("."),
            font_path: None,
        }
    }
}

/// 외부 기능 백엔드 (감성 분석, 렌더링)
pub struct Backends<'a> {
    pub scorer: &'a dyn SentimentScorer,
    pub renderer: &'a dyn ChartRenderer,
}

/// 분석 한 번의 결과
#[derive(Debug)]
pub struct AnalysisReport {
    pub summary: SummaryStatistics,
    pub profiles: Vec<UserProfile>,
    pub frequency_plot: PathBuf,
    pub word_plot: PathBuf,
    pub archive_copy: PathBuf,
    pub rows_archived: usize,
    pub skipped_rows: usize,
}

/// 작업 로그를 분석하고 그래프, 보관용 복사본, 마스터 로그를 만든 뒤 작업 로그를 비웁니다.
///
/// 작업 로그는 앞선 단계가 모두 성공했을 때만 비웁니다.
/// 같은 작업 로그에 대해 동시에 두 번 실행하면 안 됩니다 (파일 잠금 없음).
pub fn analyze_stream<R: Rng + ?Sized>(
    file_path: &Path,
    stream_title: &str,
    config: &AnalysisConfig,
    backends: &Backends,
    rng: &mut R,
    today: NaiveDate,
) -> Result<AnalysisReport> {
    // 설정 파일이 없으면 아무 파일도 만들기 전에 실패
    let stop_words = StopWordSet::load(&config.filter_words_path)?;
    utils::log(format!(
        "불용어 로드 완료: {}개 ({:?})",
        stop_words.len(),
        config.filter_words_path
    ));

    let mut chat_log = load_chat_log(file_path)?;
    utils::log(format!(
        "채팅 로그 로드 완료: {}줄 (건너뛴 줄: {})",
        chat_log.rows.len(),
        chat_log.skipped_rows
    ));
    if chat_log.rows.is_empty() {
        return Err(AnalysisError::EmptyLog(file_path.to_path_buf()).into());
    }

    stop_words.apply(&mut chat_log.rows);
    print_head(&chat_log.rows);

    let summary = analysis::summary_statistics(&chat_log.rows);
    analysis::print_summary_statistics(&summary);

    // 메시지 빈도 그래프
    let frequency_plot = config
        .output_dir
        .join(utils::plot_file_name(today, stream_title, MESSAGE_FREQUENCY_PLOT));
    let series = message_frequency(&chat_log.rows);
    backends
        .renderer
        .render_message_frequency(&series, &frequency_plot)
        .wrap_err("Failed to render message frequency plot")?;
    utils::log(format!("메시지 빈도 그래프 저장: {:?}", frequency_plot));

    // 워드 클라우드
    let word_plot = config
        .output_dir
        .join(utils::plot_file_name(today, stream_title, WORD_PLOT));
    let word_counts = count_words(
        chat_log
            .rows
            .iter()
            .map(|row| row.filtered_message.as_str())
            .filter(|msg| !msg.is_empty()),
    )
    .most_common(None);
    backends
        .renderer
        .render_word_frequencies(&word_counts, &word_plot)
        .wrap_err("Failed to render word cloud")?;
    utils::log(format!("워드 클라우드 저장: {:?}", word_plot));

    let profiles = analysis::user_profiles(&chat_log.rows, backends.scorer, rng);
    utils::log(format!("사용자 프로필 생성 완료: {}명", profiles.len()));

    // 보관 → 마스터 로그 → 작업 로그 비우기 순서 유지
    let archive_copy =
        archive::archive_copy(file_path, &chat_log.rows, stream_title, &config.output_dir)?;
    utils::log(format!("보관용 복사본 저장: {:?}", archive_copy));

    let rows_archived =
        archive::append_master_log(&config.master_log_path, &chat_log.rows, stream_title)?;
    utils::log(format!(
        "마스터 로그에 {}줄 추가: {:?}",
        rows_archived, config.master_log_path
    ));

    utils::log("Analysis complete.");
    utils::log("Clearing Stream Data for Base Log");
    archive::clear_chat_log(file_path, &CHAT_LOG_HEADERS)
        .wrap_err_with(|| format!("Failed to clear chat log {:?}", file_path))?;

    Ok(AnalysisReport {
        summary,
        profiles,
        frequency_plot,
        word_plot,
        archive_copy,
        rows_archived,
        skipped_rows: chat_log.skipped_rows,
    })
}

/// 앞의 다섯 줄을 출력합니다.
fn print_head(rows: &[ChatRow]) {
    println!("\n{:<16} {:<20} {:<32} {}", "user", "timestamp", "message", "filtered_message");
    for row in rows.iter().take(5) {
        println!(
            "{:<16} {:<20} {:<32} {}",
            row.user,
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.message,
            row.filtered_message
        );
    }
    println!();
}

/// 사용자 프로필을 JSON으로 출력합니다.
pub fn print_profiles(profiles: &[UserProfile]) -> Result<()> {
    let json = serde_json::to_string_pretty(profiles)
        .context("Failed to serialize user profiles to JSON")?;
    println!("{}", json);
    Ok(())
}

/// 오늘 날짜 (그래프 파일 이름용)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
